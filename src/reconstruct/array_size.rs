//! Array bound recovery.
//!
//! Dependent bounds are not reported by the frontend, but they are still in
//! the type spelling: `T[N]`, `int[sizeof(T)][M]`. Arrays are built outermost
//! dimension first, so for a multi-dimensional spelling the bound wanted is
//! the one belonging to the first `[...]`; the trailing ones belong to the
//! element types.

use crate::error::{ReconstructError, Result};

/// Source text of the first dimension's bound in an array spelling.
///
/// Returns an empty string for `T[]`.
pub fn recover_bound(spelling: &str) -> Result<String> {
    let spelling = spelling.trim();
    if spelling.len() <= 2 || !spelling.ends_with(']') {
        return Err(ReconstructError::MalformedSpelling {
            spelling: spelling.to_string(),
            reason: "array spelling must end in ']'",
        });
    }

    let mut chars = spelling.chars().rev().peekable();
    let mut bound = Vec::new();
    loop {
        // the closing ] of this dimension
        chars.next();

        bound.clear();
        let mut depth = 1usize;
        for c in chars.by_ref() {
            match c {
                ']' => depth += 1,
                '[' => depth -= 1,
                _ => {}
            }
            if depth == 0 {
                break;
            }
            bound.push(c);
        }
        if depth > 0 {
            return Err(ReconstructError::MalformedSpelling {
                spelling: spelling.to_string(),
                reason: "array spelling has an unmatched ']'",
            });
        }

        // another dimension in front of this one
        if chars.peek() != Some(&']') {
            break;
        }
    }

    Ok(bound.into_iter().rev().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dimension() {
        assert_eq!(recover_bound("int[M]").unwrap(), "M");
        assert_eq!(recover_bound("T [N + 1]").unwrap(), "N + 1");
        assert_eq!(recover_bound("int[]").unwrap(), "");
    }

    #[test]
    fn outer_dimension_of_nested_array() {
        assert_eq!(recover_bound("int[N][M]").unwrap(), "N");
        // the element type is reconstructed from its own spelling
        assert_eq!(recover_bound("int[M]").unwrap(), "M");
    }

    #[test]
    fn interior_brackets_are_kept() {
        assert_eq!(recover_bound("char[sizeof(int[4])]").unwrap(), "sizeof(int[4])");
        assert_eq!(recover_bound("int[a[0]][b[1]]").unwrap(), "a[0]");
    }

    #[test]
    fn rejects_non_array_spelling() {
        assert!(matches!(
            recover_bound("int*"),
            Err(ReconstructError::MalformedSpelling { .. })
        ));
        assert!(recover_bound("[]").is_err());
    }

    #[test]
    fn rejects_unmatched_closing_bracket() {
        assert!(matches!(
            recover_bound("abc]"),
            Err(ReconstructError::MalformedSpelling { .. })
        ));
        assert!(matches!(
            recover_bound("int]]"),
            Err(ReconstructError::MalformedSpelling { .. })
        ));
        assert!(recover_bound("int[N]]").is_err());
    }
}

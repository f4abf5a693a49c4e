//! Template argument splitting.
//!
//! The frontend only gives us the instantiation spelling, e.g.
//! `Templ<A, B<C, D>>`, so the top-level arguments have to be recovered from
//! text. `(`, `{` and `[` open an expression context in which `<`, `>` and `,`
//! mean nothing to us. Outside of one, every `<` and `>` is taken as a
//! template bracket. Comparison and shift operators written outside of
//! parentheses are therefore misread as nesting, and the commas after them
//! stop separating arguments.

/// Split the argument list of `spelling`, whose closing `>` has already been
/// removed and which starts with `template_name` followed by `<`.
pub fn split_arguments(template_name: &str, spelling: &str) -> Vec<String> {
    let body = spelling.get(template_name.len() + 1..).unwrap_or("");
    split_argument_list(body)
}

/// Split the text between the outermost template brackets.
pub fn split_argument_list(body: &str) -> Vec<String> {
    let mut arguments = Vec::new();
    let mut expr_depth = 0usize;
    let mut template_depth = 0usize;
    let mut start = 0;

    for (i, c) in body.char_indices() {
        match c {
            '(' | '{' | '[' => expr_depth += 1,
            ')' | '}' | ']' => expr_depth = expr_depth.saturating_sub(1),
            _ if expr_depth > 0 => {}
            '<' => template_depth += 1,
            '>' => template_depth = template_depth.saturating_sub(1),
            ',' if template_depth == 0 => {
                arguments.push(body[start..i].trim().to_string());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < body.len() {
        arguments.push(body[start..].trim().to_string());
    }
    arguments
}

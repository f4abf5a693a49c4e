//! Token sequences.
//!
//! Text the engine cannot structure (dependent array bounds, decltype
//! operands, non-type template arguments) is kept as a sequence of C++
//! tokens. Rendering re-joins the tokens and only inserts a space where two
//! neighbours would otherwise lex as a different token.

use std::fmt::{self, Display, Write};

use serde::{Serialize, Serializer};
use thin_vec::ThinVec;

const PUNCTUATORS_3: [&str; 5] = ["<<=", ">>=", "->*", "...", "<=>"];

const PUNCTUATORS_2: [&str; 22] = [
    "::", "->", "++", "--", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", ".*", "##",
];

const ENCODING_PREFIXES: [&str; 5] = ["L", "u", "U", "u8", "R"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenString {
    tokens: ThinVec<String>,
}

impl TokenString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap tokens that were already split by the frontend.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenString {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Split raw source text into tokens.
    pub fn tokenize(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut tokens: ThinVec<String> = ThinVec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c.is_whitespace() {
                i += 1;
                continue;
            }

            let start = i;
            if is_identifier_start(c) {
                while i < chars.len() && is_identifier_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if i < chars.len() && matches!(chars[i], '"' | '\'') && ENCODING_PREFIXES.contains(&word.as_str()) {
                    i = skip_quoted(&chars, i);
                }
            } else if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
                i += 1;
                while i < chars.len() {
                    let c = chars[i];
                    let exponent_sign = matches!(c, '+' | '-') && matches!(chars[i - 1], 'e' | 'E' | 'p' | 'P');
                    if exponent_sign || is_identifier_char(c) || c == '.' || c == '\'' {
                        i += 1;
                    } else {
                        break;
                    }
                }
            } else if matches!(c, '"' | '\'') {
                i = skip_quoted(&chars, i);
            } else {
                i += punctuator_len(&chars[i..]);
            }

            tokens.push(chars[start..i].iter().collect());
        }

        TokenString { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Drop a final `token` if present.
    pub fn without_trailing(mut self, token: &str) -> Self {
        if self.last() == Some(token) {
            self.tokens.pop();
        }
        self
    }
}

impl Display for TokenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<&str> = None;
        for token in &self.tokens {
            if let Some(previous) = previous
                && needs_space(previous, token)
            {
                f.write_char(' ')?;
            }
            f.write_str(token)?;
            previous = Some(token.as_str());
        }
        Ok(())
    }
}

impl Serialize for TokenString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Index just past the literal starting at `start`.
fn skip_quoted(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}

fn punctuator_len(rest: &[char]) -> usize {
    let starts_with = |p: &str| rest.len() >= p.len() && p.chars().zip(rest).all(|(a, &b)| a == b);
    if PUNCTUATORS_3.iter().any(|p| starts_with(*p)) {
        3
    } else if PUNCTUATORS_2.iter().any(|p| starts_with(*p)) {
        2
    } else {
        1
    }
}

fn needs_space(left: &str, right: &str) -> bool {
    let (Some(l), Some(r)) = (left.chars().last(), right.chars().next()) else {
        return false;
    };
    if is_identifier_char(l) && is_identifier_char(r) {
        return true;
    }
    let mut pair = String::with_capacity(2);
    pair.push(l);
    pair.push(r);
    PUNCTUATORS_2.contains(&pair.as_str()) || pair == "//" || pair == "/*"
}

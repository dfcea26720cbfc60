//! POSIX shell-style word splitting.
//!
//! Supports the subset task files need: whitespace separation, single and
//! double quotes (possibly mid-word), and backslash escapes. No expansion
//! and no comments.

use crate::domain::ParseError;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Plain,
    Single,
    Double,
}

/// Characters a backslash may escape inside double quotes.
const DOUBLE_QUOTE_ESCAPES: [char; 2] = ['\\', '"'];

/// Split `line` into words.
pub fn split(line: &str) -> Result<Vec<String>, ParseError> {
    let mut words = Vec::new();
    let mut word = String::new();
    // `''` is an (empty) word, so track presence separately from content.
    let mut in_word = false;
    let mut mode = Mode::Plain;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match mode {
            Mode::Plain => match c {
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut word));
                        in_word = false;
                    }
                }
                '\\' => {
                    let escaped = chars.next().ok_or(ParseError::TrailingEscape)?;
                    word.push(escaped);
                    in_word = true;
                }
                '\'' => {
                    mode = Mode::Single;
                    in_word = true;
                }
                '"' => {
                    mode = Mode::Double;
                    in_word = true;
                }
                c => {
                    word.push(c);
                    in_word = true;
                }
            },
            Mode::Single => match c {
                '\'' => mode = Mode::Plain,
                c => word.push(c),
            },
            Mode::Double => match c {
                '"' => mode = Mode::Plain,
                '\\' => {
                    let next = chars.next().ok_or(ParseError::UnterminatedQuote)?;
                    if !DOUBLE_QUOTE_ESCAPES.contains(&next) {
                        word.push('\\');
                    }
                    word.push(next);
                }
                c => word.push(c),
            },
        }
    }

    if mode != Mode::Plain {
        return Err(ParseError::UnterminatedQuote);
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}

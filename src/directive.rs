//! Directive block grammar.
//!
//! Parses the small block-of-directives syntax used to configure the
//! adapter:
//!
//! ```text
//! markdown_ex {
//!     mermaid_js "https://cdn.example/mermaid.min.js"  # comment
//! }
//! ```
//!
//! Tokens are separated by whitespace. A token starting with `"` runs to
//! the next unescaped `"` and may contain whitespace; `\"` and `\\` are
//! the only escapes. A `#` at the start of a token comments out the rest
//! of the line. Braces are only structural when they stand alone.

use crate::error::ConfigError;

/// Single lexical token with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub line: usize,
    quoted: bool,
}

impl Token {
    fn is_open(&self) -> bool {
        !self.quoted && self.text == "{"
    }

    fn is_close(&self) -> bool {
        !self.quoted && self.text == "}"
    }
}

/// Key line inside a directive block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Token,
    pub args: Vec<Token>,
}

/// Parsed directive: name, inline arguments and optional block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: Token,
    pub args: Vec<Token>,
    pub block: Vec<Entry>,
}

/// Splits directive source into tokens.
///
/// # Errors
///
/// Returns [`ConfigError::UnterminatedQuote`] if a quoted token is never
/// closed.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ConfigError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        if c == '\n' {
            line += 1;
            chars.next();
        } else if c.is_whitespace() {
            chars.next();
        } else if c == '#' {
            while chars.next_if(|&c| c != '\n').is_some() {}
        } else if c == '"' {
            let start = line;
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next_if(|&c| c == '"' || c == '\\') {
                        Some(escaped) => text.push(escaped),
                        None => text.push('\\'),
                    },
                    Some(other) => {
                        if other == '\n' {
                            line += 1;
                        }
                        text.push(other);
                    }
                    None => return Err(ConfigError::UnterminatedQuote { line: start }),
                }
            }
            tokens.push(Token {
                text,
                line: start,
                quoted: true,
            });
        } else {
            let mut text = String::new();
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                text.push(c);
            }
            tokens.push(Token {
                text,
                line,
                quoted: false,
            });
        }
    }

    Ok(tokens)
}

/// Parses a single directive with an optional block.
///
/// Returns `None` for input that holds no tokens at all (blank or only
/// comments).
///
/// # Errors
///
/// Returns error on unbalanced braces, nested blocks or trailing tokens
/// after the directive.
pub fn parse(source: &str) -> Result<Option<Directive>, ConfigError> {
    let mut tokens = tokenize(source)?.into_iter().peekable();

    let Some(name) = tokens.next() else {
        return Ok(None);
    };
    if name.is_open() || name.is_close() {
        return Err(unexpected(name));
    }

    let mut args = Vec::new();
    while let Some(arg) = tokens.next_if(|t| t.line == name.line && !t.is_open()) {
        if arg.is_close() {
            return Err(unexpected(arg));
        }
        args.push(arg);
    }

    let mut block = Vec::new();
    if let Some(open) = tokens.next_if(|t| t.line == name.line && t.is_open()) {
        let mut closed = false;
        while let Some(key) = tokens.next() {
            if key.is_close() {
                closed = true;
                break;
            }
            if key.is_open() {
                return Err(unexpected(key));
            }

            let mut entry_args = Vec::new();
            while let Some(arg) = tokens.next_if(|t| t.line == key.line && !t.is_close()) {
                if arg.is_open() {
                    return Err(unexpected(arg));
                }
                entry_args.push(arg);
            }
            block.push(Entry {
                key,
                args: entry_args,
            });
        }
        if !closed {
            return Err(ConfigError::UnclosedBlock { line: open.line });
        }
    }

    if let Some(trailing) = tokens.next() {
        return Err(unexpected(trailing));
    }

    Ok(Some(Directive { name, args, block }))
}

fn unexpected(token: Token) -> ConfigError {
    ConfigError::UnexpectedToken {
        token: token.text,
        line: token.line,
    }
}

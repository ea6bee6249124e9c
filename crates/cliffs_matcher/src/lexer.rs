//! Call tokenization.
//!
//! Splits a raw command call into position-tagged tokens. Whitespace
//! separates tokens except inside quotes; a backslash escapes a quote
//! character or another backslash.

use cliffs_foundation::{Error, Result, Token};

/// The quote characters recognized by default.
pub const DEFAULT_QUOTES: [char; 2] = ['"', '\''];

/// Tokenizer for command calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallLexer {
    quotes: Vec<char>,
}

impl Default for CallLexer {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTES)
    }
}

impl CallLexer {
    /// Creates a lexer recognizing the given quote characters.
    #[must_use]
    pub fn new(quotes: impl IntoIterator<Item = char>) -> Self {
        Self {
            quotes: quotes.into_iter().collect(),
        }
    }

    /// Returns the quote characters this lexer recognizes.
    #[must_use]
    pub fn quotes(&self) -> &[char] {
        &self.quotes
    }

    fn is_quote(&self, c: char) -> bool {
        self.quotes.contains(&c)
    }

    /// Splits a call into tokens.
    ///
    /// Quoted tokens keep their inner whitespace; their value excludes the
    /// quotes but their span covers them. Outside quotes, an escaped quote
    /// keeps its backslash.
    ///
    /// # Errors
    ///
    /// Returns an error if a quoted token is never closed.
    pub fn tokenize(&self, raw: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut start: Option<usize> = None;
        let mut quote: Option<(char, usize)> = None;
        let mut chars = raw.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                if quote.is_none() {
                    start.get_or_insert(i);
                }
                match chars.peek() {
                    Some(&(_, next)) if next == '\\' || self.is_quote(next) => {
                        chars.next();
                        if quote.is_none() && next != '\\' {
                            current.push('\\');
                        }
                        current.push(next);
                    }
                    _ => current.push('\\'),
                }
                continue;
            }

            match quote {
                Some((open, offset)) if c == open => {
                    let value = std::mem::take(&mut current);
                    tokens.push(Token::new(value, offset, i + c.len_utf8()));
                    quote = None;
                }
                Some(_) => current.push(c),
                None if self.is_quote(c) => {
                    flush(&mut tokens, &mut current, &mut start, i);
                    quote = Some((c, i));
                }
                None if c.is_whitespace() => flush(&mut tokens, &mut current, &mut start, i),
                None => {
                    start.get_or_insert(i);
                    current.push(c);
                }
            }
        }

        if let Some((open, offset)) = quote {
            return Err(Error::unterminated_quote(open, offset));
        }
        flush(&mut tokens, &mut current, &mut start, raw.len());

        Ok(tokens)
    }
}

/// Emits the pending plain token, if any.
fn flush(tokens: &mut Vec<Token>, current: &mut String, start: &mut Option<usize>, end: usize) {
    if let Some(start) = start.take() {
        tokens.push(Token::new(std::mem::take(current), start, end));
    }
}

/// Tokenizes a call with the default quote characters.
///
/// # Errors
///
/// Returns an error if a quoted token is never closed.
pub fn tokenize(raw: &str) -> Result<Vec<Token>> {
    CallLexer::default().tokenize(raw)
}

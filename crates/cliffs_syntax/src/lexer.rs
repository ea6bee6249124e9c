//! Lexer for grammar definition strings.
//!
//! Splits a definition like `set [loud] alarm at <time: int> (am|pm)` into
//! words and the static symbols `< > ( ) [ ] : | ^ ...`.

use cliffs_foundation::Span;

/// A token of a grammar definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxToken {
    /// The type and value of this token.
    pub kind: SyntaxTokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl SyntaxToken {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: SyntaxTokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Token types of the grammar definition language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxTokenKind {
    /// A run of non-space, non-static characters (literal or name).
    Symbol(String),
    /// `<`
    LAngle,
    /// `>`
    RAngle,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `...`
    Ellipsis,
}

impl SyntaxTokenKind {
    /// Returns how this token reads in a definition, for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Symbol(s) => format!("symbol '{s}'"),
            Self::LAngle => "'<'".to_string(),
            Self::RAngle => "'>'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Pipe => "'|'".to_string(),
            Self::Caret => "'^'".to_string(),
            Self::Ellipsis => "'...'".to_string(),
        }
    }
}

/// Lexer for grammar definitions.
pub struct SyntaxLexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
}

impl<'src> SyntaxLexer<'src> {
    /// Creates a new lexer for the given definition.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
        }
    }

    /// Tokenizes a whole definition.
    #[must_use]
    pub fn tokenize(source: &str) -> Vec<SyntaxToken> {
        let mut lexer = SyntaxLexer::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    /// Returns the next token, or `None` at the end of the definition.
    pub fn next_token(&mut self) -> Option<SyntaxToken> {
        self.skip_whitespace();

        let start = self.position;
        let c = self.peek_char()?;

        let kind = if let Some(kind) = static_kind(c) {
            self.advance();
            kind
        } else if self.rest.starts_with("...") {
            for _ in 0..3 {
                self.advance();
            }
            SyntaxTokenKind::Ellipsis
        } else {
            self.scan_symbol()
        };

        Some(SyntaxToken::new(kind, Span::new(start, self.position)))
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a symbol up to whitespace, a static character, or an ellipsis.
    fn scan_symbol(&mut self) -> SyntaxTokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || static_kind(c).is_some() || self.rest.starts_with("...") {
                break;
            }
            text.push(c);
            self.advance();
        }
        SyntaxTokenKind::Symbol(text)
    }
}

fn static_kind(c: char) -> Option<SyntaxTokenKind> {
    match c {
        '<' => Some(SyntaxTokenKind::LAngle),
        '>' => Some(SyntaxTokenKind::RAngle),
        '(' => Some(SyntaxTokenKind::LParen),
        ')' => Some(SyntaxTokenKind::RParen),
        '[' => Some(SyntaxTokenKind::LBracket),
        ']' => Some(SyntaxTokenKind::RBracket),
        ':' => Some(SyntaxTokenKind::Colon),
        '|' => Some(SyntaxTokenKind::Pipe),
        '^' => Some(SyntaxTokenKind::Caret),
        _ => None,
    }
}

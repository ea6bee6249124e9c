//! Grammar compiler.
//!
//! Turns a definition string into a syntax tree. Groups are built bottom-up
//! on a stack of open frames: `(` and `[` push a frame, `|` closes the
//! current alternative of the top frame, and `)`/`]` pop it into a node.

use std::collections::HashSet;

use cliffs_foundation::{Error, Result, Span};
use tracing::info;

use crate::lexer::{SyntaxLexer, SyntaxToken, SyntaxTokenKind};
use crate::tree::{Literal, Node, Optional, Variant};

/// What to do with trees that contain redundant nesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SimplifyMode {
    /// Return trees exactly as written.
    No,
    /// Return trees as written, logging when they could be simplified.
    #[default]
    Warn,
    /// Simplify trees, logging each simplification.
    Yes,
    /// Simplify trees without logging.
    Silently,
}

/// Configuration for the grammar compiler.
#[derive(Clone, Debug, Default)]
pub struct CompilerConfig {
    /// How to treat redundant nesting.
    pub simplify: SimplifyMode,
    /// Compile every literal as case-insensitive.
    pub all_case_insensitive: bool,
}

impl CompilerConfig {
    /// Builder method to set the simplify mode.
    #[must_use]
    pub fn with_simplify(mut self, simplify: SimplifyMode) -> Self {
        self.simplify = simplify;
        self
    }

    /// Builder method to make every literal case-insensitive.
    #[must_use]
    pub fn with_all_case_insensitive(mut self, all_case_insensitive: bool) -> Self {
        self.all_case_insensitive = all_case_insensitive;
        self
    }
}

/// Compiles grammar definitions into syntax trees.
#[derive(Clone, Debug, Default)]
pub struct SyntaxCompiler {
    config: CompilerConfig,
}

impl SyntaxCompiler {
    /// Creates a compiler with the given configuration.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    /// Gets the compiler configuration.
    #[must_use]
    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Compiles a definition into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns a syntax error (with the offending span) if the definition is
    /// malformed: unbalanced groups, empty groups or variants, misplaced
    /// symbols, or a name bound twice.
    pub fn compile(&self, definition: &str) -> Result<Node> {
        let tokens = SyntaxLexer::tokenize(definition);
        let root = Builder::new(&self.config, definition.len()).build(tokens)?;

        if self.config.simplify == SimplifyMode::No {
            return Ok(root);
        }

        let root = match root {
            Node::Sequence(mut seq) if seq.children.len() == 1 => seq.children.remove(0),
            other => other,
        };
        let flat = root.flattened();

        match self.config.simplify {
            SimplifyMode::Warn => {
                if root != flat {
                    info!(syntax = %root, simplified = %flat, "syntax can be simplified");
                }
                Ok(root)
            }
            SimplifyMode::Yes => {
                if root != flat {
                    info!(syntax = %root, simplified = %flat, "syntax simplified");
                }
                Ok(flat)
            }
            SimplifyMode::No | SimplifyMode::Silently => Ok(flat),
        }
    }
}

/// Compiles a definition with the default compiler configuration.
///
/// # Errors
///
/// See [`SyntaxCompiler::compile`].
pub fn compile(definition: &str) -> Result<Node> {
    SyntaxCompiler::default().compile(definition)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GroupKind {
    Root,
    Paren,
    Bracket,
}

impl GroupKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Paren => "group",
            Self::Bracket => "optional",
        }
    }
}

/// An open group.
struct Frame {
    kind: GroupKind,
    open: Span,
    alternatives: Vec<Vec<Node>>,
    current: Vec<Node>,
}

impl Frame {
    fn new(kind: GroupKind, open: Span) -> Self {
        Self {
            kind,
            open,
            alternatives: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Closes the frame into the node it denotes.
    fn finish(mut self, close: Span) -> Result<Node> {
        let span = self.open.to(close);

        if !self.alternatives.is_empty() {
            if self.current.is_empty() {
                return Err(Error::syntax("empty variant", span));
            }
            self.alternatives.push(self.current);
            let variant = Node::Variant(Variant {
                alternatives: self.alternatives.into_iter().map(Node::sequence).collect(),
                identifier: None,
                parenthesized: self.kind == GroupKind::Paren,
            });
            return Ok(match self.kind {
                GroupKind::Paren => variant,
                GroupKind::Bracket => Node::optional(variant),
                GroupKind::Root => Node::sequence(vec![variant]),
            });
        }

        match self.kind {
            GroupKind::Paren if self.current.is_empty() => Err(Error::syntax("empty group", span)),
            GroupKind::Bracket if self.current.is_empty() => {
                Err(Error::syntax("empty optional group", span))
            }
            GroupKind::Bracket => Ok(Node::optional(Node::sequence(self.current))),
            GroupKind::Paren | GroupKind::Root => Ok(Node::sequence(self.current)),
        }
    }
}

/// Where the builder is inside a `<...>` parameter or a `:id` suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Normal,
    BeforeParamName,
    AfterParamName(String),
    BeforeParamType(String),
    AfterParamType(String, String),
    AfterTail,
    BeforeIdentifier,
}

struct Builder<'a> {
    config: &'a CompilerConfig,
    end: usize,
    frames: Vec<Frame>,
    state: State,
    param_start: Span,
    symbols: HashSet<String>,
}

impl<'a> Builder<'a> {
    fn new(config: &'a CompilerConfig, end: usize) -> Self {
        Self {
            config,
            end,
            frames: vec![Frame::new(GroupKind::Root, Span::new(0, 0))],
            state: State::Normal,
            param_start: Span::default(),
            symbols: HashSet::new(),
        }
    }

    fn build(mut self, tokens: Vec<SyntaxToken>) -> Result<Node> {
        for token in tokens {
            self.feed(token)?;
        }

        let end = Span::new(self.end, self.end);
        match self.state {
            State::Normal => {}
            State::BeforeIdentifier => return Err(Error::syntax("missing identifier", end)),
            _ => return Err(Error::syntax("unterminated parameter", self.param_start.to(end))),
        }
        if self.frames.len() > 1 {
            let path: Vec<_> = self.frames[1..].iter().map(|f| f.kind.name()).collect();
            let open = self.frames[self.frames.len() - 1].open;
            return Err(Error::syntax(
                format!("unterminated expression: {}", path.join(" > ")),
                open.to(end),
            ));
        }

        match self.frames.pop() {
            Some(root) => root.finish(end),
            None => Ok(Node::sequence(Vec::new())),
        }
    }

    fn top(&mut self) -> &mut Frame {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    fn register(&mut self, name: &str, span: Span) -> Result<String> {
        if !self.symbols.insert(name.to_string()) {
            return Err(Error::syntax(format!("symbol '{name}' used more than once"), span));
        }
        Ok(name.to_string())
    }

    fn unexpected(token: &SyntaxToken) -> Error {
        Error::syntax(format!("unexpected {}", token.kind.describe()), token.span)
    }

    fn feed(&mut self, token: SyntaxToken) -> Result<()> {
        let state = std::mem::replace(&mut self.state, State::Normal);
        if state == State::Normal {
            return self.feed_normal(token);
        }

        match (state, &token.kind) {
            (State::BeforeParamName, SyntaxTokenKind::Symbol(name)) => {
                self.state = State::AfterParamName(name.clone());
            }
            (State::BeforeParamName, SyntaxTokenKind::RAngle) => {
                return Err(Error::syntax("empty parameter name", self.param_start.to(token.span)));
            }
            (State::AfterParamName(name), SyntaxTokenKind::Colon) => {
                self.state = State::BeforeParamType(name);
            }
            (State::BeforeParamType(name), SyntaxTokenKind::Symbol(typename)) => {
                self.state = State::AfterParamType(name, typename.clone());
            }
            (State::AfterParamName(name), SyntaxTokenKind::RAngle) => {
                let span = self.param_start.to(token.span);
                let name = self.register(&name, span)?;
                self.top().current.push(Node::parameter(name, None));
            }
            (State::AfterParamType(name, typename), SyntaxTokenKind::RAngle) => {
                let span = self.param_start.to(token.span);
                let name = self.register(&name, span)?;
                self.top().current.push(Node::parameter(name, Some(&typename)));
            }
            (State::AfterParamName(name), SyntaxTokenKind::Ellipsis) => {
                let span = self.param_start.to(token.span);
                let name = self.register(&name, span)?;
                self.top().current.push(Node::tail(name));
                self.state = State::AfterTail;
            }
            (State::AfterTail, SyntaxTokenKind::RAngle) => {}
            (State::BeforeIdentifier, SyntaxTokenKind::Symbol(id)) => {
                let id = self.register(id, token.span)?;
                self.assign_identifier(id, token.span)?;
            }
            _ => return Err(Self::unexpected(&token)),
        }

        Ok(())
    }

    fn feed_normal(&mut self, token: SyntaxToken) -> Result<()> {
        match token.kind {
            SyntaxTokenKind::Symbol(value) => {
                let case_sensitive = !self.config.all_case_insensitive;
                self.top().current.push(Node::Literal(Literal {
                    value,
                    case_sensitive,
                }));
            }
            SyntaxTokenKind::LAngle => {
                self.param_start = token.span;
                self.state = State::BeforeParamName;
            }
            SyntaxTokenKind::Caret => match self.top().current.last_mut() {
                Some(Node::Literal(lit)) => lit.case_sensitive = false,
                _ => return Err(Self::unexpected(&token)),
            },
            SyntaxTokenKind::Colon => match self.top().current.last() {
                Some(Node::Optional(_) | Node::Variant(_)) => self.state = State::BeforeIdentifier,
                Some(other) => {
                    return Err(Error::syntax(
                        format!("cannot assign identifier to {}", other.kind_name()),
                        token.span,
                    ));
                }
                None => return Err(Self::unexpected(&token)),
            },
            SyntaxTokenKind::Pipe => {
                let frame = self.top();
                if frame.current.is_empty() {
                    return Err(Error::syntax("empty variant", token.span));
                }
                let alternative = std::mem::take(&mut frame.current);
                frame.alternatives.push(alternative);
            }
            SyntaxTokenKind::LParen => self.frames.push(Frame::new(GroupKind::Paren, token.span)),
            SyntaxTokenKind::LBracket => {
                self.frames.push(Frame::new(GroupKind::Bracket, token.span));
            }
            SyntaxTokenKind::RParen => self.close(GroupKind::Paren, &token)?,
            SyntaxTokenKind::RBracket => self.close(GroupKind::Bracket, &token)?,
            SyntaxTokenKind::RAngle | SyntaxTokenKind::Ellipsis => {
                return Err(Self::unexpected(&token));
            }
        }
        Ok(())
    }

    fn close(&mut self, kind: GroupKind, token: &SyntaxToken) -> Result<()> {
        if self.frames.len() < 2 || self.top().kind != kind {
            return Err(Self::unexpected(token));
        }
        if let Some(frame) = self.frames.pop() {
            let node = frame.finish(token.span)?;
            self.top().current.push(node);
        }
        Ok(())
    }

    /// Names the group that was just closed.
    ///
    /// `[a|b]:id` names the variant inside the brackets rather than the
    /// optional group around it.
    fn assign_identifier(&mut self, id: String, span: Span) -> Result<()> {
        match self.top().current.last_mut() {
            Some(Node::Optional(Optional { inner, identifier })) => match inner.as_mut() {
                Node::Variant(var) if !var.parenthesized => var.identifier = Some(id),
                _ => *identifier = Some(id),
            },
            Some(Node::Variant(var)) => var.identifier = Some(id),
            _ => return Err(Error::syntax("identifier without a group", span)),
        }
        Ok(())
    }
}

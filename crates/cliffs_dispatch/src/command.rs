//! Commands: a syntax tree paired with a callback.

use std::fmt;

use cliffs_matcher::{CallMatcher, MatchOutcome};
use cliffs_syntax::Node;

use crate::usage::{UsageOptions, wrap_lines};

/// A command callback.
pub type Callback<R> = Box<dyn Fn(&MatchOutcome) -> R + Send + Sync>;

/// A registered command.
pub struct Command<R> {
    syntax: Node,
    callback: Callback<R>,
    description: Option<String>,
    matcher: Option<CallMatcher>,
}

impl<R> Command<R> {
    /// Creates a command from a compiled syntax and a callback.
    pub fn new<F>(syntax: Node, callback: F) -> Self
    where
        F: Fn(&MatchOutcome) -> R + Send + Sync + 'static,
    {
        Self {
            syntax,
            callback: Box::new(callback),
            description: None,
            matcher: None,
        }
    }

    /// Builder method to set the description shown in usage help.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to match this command with its own matcher instead
    /// of the dispatcher's.
    #[must_use]
    pub fn with_matcher(mut self, matcher: CallMatcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Sets the description shown in usage help.
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the matcher this command is matched with.
    pub fn set_matcher(&mut self, matcher: CallMatcher) -> &mut Self {
        self.matcher = Some(matcher);
        self
    }

    /// Gets the compiled syntax.
    #[must_use]
    pub fn syntax(&self) -> &Node {
        &self.syntax
    }

    /// Gets the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Gets the command's own matcher, if it has one.
    #[must_use]
    pub fn matcher(&self) -> Option<&CallMatcher> {
        self.matcher.as_ref()
    }

    /// Runs the callback with a match outcome.
    pub fn execute(&self, outcome: &MatchOutcome) -> R {
        (self.callback)(outcome)
    }

    /// Returns the usage help for this command: the syntax, then the
    /// description below it, indented when wrapping is on.
    #[must_use]
    pub fn usage_lines(&self, options: &UsageOptions) -> Vec<String> {
        let mut lines = wrap_lines(&self.syntax.to_string(), options.max_width, 0);
        if let Some(description) = &self.description {
            lines.extend(wrap_lines(description, options.max_width, options.indent_width));
        }
        lines
    }
}

impl<R> fmt::Debug for Command<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("syntax", &self.syntax.to_string())
            .field("description", &self.description)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

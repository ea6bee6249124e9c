//! The command dispatcher.
//!
//! Matches a call against every registered command and runs the callback of
//! the best match. When nothing matches, the failure of the command that got
//! furthest explains why, unless no command got past its first token.

use cliffs_foundation::{Rejection, Result, Token};
use cliffs_matcher::{Attempt, CallMatcher, MatchOutcome};
use cliffs_syntax::SyntaxCompiler;
use tracing::debug;

use crate::command::Command;
use crate::error::DispatchError;
use crate::usage::UsageOptions;

/// Registered commands and the machinery to dispatch calls to them.
#[derive(Debug)]
pub struct CommandDispatcher<R> {
    commands: Vec<Command<R>>,
    compiler: SyntaxCompiler,
    matcher: CallMatcher,
}

impl<R> Default for CommandDispatcher<R> {
    fn default() -> Self {
        Self::new(SyntaxCompiler::default(), CallMatcher::default())
    }
}

impl<R> CommandDispatcher<R> {
    /// Creates a dispatcher compiling syntaxes with `compiler` and matching
    /// calls with `matcher`.
    #[must_use]
    pub fn new(compiler: SyntaxCompiler, matcher: CallMatcher) -> Self {
        Self {
            commands: Vec::new(),
            compiler,
            matcher,
        }
    }

    /// Gets the registered commands, in registration order.
    #[must_use]
    pub fn commands(&self) -> &[Command<R>] {
        &self.commands
    }

    /// Gets the default matcher.
    #[must_use]
    pub fn matcher(&self) -> &CallMatcher {
        &self.matcher
    }

    /// Gets the default matcher mutably, to register types.
    pub fn matcher_mut(&mut self) -> &mut CallMatcher {
        &mut self.matcher
    }

    /// Registers a command.
    pub fn register(&mut self, command: Command<R>) -> &mut Command<R> {
        self.commands.push(command);
        let last = self.commands.len() - 1;
        &mut self.commands[last]
    }

    /// Compiles a syntax and registers it with a callback.
    ///
    /// # Errors
    ///
    /// Returns an error if the syntax does not compile.
    pub fn command<F>(&mut self, syntax: &str, callback: F) -> Result<&mut Command<R>>
    where
        F: Fn(&MatchOutcome) -> R + Send + Sync + 'static,
    {
        let tree = self.compiler.compile(syntax)?;
        Ok(self.register(Command::new(tree, callback)))
    }

    /// Dispatches a call to the best matching command and returns what its
    /// callback returns.
    ///
    /// The highest score wins; ties go to the earliest registered command.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Mismatch`] with the failure of the command
    /// that got furthest if it matched anything at all,
    /// [`DispatchError::UnknownCommand`] otherwise, and
    /// [`DispatchError::Structural`] as soon as any command hits a
    /// structural error.
    pub fn dispatch(&self, raw: &str) -> std::result::Result<R, DispatchError> {
        let mut shared_tokens = None;
        let mut best: Option<(usize, MatchOutcome)> = None;
        let mut furthest: Option<Rejection> = None;

        for (index, command) in self.commands.iter().enumerate() {
            match self.attempt(index, command, &mut shared_tokens, raw)? {
                Attempt::Matched(outcome) => {
                    debug!(index, score = outcome.score, "command matched");
                    if best.as_ref().is_none_or(|(_, b)| outcome.score > b.score) {
                        best = Some((index, outcome));
                    }
                }
                Attempt::Rejected(rejection) => {
                    debug!(
                        index,
                        progress = rejection.progress,
                        reason = %rejection.fail,
                        "command rejected"
                    );
                    if furthest.as_ref().is_none_or(|f| rejection.progress > f.progress) {
                        furthest = Some(rejection);
                    }
                }
            }
        }

        if let Some((index, outcome)) = best {
            debug!(index, "dispatching");
            return Ok(self.commands[index].execute(&outcome));
        }

        match furthest {
            Some(rejection) if rejection.progress > 0.0 => {
                Err(DispatchError::Mismatch(rejection.fail))
            }
            _ => Err(DispatchError::UnknownCommand),
        }
    }

    /// Runs one command, tokenizing with its own matcher if it has one and
    /// with the shared tokens of the default matcher otherwise.
    fn attempt(
        &self,
        index: usize,
        command: &Command<R>,
        shared_tokens: &mut Option<Vec<Token>>,
        raw: &str,
    ) -> Result<Attempt> {
        if let Some(matcher) = command.matcher() {
            let tokens = matcher.tokenize(raw)?;
            return matcher.attempt(index, command.syntax(), &tokens, raw);
        }

        if shared_tokens.is_none() {
            *shared_tokens = Some(self.matcher.tokenize(raw)?);
        }
        let tokens = shared_tokens.as_deref().unwrap_or_default();
        self.matcher.attempt(index, command.syntax(), tokens, raw)
    }

    /// Returns the usage help of every command, in registration order.
    #[must_use]
    pub fn usage_lines(&self, options: &UsageOptions) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, command) in self.commands.iter().enumerate() {
            let command_lines = command.usage_lines(options);
            if command_lines.is_empty() {
                continue;
            }
            if let (Some(separator), true) = (&options.separator, i > 0) {
                lines.push(separator.clone());
            }
            lines.extend(command_lines);
        }
        lines
    }
}

//! Usage help formatting.

/// Layout of generated usage help.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageOptions {
    /// Width to wrap lines to (0 = no wrapping).
    pub max_width: usize,

    /// Indent of command descriptions.
    pub indent_width: usize,

    /// Line placed between the blocks of consecutive commands.
    pub separator: Option<String>,
}

impl Default for UsageOptions {
    fn default() -> Self {
        Self {
            max_width: 70,
            indent_width: 4,
            separator: None,
        }
    }
}

impl UsageOptions {
    /// Builder method to set the wrap width.
    #[must_use]
    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Builder method to set the description indent.
    #[must_use]
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Builder method to set the block separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }
}

/// Wraps text to `max_width`, indenting every line by `indent` spaces.
///
/// With a width of 0 the text is returned as a single line, unindented.
pub(crate) fn wrap_lines(text: &str, max_width: usize, indent: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let indent = " ".repeat(indent);

    // Break only at spaces so grammar tokens like `[--count` stay whole
    let options = textwrap::Options::new(max_width)
        .initial_indent(&indent)
        .subsequent_indent(&indent)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .word_splitter(textwrap::WordSplitter::NoHyphenation)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

//! Error types for configuration, conversion and template calls.

/// Error while parsing the `markdown_ex` directive block.
///
/// Every variant carries the 1-based line of the offending token so the
/// host can point at the broken configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Directive name other than `markdown_ex`.
    #[error("line {line}: unknown directive '{name}', expected 'markdown_ex'")]
    UnknownDirective { name: String, line: usize },

    /// Key inside the block that the adapter does not understand.
    #[error("line {line}: unrecognized key '{key}' in markdown_ex block")]
    UnrecognizedKey { key: String, line: usize },

    /// Key given without its argument.
    #[error("line {line}: wrong argument count for '{key}': expected 1, got 0")]
    MissingArgument { key: String, line: usize },

    /// Key given with more than one argument.
    #[error("line {line}: wrong argument count for '{key}': expected 1, got {count}")]
    TooManyArguments {
        key: String,
        count: usize,
        line: usize,
    },

    /// Token in a position the grammar does not allow.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { token: String, line: usize },

    /// Opening brace without a matching closing brace.
    #[error("line {line}: unclosed block, expected '}}'")]
    UnclosedBlock { line: usize },

    /// Quoted argument that runs to the end of input.
    #[error("line {line}: unterminated quoted string")]
    UnterminatedQuote { line: usize },
}

/// Error while converting Markdown to HTML.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Writing rendered HTML failed.
    #[error("failed to render markdown: {0}")]
    Render(#[from] std::io::Error),

    /// Syntax highlighting of a code block failed.
    #[error("failed to highlight code block: {0}")]
    Highlight(#[from] syntect::Error),

    /// Rendered output was not valid UTF-8.
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Requested highlighting theme is not bundled.
    #[error("unknown highlighting theme '{0}'")]
    UnknownTheme(String),
}

/// Error from a template function call.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// Function called with the wrong number of positional arguments.
    #[error("{name}: expected {expected} argument(s), got {got}")]
    Arity {
        name: &'static str,
        expected: usize,
        got: usize,
    },

    /// No function registered under the requested name.
    #[error("function '{0}' is not defined")]
    UnknownFunction(String),

    /// Two providers registered the same function name.
    #[error("function '{0}' is already registered")]
    DuplicateFunction(String),

    /// The underlying conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),
}

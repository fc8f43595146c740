//! Adapter configuration.

use crate::directive::{self, Entry};
use crate::error::ConfigError;

/// Name of the configuration directive.
pub const DIRECTIVE: &str = "markdown_ex";

/// Key setting the Mermaid script location.
const MERMAID_JS: &str = "mermaid_js";

/// Alternate spelling of [`MERMAID_JS`] accepted for older config files.
const MERMAID_JS_ALIAS: &str = "MermaidJS";

/// Configuration of the `markdown_ex` template function.
///
/// Holds the location of the Mermaid script referenced from pages that
/// contain diagram blocks. `None` disables the script reference; diagram
/// blocks still render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownExConfig {
    /// Mermaid script location, used verbatim as a `script src`.
    pub mermaid_js: Option<String>,
}

impl MarkdownExConfig {
    /// Creates configuration with the given Mermaid script location.
    pub fn with_mermaid_js(location: impl Into<String>) -> Self {
        Self {
            mermaid_js: Some(location.into()),
        }
    }

    /// Parses configuration from a `markdown_ex` directive block.
    ///
    /// Blank input and a bare `markdown_ex` directive both yield the
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the source is not a well formed `markdown_ex`
    /// directive, contains an unrecognized key, or gives `mermaid_js`
    /// other than exactly one argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_ex::MarkdownExConfig;
    ///
    /// let config = MarkdownExConfig::from_directive(
    ///     "markdown_ex {\n    mermaid_js /js/mermaid.min.js\n}",
    /// )?;
    /// assert_eq!(config.mermaid_js.as_deref(), Some("/js/mermaid.min.js"));
    /// # Ok::<(), markdown_ex::ConfigError>(())
    /// ```
    pub fn from_directive(source: &str) -> Result<Self, ConfigError> {
        let Some(directive) = directive::parse(source)? else {
            return Ok(Self::default());
        };

        if directive.name.text != DIRECTIVE {
            return Err(ConfigError::UnknownDirective {
                name: directive.name.text,
                line: directive.name.line,
            });
        }
        if let Some(arg) = directive.args.into_iter().next() {
            return Err(ConfigError::UnexpectedToken {
                token: arg.text,
                line: arg.line,
            });
        }

        let mut config = Self::default();
        for entry in directive.block {
            config.apply(entry)?;
        }

        Ok(config)
    }

    fn apply(&mut self, entry: Entry) -> Result<(), ConfigError> {
        let Entry { key, mut args } = entry;

        match key.text.as_str() {
            MERMAID_JS | MERMAID_JS_ALIAS => {
                if args.len() > 1 {
                    return Err(ConfigError::TooManyArguments {
                        key: key.text,
                        count: args.len(),
                        line: key.line,
                    });
                }
                let Some(location) = args.pop() else {
                    return Err(ConfigError::MissingArgument {
                        key: key.text,
                        line: key.line,
                    });
                };
                self.mermaid_js = Some(location.text);
                Ok(())
            }
            _ => Err(ConfigError::UnrecognizedKey {
                key: key.text,
                line: key.line,
            }),
        }
    }
}

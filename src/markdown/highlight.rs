//! Code block highlighting with CSS classes.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use maud::{PreEscaped, html};
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::ConvertError;

/// Prefix of every highlighting class name.
const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Syntect highlighter emitting class-annotated spans.
///
/// Never produces inline `style` attributes; colors come from a
/// stylesheet generated by [`stylesheet`].
pub(crate) struct Highlighter {
    syntax_set: SyntaxSet,
}

impl Highlighter {
    pub(crate) fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Replaces code blocks of known languages with highlighted HTML blocks.
    ///
    /// Only nodes parsed as code blocks are touched. Raw HTML in the
    /// document is a separate node kind and never reaches syntect. Blocks
    /// with no language, an unknown language or no content stay code
    /// blocks and comrak renders them as escaped text.
    ///
    /// Returns the number of blocks highlighted.
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails on a line of a known language.
    pub(crate) fn replace_code_blocks<'a>(
        &self,
        root: &'a AstNode<'a>,
    ) -> Result<usize, ConvertError> {
        let mut count = 0;

        for node in root.descendants() {
            let mut ast = node.data.borrow_mut();
            let highlighted = match &ast.value {
                NodeValue::CodeBlock(block) => self.highlight_block(&block.info, &block.literal)?,
                _ => None,
            };

            if let Some(literal) = highlighted {
                ast.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal,
                });
                count += 1;
            }
        }

        Ok(count)
    }

    /// Renders one code block as `<pre><code class="language-X">`.
    fn highlight_block(&self, info: &str, code: &str) -> Result<Option<String>, ConvertError> {
        let Some(language) = info.split_whitespace().next() else {
            return Ok(None);
        };
        if code.is_empty() {
            return Ok(None);
        }
        let Some(syntax) = self.find_syntax(language) else {
            tracing::debug!(language, "No syntax definition, leaving code block plain");
            return Ok(None);
        };

        let highlighted = self.highlight_code(code, syntax)?;
        let mut markup = html! {
            pre { code class=(format!("language-{}", language)) { (PreEscaped(highlighted)) } }
        }
        .into_string();
        markup.push('\n');

        Ok(Some(markup))
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
    }

    /// Highlights code with syntect using CSS classes.
    fn highlight_code(&self, code: &str, syntax: &SyntaxReference) -> Result<String, ConvertError> {
        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntax_set, CLASS_STYLE);

        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(generator.finalize())
    }
}

/// Returns the stylesheet for a bundled syntect theme.
///
/// Class names match the spans produced by the converter.
///
/// # Errors
///
/// Returns error if the theme is not bundled with syntect or its CSS
/// cannot be generated.
///
/// # Examples
///
/// ```
/// let css = markdown_ex::stylesheet("InspiredGitHub")?;
/// assert!(css.contains(".hl-"));
/// # Ok::<(), markdown_ex::ConvertError>(())
/// ```
pub fn stylesheet(theme: &str) -> Result<String, ConvertError> {
    let themes = ThemeSet::load_defaults();
    let theme = themes
        .themes
        .get(theme)
        .ok_or_else(|| ConvertError::UnknownTheme(theme.to_string()))?;

    Ok(css_for_theme_with_class_style(theme, CLASS_STYLE)?)
}

/// Names of the bundled highlighting themes, sorted.
pub fn theme_names() -> Vec<String> {
    // BTreeMap keys, already sorted
    ThemeSet::load_defaults().themes.into_keys().collect()
}

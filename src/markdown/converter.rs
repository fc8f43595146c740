//! Markdown to HTML conversion with the fixed extension set.

use comrak::{Arena, Options, format_html, parse_document};

use super::highlight::Highlighter;
use super::{mermaid, tasklist};
use crate::config::MarkdownExConfig;
use crate::error::ConvertError;

/// Converts markdown to HTML with GitHub Flavored Markdown extensions.
///
/// The extension set is fixed: tables, strikethrough, autolinks, task
/// lists with the `task-list-item` class, footnotes, heading IDs, raw
/// HTML passthrough, class-based syntax highlighting and Mermaid blocks.
/// Only the Mermaid script location comes from configuration.
///
/// Holds no mutable state, so one instance can serve concurrent
/// conversions.
pub struct Converter {
    mermaid_js: Option<String>,
    highlighter: Highlighter,
}

impl Converter {
    /// Creates converter from adapter configuration.
    ///
    /// Loads syntect's bundled syntax definitions, which makes this the
    /// expensive step; build once and share.
    pub fn new(config: &MarkdownExConfig) -> Self {
        Self {
            mermaid_js: config.mermaid_js.clone(),
            highlighter: Highlighter::new(),
        }
    }

    /// Mermaid script location, if configured.
    pub fn mermaid_js(&self) -> Option<&str> {
        self.mermaid_js.as_deref()
    }

    /// Builds the comrak options for one conversion.
    fn options() -> Options<'static> {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.header_ids = Some(String::new());

        // Raw HTML passes through untouched, no tag filter
        options.render.unsafe_ = true;

        options
    }

    /// Converts markdown `source`, appending the HTML to `out`.
    ///
    /// `out` may be a reused buffer; anything it held before the call is
    /// kept ahead of the output. On error `out` holds no partial
    /// conversion beyond what it held before.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or syntax highlighting fails.
    pub fn convert(&self, source: &str, out: &mut Vec<u8>) -> Result<(), ConvertError> {
        let start = out.len();
        let result = self.convert_into(source, out);
        if result.is_err() {
            out.truncate(start);
        }
        result
    }

    /// Rewrites the parsed tree, then renders it in one pass.
    ///
    /// Every rewrite swaps parsed nodes for HTML blocks. Raw HTML in the
    /// source is never inspected.
    fn convert_into(&self, source: &str, out: &mut Vec<u8>) -> Result<(), ConvertError> {
        let start = out.len();
        let options = Self::options();
        let arena = Arena::new();
        let root = parse_document(&arena, source, &options);

        let diagrams = mermaid::replace_blocks(root);
        if diagrams > 0 {
            tracing::debug!(diagrams, "Rendering mermaid blocks");
        }
        self.highlighter.replace_code_blocks(root)?;
        tasklist::render_task_items(root, &options)?;

        format_html(root, &options, &mut *out)?;

        if diagrams > 0
            && let Some(location) = &self.mermaid_js
        {
            out.extend_from_slice(mermaid::script(location).as_bytes());
        }

        tracing::trace!(
            input_len = source.len(),
            output_len = out.len() - start,
            "Converted markdown"
        );

        Ok(())
    }

    /// Converts markdown to an owned HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if rendering or syntax highlighting fails.
    pub fn render(&self, source: &str) -> Result<String, ConvertError> {
        let mut out = Vec::with_capacity(source.len() * 2);
        self.convert(source, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(&MarkdownExConfig::default())
    }
}

impl std::fmt::Debug for Converter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Converter")
            .field("mermaid_js", &self.mermaid_js)
            .finish_non_exhaustive()
    }
}

//! Mermaid diagram blocks.
//!
//! Fenced blocks tagged `mermaid` are rendered as `<pre class="mermaid">`
//! for the client-side script to pick up. The script reference is emitted
//! once, after the document, and only when a location is configured.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use maud::{PreEscaped, html};

const LANGUAGE: &str = "mermaid";

const INITIALIZE: &str = "mermaid.initialize({startOnLoad: true});";

/// Replaces Mermaid code blocks in the tree with raw diagram markup.
///
/// Returns the number of blocks replaced.
pub(crate) fn replace_blocks<'a>(root: &'a AstNode<'a>) -> usize {
    let mut count = 0;

    for node in root.descendants() {
        let mut ast = node.data.borrow_mut();
        let diagram = match &ast.value {
            NodeValue::CodeBlock(block) if is_mermaid(&block.info) => {
                Some(diagram_html(&block.literal))
            }
            _ => None,
        };

        if let Some(literal) = diagram {
            ast.value = NodeValue::HtmlBlock(NodeHtmlBlock {
                block_type: 0,
                literal,
            });
            count += 1;
        }
    }

    count
}

/// Script tags loading and starting Mermaid from `location`.
pub(crate) fn script(location: &str) -> String {
    html! {
        script src=(location) {}
        script { (PreEscaped(INITIALIZE)) }
    }
    .into_string()
}

fn is_mermaid(info: &str) -> bool {
    info.split_whitespace().next() == Some(LANGUAGE)
}

fn diagram_html(source: &str) -> String {
    let mut markup = html! {
        pre class="mermaid" { (source) }
    }
    .into_string();
    markup.push('\n');
    markup
}

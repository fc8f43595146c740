//! Task list item class marker.
//!
//! comrak renders task items as a bare `<li>`. Each `TaskItem` node is
//! rendered here instead, with the class on its opening tag, and swapped
//! for an HTML block holding the result. Raw `<li>` markup written by the
//! author is a different node kind and is left alone.

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{Options, format_html};

use crate::error::ConvertError;

/// Class added to list items that hold a task checkbox.
pub const TASK_LIST_ITEM_CLASS: &str = "task-list-item";

const CHECKBOX: &str = "<input type=\"checkbox\" disabled=\"\" /> ";
const CHECKBOX_CHECKED: &str = "<input type=\"checkbox\" checked=\"\" disabled=\"\" /> ";

/// Renders every task item in the tree with the `task-list-item` class.
///
/// Runs after the other tree rewrites so highlighted code and diagrams
/// inside an item are kept. Nested task lists are rendered innermost
/// first.
///
/// Returns the number of items marked.
///
/// # Errors
///
/// Returns error if rendering an item's content fails.
pub(crate) fn render_task_items<'a>(
    root: &'a AstNode<'a>,
    options: &Options,
) -> Result<usize, ConvertError> {
    let nodes: Vec<_> = root.descendants().collect();
    let mut count = 0;

    // Pre-order reversed: children before their parents
    for node in nodes.into_iter().rev() {
        let checked = match &node.data.borrow().value {
            NodeValue::TaskItem(symbol) => symbol.is_some(),
            _ => continue,
        };

        let mut content = String::new();
        for child in node.children() {
            let mut out = Vec::new();
            format_html(child, options, &mut out)?;
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(std::str::from_utf8(&out)?);
        }

        let children: Vec<_> = node.children().collect();
        for child in children {
            child.detach();
        }

        node.data.borrow_mut().value = NodeValue::HtmlBlock(NodeHtmlBlock {
            block_type: 0,
            literal: item_html(checked, &content),
        });
        count += 1;
    }

    Ok(count)
}

/// Wraps rendered item content in a marked `<li>` with its checkbox.
///
/// In loose lists the checkbox goes inside the first paragraph.
fn item_html(checked: bool, content: &str) -> String {
    let checkbox = if checked { CHECKBOX_CHECKED } else { CHECKBOX };
    let content = match content.strip_prefix("<p>") {
        Some(rest) => format!("<p>{}{}", checkbox, rest),
        None => format!("{}{}", checkbox, content),
    };
    format!("<li class=\"{}\">{}</li>\n", TASK_LIST_ITEM_CLASS, content)
}

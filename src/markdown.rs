//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module provides markdown rendering using comrak with GFM extensions
//! (tables, strikethrough, autolinks, task lists, footnotes), class-based
//! syntax highlighting with syntect, a class marker on task list items and
//! Mermaid diagram blocks.

mod converter;
mod highlight;
mod mermaid;
mod tasklist;

pub use converter::Converter;
pub use highlight::{stylesheet, theme_names};
pub use tasklist::TASK_LIST_ITEM_CLASS;

//! Shared test utilities for integration tests.
//!
//! Provides helpers for provisioning the adapter and writing directive
//! files used across multiple test files.

#![allow(dead_code)]

use anyhow::Result;
use markdown_ex::{MarkdownEx, ProvisionedMarkdownEx};
use std::path::{Path, PathBuf};

/// Mermaid script location used by tests that enable diagrams.
pub const MERMAID_JS: &str = "https://cdn.example.com/mermaid/dist/mermaid.min.js";

/// Provisions the adapter from a directive block.
///
/// # Errors
///
/// Returns error if the directive does not parse
pub fn provision(directive: &str) -> Result<ProvisionedMarkdownEx> {
    Ok(MarkdownEx::from_directive(directive)?.provision())
}

/// Provisions the adapter with the test Mermaid script location.
///
/// # Errors
///
/// Returns error if the directive does not parse
pub fn provision_with_mermaid() -> Result<ProvisionedMarkdownEx> {
    provision(&format!("markdown_ex {{\n    mermaid_js {}\n}}\n", MERMAID_JS))
}

/// Writes file into directory and returns its path.
///
/// # Errors
///
/// Returns error if the file write fails
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, content)?;
    Ok(path)
}

//! Integration tests for markdown_ex.
//!
//! Tests configuration, provisioning, conversion and template function
//! registration through the public API.

mod common;

use anyhow::Result;
use markdown_ex::{
    ConfigError, FUNCTION_NAME, FunctionError, FunctionRegistry, MarkdownEx, TASK_LIST_ITEM_CLASS,
    Value,
};
use std::sync::Arc;

/// Tests task list items carry the class marker.
#[test]
fn test_task_list_items_marked() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;
    let markdown = "## Todo\n\n- [ ] write docs\n- [x] ship it\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    let marker = format!("<li class=\"{}\">", TASK_LIST_ITEM_CLASS);
    assert_eq!(html.matches(&marker).count(), 2, "{}", html);
    Ok(())
}

/// Tests diagram blocks reference the configured script.
#[test]
fn test_mermaid_configured() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision_with_mermaid()?;
    let markdown = "Flow:\n\n```mermaid\nflowchart LR\n  start --> stop\n```\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert!(html.contains("<pre class=\"mermaid\">"), "{}", html);
    assert!(
        html.contains(&format!("<script src=\"{}\"></script>", common::MERMAID_JS)),
        "Should reference script: {}",
        html
    );
    assert_eq!(html.matches("<script src=").count(), 1, "Script emitted once");
    Ok(())
}

/// Tests script is emitted once for several diagrams.
#[test]
fn test_mermaid_script_once() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision_with_mermaid()?;
    let markdown = "```mermaid\ngraph TD\n```\n\n```mermaid\npie\n```\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert_eq!(html.matches("<pre class=\"mermaid\">").count(), 2);
    assert_eq!(html.matches("<script src=").count(), 1);
    Ok(())
}

/// Tests diagram blocks degrade gracefully without a script location.
#[test]
fn test_mermaid_unconfigured() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("")?;
    let markdown = "```mermaid\ngraph TD\n  A-->B\n```\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert!(html.contains("<pre class=\"mermaid\">"), "{}", html);
    assert!(!html.contains("<script"), "No script reference: {}", html);
    Ok(())
}

/// Tests raw inline HTML is not escaped.
#[test]
fn test_unsafe_html_passthrough() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;
    let markdown = "Press <kbd>Enter</kbd> or <span style=\"color:red\">stop</span>.";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert!(html.contains("<kbd>Enter</kbd>"), "{}", html);
    assert!(html.contains("<span style=\"color:red\">stop</span>"), "{}", html);
    Ok(())
}

/// Tests raw code markup passes through byte for byte.
#[test]
fn test_raw_code_html_passthrough() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;
    let markdown = "<pre><code class=\"language-rust\"><b>bold</b> fn a() {}</code></pre>\n\
                    <pre>let x = 1 &lt; 2;</pre>\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert_eq!(html, markdown);
    Ok(())
}

/// Tests raw list and checkbox markup passes through byte for byte.
#[test]
fn test_raw_checkbox_html_passthrough() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;
    let markdown = "<ul>\n<li><input type=\"checkbox\"> raw</li>\n<li><p><input type=\"checkbox\" checked> done</p></li>\n</ul>\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert_eq!(html, markdown);
    Ok(())
}

/// Tests an unclosed raw code tag does not swallow later content.
#[test]
fn test_unclosed_raw_code_keeps_heading() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;
    let markdown = "Inline <code class=\"language-rust\">x\n\n# Heading\n\n```\n</code>\n```\n";

    // Act
    let html = markdown_ex.convert(&Value::from(markdown))?;

    // Assert
    assert!(html.contains("<h1>"), "Heading should render: {}", html);
    assert!(!html.contains("&lt;h1"), "Heading must not be escaped: {}", html);
    Ok(())
}

/// Tests empty input converts without error.
#[test]
fn test_empty_input() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision("markdown_ex")?;

    // Act
    let html = markdown_ex.convert(&Value::from(""))?;

    // Assert
    assert!(html.trim().is_empty(), "Empty input yields empty HTML: {:?}", html);
    Ok(())
}

/// Tests concurrent conversions do not share buffer contents.
#[test]
fn test_concurrent_conversions_independent() -> Result<()> {
    // Arrange
    let markdown_ex = Arc::new(common::provision("markdown_ex")?);
    let inputs: Vec<String> = (0..16)
        .map(|i| format!("Paragraph number {} with *emphasis* {}.", i, "x".repeat(i * 50)))
        .collect();
    let expected: Vec<String> = inputs
        .iter()
        .map(|input| markdown_ex.converter().render(input))
        .collect::<std::result::Result<_, _>>()?;

    // Act
    let outputs: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| {
                let markdown_ex = Arc::clone(&markdown_ex);
                scope.spawn(move || {
                    (0..20)
                        .map(|_| {
                            markdown_ex
                                .convert(&Value::from(input.as_str()))
                                .expect("Should convert")
                        })
                        .last()
                        .expect("At least one conversion")
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("Thread should not panic"))
            .collect()
    });

    // Assert
    assert_eq!(outputs, expected);
    Ok(())
}

/// Tests unrecognized keys fail configuration.
#[test]
fn test_unrecognized_key_fails() {
    // Arrange
    let directive = "markdown_ex {\n    mermaid_js /m.js\n    mermaid_theme dark\n}";

    // Act
    let result = MarkdownEx::from_directive(directive);

    // Assert
    let err = result.expect_err("Unrecognized key must fail");
    assert!(matches!(err, ConfigError::UnrecognizedKey { .. }));
    assert!(
        err.to_string().contains("mermaid_theme"),
        "Error should name the key: {}",
        err
    );
}

/// Tests mermaid_js without argument fails configuration.
#[test]
fn test_missing_argument_fails() {
    // Arrange
    let directive = "markdown_ex {\n    mermaid_js\n}";

    // Act
    let result = MarkdownEx::from_directive(directive);

    // Assert
    assert!(matches!(
        result,
        Err(ConfigError::MissingArgument { ref key, line: 2 }) if key == "mermaid_js"
    ));
}

/// Tests the function is reachable through the host registry.
#[test]
fn test_registry_dispatch() -> Result<()> {
    // Arrange
    let markdown_ex = common::provision_with_mermaid()?;
    let mut registry = FunctionRegistry::new();
    registry.register(&markdown_ex)?;

    // Act
    let html = registry.call(FUNCTION_NAME, &[Value::from("~~old~~ new")])?;
    let arity = registry.call(FUNCTION_NAME, &[]);

    // Assert
    assert!(html.contains("<del>old</del>"), "{}", html);
    assert!(matches!(arity, Err(FunctionError::Arity { got: 0, .. })));
    assert_eq!(registry.names(), vec![FUNCTION_NAME]);
    Ok(())
}

/// Tests a second adapter cannot register the same function name.
#[test]
fn test_registry_duplicate_adapter() -> Result<()> {
    // Arrange
    let first = common::provision("markdown_ex")?;
    let second = common::provision_with_mermaid()?;
    let mut registry = FunctionRegistry::new();
    registry.register(&first)?;

    // Act
    let result = registry.register(&second);

    // Assert
    assert!(matches!(result, Err(FunctionError::DuplicateFunction(_))));
    Ok(())
}

/// Tests adapters configured differently stay independent.
#[test]
fn test_instances_are_independent() -> Result<()> {
    // Arrange
    let with_script = common::provision_with_mermaid()?;
    let without_script = common::provision("markdown_ex")?;
    let markdown = Value::from("```mermaid\ngraph TD\n```\n");

    // Act
    let a = with_script.convert(&markdown)?;
    let b = without_script.convert(&markdown)?;

    // Assert
    assert!(a.contains("<script"));
    assert!(!b.contains("<script"));
    Ok(())
}

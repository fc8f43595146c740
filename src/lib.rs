//! Markdown template function with task list classes and Mermaid diagrams.

mod adapter;
mod config;
pub mod directive;
mod error;
mod markdown;
pub mod module;
pub mod pool;

pub use adapter::{MarkdownEx, ProvisionedMarkdownEx};
pub use config::{DIRECTIVE, MarkdownExConfig};
pub use error::{ConfigError, ConvertError, FunctionError};
pub use markdown::{Converter, TASK_LIST_ITEM_CLASS, stylesheet, theme_names};
pub use module::{
    CustomFunctions, FUNCTION_NAME, FunctionMap, FunctionRegistry, MODULE_ID, ModuleInfo,
    TemplateFunction, Value,
};
pub use pool::{BufferPool, PooledBuffer};

//! The `markdown_ex` template function adapter.
//!
//! Setup is two-phase. [`MarkdownEx`] holds the parsed configuration;
//! [`MarkdownEx::provision`] builds the converter once and yields a
//! [`ProvisionedMarkdownEx`] that serves conversions. The provisioned
//! adapter is immutable and cheap to clone, so it can be handed to every
//! request handler.

use std::sync::Arc;

use crate::config::MarkdownExConfig;
use crate::error::{ConfigError, ConvertError, FunctionError};
use crate::markdown::Converter;
use crate::module::{
    CustomFunctions, FUNCTION_NAME, FunctionMap, MODULE_ID, ModuleInfo, TemplateFunction, Value,
};
use crate::pool::BufferPool;

/// Configured, not yet provisioned, markdown template function module.
#[derive(Debug, Clone, Default)]
pub struct MarkdownEx {
    config: MarkdownExConfig,
}

impl MarkdownEx {
    /// Module identity of the adapter.
    pub fn module_info() -> ModuleInfo {
        ModuleInfo { id: MODULE_ID }
    }

    /// Creates adapter from an already built configuration.
    pub fn configure(config: MarkdownExConfig) -> Self {
        Self { config }
    }

    /// Creates adapter from a `markdown_ex` directive block.
    ///
    /// # Errors
    ///
    /// Returns error if the directive is malformed; see
    /// [`MarkdownExConfig::from_directive`].
    pub fn from_directive(source: &str) -> Result<Self, ConfigError> {
        MarkdownExConfig::from_directive(source).map(Self::configure)
    }

    /// Configuration this adapter was built from.
    pub fn config(&self) -> &MarkdownExConfig {
        &self.config
    }

    /// Builds the converter, using the process-wide buffer pool.
    pub fn provision(self) -> ProvisionedMarkdownEx {
        self.provision_with_pool(BufferPool::shared())
    }

    /// Builds the converter, borrowing conversion buffers from `pool`.
    pub fn provision_with_pool(self, pool: &'static BufferPool) -> ProvisionedMarkdownEx {
        tracing::debug!(
            mermaid_js = self.config.mermaid_js.as_deref(),
            "Provisioning markdown converter"
        );

        ProvisionedMarkdownEx {
            converter: Arc::new(Converter::new(&self.config)),
            pool,
        }
    }
}

/// Provisioned adapter serving `markdown_ex` calls.
#[derive(Debug, Clone)]
pub struct ProvisionedMarkdownEx {
    converter: Arc<Converter>,
    pool: &'static BufferPool,
}

impl ProvisionedMarkdownEx {
    /// Converts a template value holding markdown to HTML.
    ///
    /// The value is coerced to a string first. The conversion runs in a
    /// buffer borrowed from the pool, which is returned before this
    /// function returns, also on error.
    ///
    /// # Errors
    ///
    /// Returns the converter's error unchanged; no partial output is
    /// produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_ex::{MarkdownEx, Value};
    ///
    /// let markdown_ex = MarkdownEx::default().provision();
    /// let html = markdown_ex.convert(&Value::from("- [x] done"))?;
    /// assert!(html.contains("<li class=\"task-list-item\">"));
    /// # Ok::<(), markdown_ex::ConvertError>(())
    /// ```
    pub fn convert(&self, input: &Value) -> Result<String, ConvertError> {
        let source = input.to_template_string();

        let mut buf = self.pool.get();
        self.converter.convert(&source, &mut buf)?;

        Ok(std::str::from_utf8(&buf)?.to_owned())
    }

    /// Shared converter backing the template function.
    pub fn converter(&self) -> &Converter {
        &self.converter
    }
}

impl TemplateFunction for ProvisionedMarkdownEx {
    fn call(&self, args: &[Value]) -> Result<String, FunctionError> {
        let [input] = args else {
            return Err(FunctionError::Arity {
                name: FUNCTION_NAME,
                expected: 1,
                got: args.len(),
            });
        };

        Ok(self.convert(input)?)
    }
}

impl CustomFunctions for ProvisionedMarkdownEx {
    fn module_info(&self) -> ModuleInfo {
        MarkdownEx::module_info()
    }

    fn custom_template_functions(&self) -> FunctionMap {
        let mut functions = FunctionMap::new();
        functions.insert(
            FUNCTION_NAME,
            Arc::new(self.clone()) as Arc<dyn TemplateFunction>,
        );
        functions
    }
}

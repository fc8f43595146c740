//! Host template system surface.
//!
//! A host discovers template helpers through [`CustomFunctions`] providers
//! and calls them by name through a [`FunctionRegistry`]. Arguments arrive
//! as dynamically typed [`Value`]s.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::FunctionError;

/// Identifier of the markdown template function module.
pub const MODULE_ID: &str = "http.handlers.templates.functions.markdown_ex";

/// Name the conversion function is registered under.
pub const FUNCTION_NAME: &str = "markdown_ex";

/// Module identity within the host's plugin namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub id: &'static str,
}

impl ModuleInfo {
    /// Last dot-separated label of the id.
    pub fn name(&self) -> &'static str {
        self.id.rsplit_once('.').map_or(self.id, |(_, name)| name)
    }

    /// Everything before the last label; empty for single-label ids.
    pub fn namespace(&self) -> &'static str {
        self.id.rsplit_once('.').map_or("", |(ns, _)| ns)
    }
}

/// Dynamically typed template argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Value {
    /// Coerces the value to a string the way template helpers expect.
    ///
    /// Strings are used verbatim and bytes are decoded as UTF-8 with
    /// replacement characters. Null becomes the empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_ex::Value;
    ///
    /// assert_eq!(Value::from("# Hi").to_template_string(), "# Hi");
    /// assert_eq!(Value::Int(42).to_template_string(), "42");
    /// assert_eq!(Value::Null.to_template_string(), "");
    /// ```
    pub fn to_template_string(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(f.to_string()),
            Value::String(s) => Cow::Borrowed(s),
            Value::Bytes(bytes) => String::from_utf8_lossy(bytes),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_template_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Bytes(bytes.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Function callable from template text.
pub trait TemplateFunction: Send + Sync {
    /// Calls the function with positional arguments.
    fn call(&self, args: &[Value]) -> Result<String, FunctionError>;
}

/// Function names mapped to implementations.
pub type FunctionMap = HashMap<&'static str, Arc<dyn TemplateFunction>>;

/// Module that contributes template functions.
pub trait CustomFunctions {
    /// Module identity used when registering with the host.
    fn module_info(&self) -> ModuleInfo;

    /// Functions this module exposes to templates.
    fn custom_template_functions(&self) -> FunctionMap;
}

/// Name-indexed set of template functions.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: FunctionMap,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every function of `provider`.
    ///
    /// Registration is all-or-nothing: if any name is already taken,
    /// nothing from `provider` is added.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::DuplicateFunction`] naming the first
    /// clashing function.
    pub fn register(&mut self, provider: &dyn CustomFunctions) -> Result<(), FunctionError> {
        let functions = provider.custom_template_functions();

        if let Some(name) = functions
            .keys()
            .find(|name| self.functions.contains_key(*name))
        {
            return Err(FunctionError::DuplicateFunction(name.to_string()));
        }

        let info = provider.module_info();
        tracing::info!(
            module = info.id,
            functions = functions.len(),
            "Registered template functions"
        );
        self.functions.extend(functions);
        Ok(())
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn TemplateFunction>> {
        self.functions.get(name)
    }

    /// Calls the function registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns error if no such function exists or the call fails.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<String, FunctionError> {
        let function = self
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))?;
        function.call(args)
    }

    /// Registered function names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names())
            .finish()
    }
}

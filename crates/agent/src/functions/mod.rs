//! Function handlers and the registry that dispatches to them

pub mod spotify;

pub use spotify::{SpotifyAction, SpotifyActionHandler, SpotifyModule};

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use vox_provider::{FunctionCallRequest, FunctionSpec};

use crate::{AgentError, Result};

/// Something the completion service can ask us to run
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    fn spec(&self) -> FunctionSpec;

    /// Run with arguments already bound against `spec()`. `None` means the
    /// handler produced no result.
    async fn call(&self, args: BoundArguments) -> Result<Option<Value>>;
}

/// Arguments matched to a function's declared parameters by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArguments {
    values: Vec<(String, Value)>,
}

impl BoundArguments {
    /// Value of a named parameter; absent optional parameters yield `None`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .filter(|v| !v.is_null())
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Values in parameter declaration order
    pub fn positional(&self) -> Vec<&Value> {
        self.values.iter().map(|(_, v)| v).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Bind decoded arguments to the function's parameters by name.
///
/// Missing required parameters are an error, missing optional ones bind to
/// null, undeclared keys are dropped.
pub fn bind_arguments(spec: &FunctionSpec, arguments: &Map<String, Value>) -> Result<BoundArguments> {
    let mut values = Vec::with_capacity(spec.parameters.len());

    for param in &spec.parameters {
        match arguments.get(&param.name) {
            Some(value) => values.push((param.name.clone(), value.clone())),
            None if param.required => {
                return Err(AgentError::InvalidArguments {
                    function: spec.name.clone(),
                    reason: format!("missing required parameter '{}'", param.name),
                })
            }
            None => values.push((param.name.clone(), Value::Null)),
        }
    }

    for key in arguments.keys() {
        if !spec.parameters.iter().any(|p| &p.name == key) {
            debug!("◆ {}: ignoring undeclared argument '{}'", spec.name, key);
        }
    }

    Ok(BoundArguments { values })
}

/// Name-keyed handler table, kept in registration order
pub struct FunctionRegistry {
    handlers: Vec<Box<dyn FunctionHandler>>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a handler. A handler with the same name replaces the old one.
    pub fn register<T: FunctionHandler + 'static>(&mut self, handler: T) {
        let name = handler.spec().name;
        match self.index.get(&name) {
            Some(&slot) => self.handlers[slot] = Box::new(handler),
            None => {
                self.index.insert(name, self.handlers.len());
                self.handlers.push(Box::new(handler));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn FunctionHandler> {
        self.index.get(name).map(|&slot| self.handlers[slot].as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.spec().name).collect()
    }

    /// Declarations to advertise, in registration order
    pub fn specs(&self) -> Vec<FunctionSpec> {
        self.handlers.iter().map(|h| h.spec()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Look up, bind, and invoke the requested function
    pub async fn dispatch(&self, call: &FunctionCallRequest) -> Result<Option<Value>> {
        let handler = self
            .get(&call.name)
            .ok_or_else(|| AgentError::UnknownFunction(call.name.clone()))?;

        let args = bind_arguments(&handler.spec(), &call.arguments)?;
        debug!("◆ dispatching {} with {} argument(s)", call.name, args.len());
        handler.call(args).await
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Agent - one completion round-trip against a registry

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use vox_provider::{ChatParams, CompletionReply, Provider};

use crate::context::ContextBuilder;
use crate::functions::FunctionRegistry;
use crate::{AgentError, Result};

/// How an agent resolved a prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The model answered directly
    Answered(String),
    /// The model picked a function and it ran
    Dispatched {
        function: String,
        result: Option<Value>,
    },
}

/// Classifies a prompt against its own registry and runs the chosen function.
///
/// Handlers may own agents themselves, so a domain can delegate to a narrower
/// sub-agent to any depth.
pub struct Agent<P: Provider> {
    name: String,
    provider: Arc<P>,
    model: String,
    system_prompt: String,
    registry: FunctionRegistry,
}

impl<P: Provider> Agent<P> {
    pub fn new(
        name: impl Into<String>,
        provider: Arc<P>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        registry: FunctionRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            provider,
            model: model.into(),
            system_prompt: system_prompt.into(),
            registry,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Ask the model about `prompt`, then run whatever it selected
    pub async fn resolve(&self, prompt: &str) -> Result<Resolution> {
        if prompt.trim().is_empty() {
            return Err(AgentError::EmptyPrompt);
        }

        debug!("◆ [{}] resolving: {}", self.name, prompt);

        let params = ChatParams {
            model: self.model.clone(),
            messages: ContextBuilder::build_messages(&self.system_prompt, prompt),
            functions: self.registry.specs(),
        };

        match self.provider.chat(params).await? {
            CompletionReply::Content(text) => {
                info!("◆ [{}] answered directly", self.name);
                Ok(Resolution::Answered(text))
            }
            CompletionReply::FunctionCall(call) => {
                info!("◆ [{}] selected {}", self.name, call.name);
                let result = self.registry.dispatch(&call).await?;
                Ok(Resolution::Dispatched {
                    function: call.name,
                    result,
                })
            }
        }
    }
}

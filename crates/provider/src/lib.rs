//! Completion client
//!
//! Chat-completion access with legacy function calling: declared functions go
//! out, and either a text reply or a single function call comes back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use thiserror::Error;
use tracing::{debug, trace};

pub mod openai;

pub use openai::OpenAiProvider;

/// Completion service errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("{status}{}{}", status_reason(.reason), api_detail(.message))]
    Status {
        status: u16,
        reason: String,
        message: Option<String>,
    },

    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no choices")]
    InvalidResponse,

    #[error("arguments for {function} are not a JSON object: {reason}")]
    InvalidArguments { function: String, reason: String },

    #[error("response carried neither content nor a function call")]
    EmptyReply,
}

fn status_reason(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {}", reason)
    }
}

fn api_detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Request(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// One role-tagged chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One declared parameter of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub kind: String,
    pub description: String,
    pub required: bool,
}

impl ParameterSpec {
    /// Required string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: "string".to_string(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Function declaration advertised to the completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
}

impl FunctionSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// JSON schema of the parameters object
    pub fn parameters_schema(&self) -> Value {
        let mut props = Map::new();
        let mut required = Vec::new();

        for param in &self.parameters {
            props.insert(
                param.name.clone(),
                serde_json::json!({
                    "type": param.kind,
                    "description": param.description
                }),
            );
            if param.required {
                required.push(param.name.clone());
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }

    /// Wire form: `{name, description, parameters}`
    pub fn to_wire(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "parameters": self.parameters_schema()
        })
    }
}

/// Function the model asked to invoke, arguments already decoded
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCallRequest {
    pub name: String,
    pub arguments: Map<String, Value>,
}

impl FunctionCallRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Decode the wire `arguments` string. A blank string means no arguments.
    pub fn from_wire(name: impl Into<String>, raw_arguments: &str) -> Result<Self> {
        let name = name.into();
        if raw_arguments.trim().is_empty() {
            return Ok(Self::new(name, Map::new()));
        }

        let value: Value =
            serde_json::from_str(raw_arguments).map_err(|e| ProviderError::InvalidArguments {
                function: name.clone(),
                reason: e.to_string(),
            })?;

        match value {
            Value::Object(arguments) => Ok(Self::new(name, arguments)),
            other => Err(ProviderError::InvalidArguments {
                function: name,
                reason: format!("expected an object, got {}", other),
            }),
        }
    }
}

/// What the completion service answered
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionReply {
    /// Direct, non-empty text answer
    Content(String),
    /// Delegated answer
    FunctionCall(FunctionCallRequest),
}

impl CompletionReply {
    pub fn content(&self) -> Option<&str> {
        match self {
            CompletionReply::Content(text) => Some(text),
            CompletionReply::FunctionCall(_) => None,
        }
    }

    pub fn function_call(&self) -> Option<&FunctionCallRequest> {
        match self {
            CompletionReply::FunctionCall(call) => Some(call),
            CompletionReply::Content(_) => None,
        }
    }
}

/// Request parameters
#[derive(Debug, Clone, Default)]
pub struct ChatParams {
    pub model: String,
    pub messages: Vec<Message>,
    pub functions: Vec<FunctionSpec>,
}

impl ChatParams {
    /// Wire body: `{model, messages, functions?}`
    pub fn to_body(&self) -> Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": self.messages,
        });

        if !self.functions.is_empty() {
            let functions: Vec<Value> = self.functions.iter().map(FunctionSpec::to_wire).collect();
            body["functions"] = Value::Array(functions);
        }

        body
    }

    /// System prompt of the request, if any
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == "system")
            .map(|m| m.content.as_str())
    }

    /// Last user message of the request, if any
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
    }
}

/// Parse a chat-completion response body
pub fn parse_reply(json: &Value) -> Result<CompletionReply> {
    let choice = json["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .ok_or(ProviderError::InvalidResponse)?;
    let message = &choice["message"];

    if let Some(call) = message["function_call"].as_object() {
        let name = call.get("name").and_then(Value::as_str).unwrap_or_default();
        let raw = match call.get("arguments") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        trace!("◆ function_call {} {}", name, raw);
        return Ok(CompletionReply::FunctionCall(FunctionCallRequest::from_wire(
            name, &raw,
        )?));
    }

    match message["content"].as_str() {
        Some(text) if !text.is_empty() => Ok(CompletionReply::Content(text.to_string())),
        _ => {
            debug!("◆ reply without content or function call");
            Err(ProviderError::EmptyReply)
        }
    }
}

/// Completion service backend
#[async_trait]
pub trait Provider: Send + Sync {
    async fn chat(&self, params: ChatParams) -> Result<CompletionReply>;
    fn default_model(&self) -> String;
    fn is_configured(&self) -> bool;
}

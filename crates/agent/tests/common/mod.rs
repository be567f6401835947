//! Common test utilities for agent tests
#![allow(dead_code)]

use async_trait::async_trait;
use mockall::mock;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};

use vox_agent::{BoundArguments, FunctionHandler};
use vox_provider::{
    ChatParams, CompletionReply, FunctionCallRequest, FunctionSpec, ParameterSpec, Provider,
    ProviderError,
};

mock! {
    pub Provider {}

    #[async_trait]
    impl Provider for Provider {
        async fn chat(&self, params: ChatParams) -> Result<CompletionReply, ProviderError>;
        fn default_model(&self) -> String;
        fn is_configured(&self) -> bool;
    }
}

/// Phrases that tell the three kinds of requests apart
pub const DISPATCHER_MARK: &str = "You can answer general questions";
pub const SPOTIFY_MARK: &str = "You are a Spotify assistant";
pub const SUMMARY_MARK: &str = "result of function calls";

pub fn system_has(params: &ChatParams, mark: &str) -> bool {
    params.system_prompt().map(|s| s.contains(mark)).unwrap_or(false)
}

pub fn content(text: &str) -> CompletionReply {
    CompletionReply::Content(text.to_string())
}

pub fn call(name: &str, args: Value) -> CompletionReply {
    let arguments: Map<String, Value> = args.as_object().cloned().unwrap_or_default();
    CompletionReply::FunctionCall(FunctionCallRequest::new(name, arguments))
}

/// Handler that records every invocation and answers with a fixed result
#[derive(Clone)]
pub struct RecordingHandler {
    spec: FunctionSpec,
    result: Option<Value>,
    pub calls: Arc<Mutex<Vec<BoundArguments>>>,
}

impl RecordingHandler {
    pub fn new(spec: FunctionSpec, result: Option<Value>) -> Self {
        Self {
            spec,
            result,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `echo` with one required string parameter `x`
    pub fn echo(result: Option<Value>) -> Self {
        Self::new(
            FunctionSpec::new("echo", "Echo a value")
                .with_parameter(ParameterSpec::string("x", "Value to echo")),
            result,
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl FunctionHandler for RecordingHandler {
    fn spec(&self) -> FunctionSpec {
        self.spec.clone()
    }

    async fn call(&self, args: BoundArguments) -> vox_agent::Result<Option<Value>> {
        self.calls.lock().unwrap().push(args);
        Ok(self.result.clone())
    }
}

//! Orchestrator - the full prompt → function → summary pipeline

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use vox_config::Config;
use vox_provider::{CompletionReply, Provider, ProviderError};

use crate::agent::{Agent, Resolution};
use crate::context::ContextBuilder;
use crate::functions::{FunctionRegistry, SpotifyModule};
use crate::summarizer::Summarizer;
use crate::{AgentError, Result};

/// Successful end states of one run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The model answered without calling anything
    Answered(String),
    /// A function ran and its result was put into words
    Summarized { function: String, reply: String },
}

impl Outcome {
    /// The line printed for this outcome
    pub fn line(&self) -> String {
        match self {
            Outcome::Answered(text) => format!("Response: {}", text),
            Outcome::Summarized { reply, .. } => format!("Final response: {}", reply),
        }
    }
}

/// Serialized form handed to the summarizer; an absent result is `null`
pub fn encode_result(result: Option<&Value>) -> String {
    result.unwrap_or(&Value::Null).to_string()
}

pub struct Orchestrator<P: Provider> {
    agent: Agent<P>,
    summarizer: Summarizer<P>,
}

impl<P: Provider + 'static> Orchestrator<P> {
    pub fn new(agent: Agent<P>, summarizer: Summarizer<P>) -> Self {
        Self { agent, summarizer }
    }

    /// Standard wiring: a top-level agent offering the Spotify domain
    pub fn with_defaults(provider: Arc<P>, model: impl Into<String>, context: ContextBuilder) -> Self {
        let model = model.into();

        let mut registry = FunctionRegistry::new();
        registry.register(SpotifyModule::new(provider.clone(), model.clone(), &context));

        let agent = Agent::new(
            "dispatcher",
            provider.clone(),
            model.clone(),
            context.dispatcher_prompt(),
            registry,
        );
        let summarizer = Summarizer::new(provider, model, context);

        Self::new(agent, summarizer)
    }

    pub fn from_config(provider: P, config: &Config) -> Self {
        Self::with_defaults(
            Arc::new(provider),
            config.model(),
            ContextBuilder::from_config(config),
        )
    }

    pub fn agent(&self) -> &Agent<P> {
        &self.agent
    }

    /// Run one prompt end to end
    pub async fn run(&self, prompt: &str) -> Result<Outcome> {
        match self.agent.resolve(prompt).await? {
            Resolution::Answered(text) => Ok(Outcome::Answered(text)),
            Resolution::Dispatched { function, result } => {
                let encoded = encode_result(result.as_ref());
                debug!("◆ {} returned {}", function, encoded);

                match self.summarizer.summarize(prompt, &encoded).await {
                    Ok(CompletionReply::Content(reply)) => {
                        Ok(Outcome::Summarized { function, reply })
                    }
                    Ok(CompletionReply::FunctionCall(call)) => {
                        warn!("◆ summarizer asked for {} instead of answering", call.name);
                        Err(AgentError::Unsummarizable { function })
                    }
                    Err(AgentError::Provider(ProviderError::EmptyReply)) => {
                        Err(AgentError::Unsummarizable { function })
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_lines() {
        assert_eq!(Outcome::Answered("X".to_string()).line(), "Response: X");
        assert_eq!(
            Outcome::Summarized {
                function: "spotify".to_string(),
                reply: "Playing now".to_string()
            }
            .line(),
            "Final response: Playing now"
        );
    }

    #[test]
    fn test_encode_absent_result() {
        assert_eq!(encode_result(None), "null");
    }

    #[test]
    fn test_encode_result_round_trip() {
        let result = json!({
            "function": "play",
            "status": "done",
            "currentTrack": {"name": "Song name", "artist": "Artist name", "album": "Album name"}
        });
        let encoded = encode_result(Some(&result));
        let decoded: Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, result);
    }
}

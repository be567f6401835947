//! Context builder for assembling the assistant's prompts

use vox_config::Config;
use vox_provider::Message;

/// Fallback every prompt tells the model to use when it cannot help
pub const FALLBACK_REPLY: &str = "Sorry, I'm not able to do that.";

/// Builds system prompts and message lists for each agent level
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    household: Option<String>,
    language: Option<String>,
}

impl ContextBuilder {
    pub fn new(household: Option<String>, language: Option<String>) -> Self {
        Self {
            household,
            language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.household(), config.language())
    }

    fn home(&self) -> String {
        match &self.household {
            Some(name) => format!("{}'s home", name),
            None => "the home".to_string(),
        }
    }

    fn listener(&self) -> String {
        self.household
            .clone()
            .unwrap_or_else(|| "the user".to_string())
    }

    /// Language phrase interpolated into the summary prompts
    pub fn language(&self) -> String {
        self.language
            .clone()
            .unwrap_or_else(|| "the same language as the request".to_string())
    }

    /// Top-level dispatcher prompt
    pub fn dispatcher_prompt(&self) -> String {
        format!(
            "You are a helpful assistant for {home}. The only way {who} will interact with you \
             is by voice, so never say sentences that take more than 15 seconds to speak. \
             You can answer general questions. If the user asks for a specific task that \
             requires an action, it must be available in the functions; otherwise answer \
             `{fallback}`",
            home = self.home(),
            who = self.listener(),
            fallback = FALLBACK_REPLY,
        )
    }

    /// Spotify sub-agent prompt
    pub fn spotify_prompt(&self) -> String {
        format!(
            "You are a Spotify assistant for {home} in a multi-agent environment. \
             I'll give you the user request and you'll have to trigger the right function. \
             If you don't know how to handle the request, answer `{fallback}`",
            home = self.home(),
            fallback = FALLBACK_REPLY,
        )
    }

    /// Summarizer system prompt
    pub fn summary_prompt(&self) -> String {
        format!(
            "You are a helpful assistant for {home} that responds in {lang}, it's important. \
             The only way {who} will interact with you is by voice, so never say sentences \
             that take more than 15 seconds to speak. I'll give you the result of function \
             calls. Based on the result, answer the user. If you don't know how to handle \
             the request, answer \"{fallback}\"",
            home = self.home(),
            lang = self.language(),
            who = self.listener(),
            fallback = FALLBACK_REPLY,
        )
    }

    /// Summarizer user message carrying the original prompt and the result
    pub fn summary_request(&self, original_prompt: &str, function_result: &str) -> String {
        format!(
            "originalPrompt was {} and functionResult was {}. I need the answer in {}.",
            original_prompt,
            function_result,
            self.language()
        )
    }

    /// System prompt followed by the user prompt
    pub fn build_messages(system_prompt: &str, user_prompt: &str) -> Vec<Message> {
        vec![Message::system(system_prompt), Message::user(user_prompt)]
    }
}

//! Turns a function result into a short spoken reply

use std::sync::Arc;
use tracing::debug;

use vox_provider::{ChatParams, CompletionReply, Provider};

use crate::context::ContextBuilder;
use crate::Result;

pub struct Summarizer<P: Provider> {
    provider: Arc<P>,
    model: String,
    context: ContextBuilder,
}

impl<P: Provider> Summarizer<P> {
    pub fn new(provider: Arc<P>, model: impl Into<String>, context: ContextBuilder) -> Self {
        Self {
            provider,
            model: model.into(),
            context,
        }
    }

    /// Second completion round: no functions, just the original prompt and
    /// the serialized result.
    pub async fn summarize(
        &self,
        original_prompt: &str,
        function_result: &str,
    ) -> Result<CompletionReply> {
        debug!("◆ summarizing result: {}", function_result);

        let params = ChatParams {
            model: self.model.clone(),
            messages: ContextBuilder::build_messages(
                &self.context.summary_prompt(),
                &self.context.summary_request(original_prompt, function_result),
            ),
            functions: Vec::new(),
        };

        Ok(self.provider.chat(params).await?)
    }
}

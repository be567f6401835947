//! OpenAI chat-completions backend

use crate::*;
use reqwest::Client;
use std::time::Duration;

/// Default API base
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI-compatible completion client
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    api_base: String,
    default_model: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        api_base: Option<String>,
        default_model: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(ProviderError::Request)?;

        let api_base = api_base
            .map(|b| b.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base,
            default_model: default_model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn chat(&self, mut params: ChatParams) -> Result<CompletionReply> {
        if params.model.is_empty() {
            params.model = self.default_model.clone();
        }

        let url = self.endpoint();
        trace!(
            "◆ POST {} ({} messages, {} functions)",
            url,
            params.messages.len(),
            params.functions.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&params.to_body())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|json| json["error"]["message"].as_str().map(str::to_string));
            return Err(ProviderError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                message,
            });
        }

        let json: Value = serde_json::from_str(&text)?;
        let reply = parse_reply(&json)?;

        debug!(
            "◆ reply: {}",
            match &reply {
                CompletionReply::Content(_) => "content".to_string(),
                CompletionReply::FunctionCall(call) => format!("function_call {}", call.name),
            }
        );

        Ok(reply)
    }

    fn default_model(&self) -> String {
        self.default_model.clone()
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

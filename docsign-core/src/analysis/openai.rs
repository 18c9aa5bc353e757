//! OpenAI chat-completions provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    analyze_prompt, compliance_prompt, parse_json_reply, suggestions_prompt, summary_prompt,
    AnalysisProvider, AnalysisResult, ComplianceResult, SYSTEM_PROMPT,
};
use crate::error::{DocSignError, Result};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Provider backed by the OpenAI chat completions API
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a compatible endpoint (proxy, gateway)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DocSignError::provider(format!("Falha ao chamar OpenAI: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DocSignError::provider(format!(
                "OpenAI retornou {status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| {
                DocSignError::provider(format!("Resposta inválida da OpenAI: {}", e.without_url()))
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DocSignError::provider("OpenAI não retornou conteúdo"))
    }
}

#[async_trait]
impl AnalysisProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn analyze_document(&self, content: &str) -> Result<AnalysisResult> {
        let reply = self.complete(&analyze_prompt(content)).await?;
        parse_json_reply(&reply)
    }

    async fn generate_summary(&self, content: &str) -> Result<String> {
        let reply = self.complete(&summary_prompt(content)).await?;
        Ok(reply.trim().to_string())
    }

    async fn suggest_improvements(&self, content: &str) -> Result<Vec<String>> {
        let reply = self.complete(&suggestions_prompt(content)).await?;
        parse_json_reply(&reply)
    }

    async fn check_compliance(
        &self,
        content: &str,
        rules: Option<&[String]>,
    ) -> Result<ComplianceResult> {
        let reply = self.complete(&compliance_prompt(content, rules)).await?;
        parse_json_reply(&reply)
    }
}

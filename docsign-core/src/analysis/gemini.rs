//! Google Gemini provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{
    analyze_prompt, compliance_prompt, parse_json_reply, suggestions_prompt, summary_prompt,
    AnalysisProvider, AnalysisResult, ComplianceResult, SYSTEM_PROMPT,
};
use crate::error::{DocSignError, Result};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Provider backed by the Gemini `generateContent` API
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DocSignError::provider(format!("Falha ao chamar Gemini: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DocSignError::provider(format!(
                "Gemini retornou {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| {
                DocSignError::provider(format!("Resposta inválida do Gemini: {}", e.without_url()))
            })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DocSignError::provider("Gemini não retornou conteúdo"));
        }
        Ok(text)
    }
}

#[async_trait]
impl AnalysisProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn analyze_document(&self, content: &str) -> Result<AnalysisResult> {
        let reply = self.generate(&analyze_prompt(content)).await?;
        parse_json_reply(&reply)
    }

    async fn generate_summary(&self, content: &str) -> Result<String> {
        let reply = self.generate(&summary_prompt(content)).await?;
        Ok(reply.trim().to_string())
    }

    async fn suggest_improvements(&self, content: &str) -> Result<Vec<String>> {
        let reply = self.generate(&suggestions_prompt(content)).await?;
        parse_json_reply(&reply)
    }

    async fn check_compliance(
        &self,
        content: &str,
        rules: Option<&[String]>,
    ) -> Result<ComplianceResult> {
        let reply = self.generate(&compliance_prompt(content, rules)).await?;
        parse_json_reply(&reply)
    }
}

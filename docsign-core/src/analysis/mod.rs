//! Text-analysis providers
//!
//! The dispatcher talks to an [`AnalysisProvider`] for the four analysis tools.
//! Variants:
//!
//! - [`LocalAnalysisProvider`]: deterministic stand-in, no credential needed
//! - [`OpenAiProvider`]: OpenAI chat completions
//! - [`GeminiProvider`]: Google Gemini `generateContent`
//!
//! [`ProviderCache`] selects and memoizes one of them from [`ProviderConfig`].

mod gemini;
mod local;
mod openai;
mod provider;

pub use gemini::GeminiProvider;
pub use local::LocalAnalysisProvider;
pub use openai::OpenAiProvider;
pub use provider::{create_provider, ProviderCache, ProviderConfig, ProviderKind};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DocSignError, Result};

/// Risk level assigned by an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Result of `analyze_document`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub key_points: Vec<String>,
    pub risk_level: RiskLevel,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_reading_time: Option<u32>,
}

/// Result of `check_document_compliance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub compliant: bool,
    pub issues: Vec<String>,
}

/// Analysis provider interface
///
/// Every operation may suspend on network I/O and may fail; the dispatcher
/// turns failures into error envelopes.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name (for logging/debugging)
    fn name(&self) -> &str;

    /// Full analysis: summary, key points, risk and suggestions
    async fn analyze_document(&self, content: &str) -> Result<AnalysisResult>;

    /// Short prose summary
    async fn generate_summary(&self, content: &str) -> Result<String>;

    /// Improvement suggestions
    async fn suggest_improvements(&self, content: &str) -> Result<Vec<String>>;

    /// Check content against the given rules, or the provider's defaults
    async fn check_compliance(
        &self,
        content: &str,
        rules: Option<&[String]>,
    ) -> Result<ComplianceResult>;
}

// ---------------------------------------------------------------------------
// Prompts shared by the network-backed providers
// ---------------------------------------------------------------------------

pub(crate) const SYSTEM_PROMPT: &str = "Você é um assistente jurídico especializado em \
análise de documentos para assinatura eletrônica. Responda sempre em português.";

pub(crate) fn analyze_prompt(content: &str) -> String {
    format!(
        "Analise o documento abaixo e responda APENAS com um JSON no formato \
{{\"summary\": string, \"keyPoints\": string[], \"riskLevel\": \"low\"|\"medium\"|\"high\", \
\"suggestions\": string[], \"estimatedReadingTime\": number}}.\n\nDocumento:\n{content}"
    )
}

pub(crate) fn summary_prompt(content: &str) -> String {
    format!("Resuma o documento abaixo em até 3 frases.\n\nDocumento:\n{content}")
}

pub(crate) fn suggestions_prompt(content: &str) -> String {
    format!(
        "Sugira melhorias para o documento abaixo e responda APENAS com um array JSON \
de strings.\n\nDocumento:\n{content}"
    )
}

pub(crate) fn compliance_prompt(content: &str, rules: Option<&[String]>) -> String {
    let rules = match rules {
        Some(rules) if !rules.is_empty() => rules
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => "- boas práticas gerais de contratos".to_string(),
    };
    format!(
        "Verifique se o documento abaixo atende às regras listadas e responda APENAS \
com um JSON no formato {{\"compliant\": boolean, \"issues\": string[]}}.\n\n\
Regras:\n{rules}\n\nDocumento:\n{content}"
    )
}

/// Parse a JSON value out of a model's free-text reply
///
/// Models often wrap JSON in Markdown fences or surround it with prose; this
/// takes the outermost `{...}` or `[...]` span.
pub(crate) fn parse_json_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let trimmed = reply.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    let start = trimmed.find(['{', '[']);
    let end = trimmed.rfind(['}', ']']);
    match (start, end) {
        (Some(start), Some(end)) if start < end => serde_json::from_str(&trimmed[start..=end])
            .map_err(|e| DocSignError::provider(format!("Resposta inválida do provedor: {e}"))),
        _ => Err(DocSignError::provider(
            "Resposta inválida do provedor: nenhum JSON encontrado",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_reply_plain() {
        let result: ComplianceResult =
            parse_json_reply(r#"{"compliant": true, "issues": []}"#).unwrap();
        assert!(result.compliant);
    }

    #[test]
    fn test_parse_json_reply_fenced() {
        let reply = "Claro! Aqui está:\n```json\n[\"Adicionar cláusula de foro\"]\n```";
        let result: Vec<String> = parse_json_reply(reply).unwrap();
        assert_eq!(result, vec!["Adicionar cláusula de foro"]);
    }

    #[test]
    fn test_parse_json_reply_garbage() {
        let err = parse_json_reply::<Vec<String>>("não sei").unwrap_err();
        assert!(err.to_string().contains("nenhum JSON"));
    }

    #[test]
    fn test_analysis_result_wire_shape() {
        let result = AnalysisResult {
            summary: "s".into(),
            key_points: vec!["k".into()],
            risk_level: RiskLevel::Medium,
            suggestions: vec![],
            estimated_reading_time: Some(2),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["riskLevel"], "medium");
        assert_eq!(json["keyPoints"][0], "k");
        assert_eq!(json["estimatedReadingTime"], 2);
    }

    #[test]
    fn test_compliance_prompt_lists_rules() {
        let rules = vec!["LGPD".to_string(), "foro".to_string()];
        let prompt = compliance_prompt("conteúdo", Some(&rules));
        assert!(prompt.contains("- LGPD\n- foro"));
    }
}

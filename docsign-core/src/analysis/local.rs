//! Deterministic stand-in provider
//!
//! Used when no vendor credential is configured. Answers are derived from the
//! content with simple text rules, so the same input always yields the same
//! output.

use async_trait::async_trait;

use super::{AnalysisProvider, AnalysisResult, ComplianceResult, RiskLevel};
use crate::error::Result;

/// Words per minute used for the reading-time estimate
const WORDS_PER_MINUTE: usize = 200;

/// Maximum characters kept in a summary
const SUMMARY_MAX_CHARS: usize = 280;

/// Minimum content length before the default rules flag it as too short
const MIN_CONTENT_CHARS: usize = 50;

const HIGH_RISK_TERMS: &[&str] = &[
    "multa",
    "penalidade",
    "rescisão",
    "indenização",
    "exclusividade",
    "irrevogável",
];

const MEDIUM_RISK_TERMS: &[&str] = &["prazo", "pagamento", "confidencial", "renovação", "garantia"];

/// Deterministic analysis provider
#[derive(Debug, Clone, Default)]
pub struct LocalAnalysisProvider;

impl LocalAnalysisProvider {
    pub fn new() -> Self {
        Self
    }

    fn sentences(content: &str) -> Vec<String> {
        content
            .split(['.', '!', '?', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn summary(content: &str) -> String {
        let sentences = Self::sentences(content);
        let mut summary = sentences
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(". ");
        if summary.chars().count() > SUMMARY_MAX_CHARS {
            summary = summary.chars().take(SUMMARY_MAX_CHARS).collect::<String>();
            summary.push_str("...");
        } else if !summary.is_empty() {
            summary.push('.');
        }
        if summary.is_empty() {
            "Documento sem conteúdo para resumir.".to_string()
        } else {
            summary
        }
    }

    fn risk_level(content: &str) -> RiskLevel {
        let lower = content.to_lowercase();
        if HIGH_RISK_TERMS.iter().any(|t| lower.contains(t)) {
            RiskLevel::High
        } else if MEDIUM_RISK_TERMS.iter().any(|t| lower.contains(t)) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    fn reading_time(content: &str) -> u32 {
        let words = content.split_whitespace().count();
        words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
    }

    fn suggestions(content: &str) -> Vec<String> {
        let lower = content.to_lowercase();
        let mut suggestions = Vec::new();

        if !lower.contains("prazo") && !lower.contains("vigência") {
            suggestions.push("Definir prazo de vigência do documento".to_string());
        }
        if !lower.contains("foro") {
            suggestions.push("Incluir cláusula de foro para resolução de conflitos".to_string());
        }
        if !lower.contains("dados pessoais") && !lower.contains("lgpd") {
            suggestions.push("Adicionar cláusula sobre tratamento de dados pessoais (LGPD)".to_string());
        }
        if content.chars().count() < MIN_CONTENT_CHARS {
            suggestions.push("Detalhar melhor o objeto e as obrigações das partes".to_string());
        }
        if suggestions.is_empty() {
            suggestions.push("Revisar a redação para maior clareza".to_string());
        }
        suggestions
    }

    fn default_issues(content: &str) -> Vec<String> {
        let mut issues = Vec::new();
        let description = content.split_once("\n\n").map(|(_, d)| d).unwrap_or("");
        if description.trim().is_empty() {
            issues.push("Documento sem descrição".to_string());
        }
        if content.chars().count() < MIN_CONTENT_CHARS {
            issues.push(format!(
                "Conteúdo muito curto (mínimo de {MIN_CONTENT_CHARS} caracteres)"
            ));
        }
        issues
    }
}

#[async_trait]
impl AnalysisProvider for LocalAnalysisProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn analyze_document(&self, content: &str) -> Result<AnalysisResult> {
        Ok(AnalysisResult {
            summary: Self::summary(content),
            key_points: Self::sentences(content).into_iter().take(3).collect(),
            risk_level: Self::risk_level(content),
            suggestions: Self::suggestions(content),
            estimated_reading_time: Some(Self::reading_time(content)),
        })
    }

    async fn generate_summary(&self, content: &str) -> Result<String> {
        Ok(Self::summary(content))
    }

    async fn suggest_improvements(&self, content: &str) -> Result<Vec<String>> {
        Ok(Self::suggestions(content))
    }

    async fn check_compliance(
        &self,
        content: &str,
        rules: Option<&[String]>,
    ) -> Result<ComplianceResult> {
        let issues = match rules {
            Some(rules) if !rules.is_empty() => {
                let lower = content.to_lowercase();
                rules
                    .iter()
                    .filter(|rule| !lower.contains(&rule.to_lowercase()))
                    .map(|rule| format!("Regra não atendida: {rule}"))
                    .collect()
            }
            _ => Self::default_issues(content),
        };

        Ok(ComplianceResult {
            compliant: issues.is_empty(),
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "Contrato de Prestação de Serviços\n\n\
        O contratado prestará serviços de consultoria. O pagamento será mensal. \
        Em caso de rescisão antecipada incidirá multa de 10%.";

    #[tokio::test]
    async fn test_analysis_is_deterministic() {
        let provider = LocalAnalysisProvider::new();
        let a = provider.analyze_document(CONTRACT).await.unwrap();
        let b = provider.analyze_document(CONTRACT).await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.key_points.len(), 3);
        assert_eq!(a.estimated_reading_time, Some(1));
    }

    #[tokio::test]
    async fn test_risk_levels() {
        let provider = LocalAnalysisProvider::new();
        let low = provider.analyze_document("Ata\n\nReunião de equipe.").await.unwrap();
        assert_eq!(low.risk_level, RiskLevel::Low);

        let medium = provider
            .analyze_document("Acordo\n\nO pagamento ocorre no dia 5.")
            .await
            .unwrap();
        assert_eq!(medium.risk_level, RiskLevel::Medium);
    }

    #[tokio::test]
    async fn test_summary_truncates() {
        let provider = LocalAnalysisProvider::new();
        let long = "palavra ".repeat(200);
        let summary = provider.generate_summary(&long).await.unwrap();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), SUMMARY_MAX_CHARS + 3);
    }

    #[tokio::test]
    async fn test_summary_of_empty_content() {
        let provider = LocalAnalysisProvider::new();
        let summary = provider.generate_summary("\n\n").await.unwrap();
        assert_eq!(summary, "Documento sem conteúdo para resumir.");
    }

    #[tokio::test]
    async fn test_compliance_with_rules() {
        let provider = LocalAnalysisProvider::new();
        let rules = vec!["multa".to_string(), "LGPD".to_string()];
        let result = provider.check_compliance(CONTRACT, Some(&rules)).await.unwrap();

        assert!(!result.compliant);
        assert_eq!(result.issues, vec!["Regra não atendida: LGPD"]);
    }

    #[tokio::test]
    async fn test_compliance_default_rules() {
        let provider = LocalAnalysisProvider::new();
        let ok = provider.check_compliance(CONTRACT, None).await.unwrap();
        assert!(ok.compliant);

        let bad = provider.check_compliance("T\n\n", None).await.unwrap();
        assert!(!bad.compliant);
        assert_eq!(bad.issues.len(), 2);
    }

    #[tokio::test]
    async fn test_suggestions_never_empty() {
        let provider = LocalAnalysisProvider::new();
        let text = "Contrato\n\nVigência de 12 meses, foro de São Paulo, dados pessoais tratados \
                    conforme a LGPD e obrigações detalhadas das partes.";
        let suggestions = provider.suggest_improvements(text).await.unwrap();
        assert_eq!(suggestions, vec!["Revisar a redação para maior clareza"]);
    }
}

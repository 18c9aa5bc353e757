//! Provider selection and memoization

use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::gemini::DEFAULT_GEMINI_MODEL;
use super::openai::DEFAULT_OPENAI_MODEL;
use super::{AnalysisProvider, GeminiProvider, LocalAnalysisProvider, OpenAiProvider};
use crate::error::{DocSignError, Result};

/// Default bound on a single analysis call (30 seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Analysis vendor named by configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    Gemini,
    Local,
    /// Unrecognized selector value, kept for the fallback warning
    Unknown(String),
}

impl ProviderKind {
    /// Parse a selector value (case-insensitive)
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "openai" => ProviderKind::OpenAi,
            "gemini" | "google" => ProviderKind::Gemini,
            "local" | "mock" => ProviderKind::Local,
            other => ProviderKind::Unknown(other.to_string()),
        }
    }
}

/// Analysis provider configuration
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    /// Upper bound on a single analysis call
    pub timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment.
    ///
    /// - `AI_PROVIDER` (optional, default `openai`): `openai`, `gemini` or `local`
    /// - `OPENAI_API_KEY` / `OPENAI_MODEL`
    /// - `GEMINI_API_KEY` / `GEMINI_MODEL`
    /// - `DOCSIGN_ANALYSIS_TIMEOUT_SECS` (optional, default 30)
    pub fn from_env() -> std::result::Result<Self, String> {
        let defaults = Self::default();
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let timeout_secs = match std::env::var("DOCSIGN_ANALYSIS_TIMEOUT_SECS") {
            Ok(val) => parse_timeout_secs(&val)?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            kind: non_empty("AI_PROVIDER")
                .map(|v| ProviderKind::parse(&v))
                .unwrap_or(defaults.kind),
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_model: non_empty("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Config that always selects the deterministic stand-in
    pub fn local() -> Self {
        Self {
            kind: ProviderKind::Local,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ProviderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_openai_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_gemini_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parse a timeout in whole seconds; zero is rejected
fn parse_timeout_secs(value: &str) -> std::result::Result<u64, String> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(format!(
            "DOCSIGN_ANALYSIS_TIMEOUT_SECS must be a positive integer, got {value:?}"
        )),
    }
}

/// Build the provider named by the config
///
/// A missing credential falls back to [`LocalAnalysisProvider`] with a
/// warning; construction never fails.
pub fn create_provider(config: &ProviderConfig) -> Arc<dyn AnalysisProvider> {
    match &config.kind {
        ProviderKind::OpenAi => match &config.openai_api_key {
            Some(key) => {
                tracing::info!("Using OpenAI analysis provider ({})", config.openai_model);
                Arc::new(OpenAiProvider::new(key.clone(), config.openai_model.clone()))
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set; falling back to local analysis provider");
                Arc::new(LocalAnalysisProvider::new())
            }
        },
        ProviderKind::Gemini => match &config.gemini_api_key {
            Some(key) => {
                tracing::info!("Using Gemini analysis provider ({})", config.gemini_model);
                Arc::new(GeminiProvider::new(key.clone(), config.gemini_model.clone()))
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set; falling back to local analysis provider");
                Arc::new(LocalAnalysisProvider::new())
            }
        },
        ProviderKind::Local => {
            tracing::info!("Using local analysis provider");
            Arc::new(LocalAnalysisProvider::new())
        }
        ProviderKind::Unknown(name) => {
            tracing::warn!("Unknown AI_PROVIDER '{}'; falling back to local analysis provider", name);
            Arc::new(LocalAnalysisProvider::new())
        }
    }
}

/// Memoized analysis provider
///
/// The first `get()` builds the provider from the config; later calls reuse
/// it until `reset()` or `reconfigure()` clears the slot.
pub struct ProviderCache {
    config: RwLock<ProviderConfig>,
    slot: RwLock<Option<Arc<dyn AnalysisProvider>>>,
}

impl ProviderCache {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config: RwLock::new(config),
            slot: RwLock::new(None),
        }
    }

    /// Cache pre-filled with an existing provider (e.g. a test double)
    ///
    /// After `reset()` the cache rebuilds from the default config.
    pub fn preloaded(provider: Arc<dyn AnalysisProvider>) -> Self {
        Self {
            config: RwLock::new(ProviderConfig::default()),
            slot: RwLock::new(Some(provider)),
        }
    }

    /// Override the per-call timeout, keeping any memoized provider
    pub fn with_timeout(self, timeout: Duration) -> Self {
        if let Ok(mut config) = self.config.write() {
            config.timeout = timeout;
        }
        self
    }

    /// Get the provider, building it on first use
    pub fn get(&self) -> Result<Arc<dyn AnalysisProvider>> {
        if let Some(provider) = self
            .slot
            .read()
            .map_err(|_| DocSignError::StateLocked)?
            .as_ref()
        {
            return Ok(Arc::clone(provider));
        }

        let mut slot = self.slot.write().map_err(|_| DocSignError::StateLocked)?;
        // Another caller may have filled the slot between the two locks
        if let Some(provider) = slot.as_ref() {
            return Ok(Arc::clone(provider));
        }
        let config = self.config.read().map_err(|_| DocSignError::StateLocked)?;
        let provider = create_provider(&config);
        *slot = Some(Arc::clone(&provider));
        Ok(provider)
    }

    /// Bound applied to every analysis call
    pub fn timeout(&self) -> Duration {
        self.config
            .read()
            .map(|c| c.timeout)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Drop the memoized provider; the next `get()` rebuilds it
    pub fn reset(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Replace the config and drop the memoized provider
    pub fn reconfigure(&self, config: ProviderConfig) -> Result<()> {
        *self.config.write().map_err(|_| DocSignError::StateLocked)? = config;
        self.reset();
        Ok(())
    }

    /// Whether a provider is currently memoized
    pub fn is_initialized(&self) -> bool {
        self.slot.read().map(|s| s.is_some()).unwrap_or(false)
    }
}

impl std::fmt::Debug for ProviderCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCache")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

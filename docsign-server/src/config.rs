//! Server configuration

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BASE_PATH: &str = "/mcp";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Prefix for the tool and resource routes
    pub base_path: String,
    /// Enable CORS
    pub cors_enabled: bool,
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Base path with one leading slash and no trailing slash
    ///
    /// Returns an empty string when the routes live at the root.
    pub fn normalized_base_path(&self) -> String {
        let trimmed = self.base_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            cors_enabled: true,
        }
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    base_path: Option<String>,
    cors_enabled: Option<bool>,
}

impl ServerConfigBuilder {
    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the route prefix
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = Some(enabled);
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            base_path: self
                .base_path
                .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            cors_enabled: self.cors_enabled.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::builder().build();
        assert_eq!(config.port, 3001);
        assert_eq!(config.base_path, "/mcp");
        assert!(config.cors_enabled);
    }

    #[test]
    fn test_normalized_base_path() {
        let path = |p: &str| ServerConfig::builder().base_path(p).build().normalized_base_path();
        assert_eq!(path("/mcp"), "/mcp");
        assert_eq!(path("mcp/"), "/mcp");
        assert_eq!(path("/api/v1/"), "/api/v1");
        assert_eq!(path("/"), "");
        assert_eq!(path(""), "");
    }
}

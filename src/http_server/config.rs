//! Listener and CORS settings for the analytics API

use std::io;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Bind host (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed browser origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// `host:port` as written in the config
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        self.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.socket_addr(), e),
            )
        })
    }

    /// Origins as header values, or `None` when any origin is allowed
    pub fn allowed_origins(&self) -> Option<Vec<HeaderValue>> {
        if self.cors_origins.is_empty() {
            return None;
        }
        Some(
            self.cors_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin.trim()).ok())
                .collect(),
        )
    }

    /// Port, listen address and every origin must be usable
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("http.port must be > 0".to_string());
        }
        self.bind_addr().map_err(|e| e.to_string())?;
        for origin in &self.cors_origins {
            if HeaderValue::from_str(origin.trim()).is_err() || origin.trim().is_empty() {
                return Err(format!("http.cors_origins: invalid origin {:?}", origin));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HttpServerConfig::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:8000");
        assert!(config.allowed_origins().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_origins_parsed() {
        let config = HttpServerConfig::default()
            .with_cors_origins(vec![" http://localhost:5173 ".to_string()]);
        let origins = config.allowed_origins().unwrap();
        assert_eq!(origins, vec![HeaderValue::from_static("http://localhost:5173")]);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(HttpServerConfig::with_port(0).validate().is_err());

        let mut config = HttpServerConfig::default();
        config.host = "not a host".to_string();
        assert!(config.validate().is_err());

        let config = HttpServerConfig::default().with_cors_origins(vec!["".to_string()]);
        assert!(config.validate().is_err());
    }
}

//! Transport configuration types.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default HTTP port when `PORT` is unset.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

/// Which transports run, and how the HTTP one listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Serve MCP over standard input/output.
    pub stdio: bool,

    /// Serve the HTTP API and console page. `None` disables HTTP.
    pub http: Option<HttpConfig>,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            stdio: true,
            http: Some(HttpConfig::default()),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Create an HTTP config on the given port and host.
    pub fn new(port: u16, host: impl Into<String>) -> Self {
        Self {
            port,
            host: host.into(),
            ..Default::default()
        }
    }

    /// Load HTTP settings from `PORT`, `MCP_HTTP_HOST` and `MCP_HTTP_CORS`.
    pub fn from_env() -> Self {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid PORT '{}', using {}", raw, DEFAULT_HTTP_PORT);
                DEFAULT_HTTP_PORT
            }),
            Err(_) => DEFAULT_HTTP_PORT,
        };
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Self {
            port,
            host,
            enable_cors,
        }
    }

    /// Bind address as `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl TransportConfig {
    /// STDIO only.
    pub fn stdio() -> Self {
        Self {
            stdio: true,
            http: None,
        }
    }

    /// HTTP only.
    pub fn http(config: HttpConfig) -> Self {
        Self {
            stdio: false,
            http: Some(config),
        }
    }

    /// Load transport config from environment variables.
    ///
    /// `MCP_TRANSPORT` selects `stdio`, `http` or `all` (the default).
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            "stdio" => Self::stdio(),
            "http" => Self::http(HttpConfig::from_env()),
            "" | "all" => Self {
                stdio: true,
                http: Some(HttpConfig::from_env()),
            },
            other => {
                warn!("Unknown MCP_TRANSPORT '{}', running all transports", other);
                Self {
                    stdio: true,
                    http: Some(HttpConfig::from_env()),
                }
            }
        }
    }

    /// Get a description of the enabled transports for logging.
    pub fn description(&self) -> String {
        let mut parts = Vec::new();
        if self.stdio {
            parts.push("STDIO (MCP)".to_string());
        }
        if let Some(http) = &self.http {
            parts.push(format!("HTTP on {}", http.address()));
        }
        if parts.is_empty() {
            "none".to_string()
        } else {
            parts.join(" + ")
        }
    }
}

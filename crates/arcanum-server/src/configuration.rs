use crate::error::{to_env_var, ConfigError};
use arcanum::providers::configs::{GroqProviderConfig, GROQ_DEFAULT_MODEL, GROQ_HOST};
use arcanum::stream::DEFAULT_MAX_LINE_BYTES;
use config::{Config, Environment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

#[derive(Debug, Deserialize)]
pub struct UpstreamSettings {
    #[serde(default = "default_upstream_host")]
    pub host: String,
    /// Limit on connecting, receiving response headers and reading a buffered body.
    /// Streamed bodies are not cut off by it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: u64,
    #[serde(default = "default_model")]
    pub default_model: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            host: default_upstream_host(),
            timeout_secs: default_timeout_secs(),
            max_line_bytes: default_max_line_bytes(),
            default_model: default_model(),
        }
    }
}

impl UpstreamSettings {
    pub fn provider_config(&self) -> GroqProviderConfig {
        GroqProviderConfig::new(self.host.clone(), Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load_and_validate()
    }

    fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("upstream.host", default_upstream_host())?
            .set_default("upstream.timeout_secs", default_timeout_secs())?
            .set_default("upstream.max_line_bytes", default_max_line_bytes())?
            .set_default("upstream.default_model", default_model())?
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("ARCANUM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            match err {
                config::ConfigError::Type {
                    key: Some(ref key), ..
                } => ConfigError::InvalidEnvVar {
                    env_var: to_env_var(key),
                    message: err.to_string(),
                },
                other => ConfigError::Other(other),
            }
        })?;

        if settings.upstream.max_line_bytes == 0 {
            return Err(ConfigError::InvalidEnvVar {
                env_var: to_env_var("upstream.max_line_bytes"),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(settings)
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_upstream_host() -> String {
    GROQ_HOST.to_string()
}

fn default_timeout_secs() -> u64 {
    600
}

fn default_max_line_bytes() -> u64 {
    DEFAULT_MAX_LINE_BYTES as u64
}

fn default_model() -> String {
    GROQ_DEFAULT_MODEL.to_string()
}

use std::time::Duration;

pub const GROQ_HOST: &str = "https://api.groq.com/openai";
pub const GROQ_DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Generation parameters applied to every request; not client configurable.
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 2048;
pub const REASONING_FORMAT: &str = "parsed";

#[derive(Debug, Clone)]
pub struct GroqProviderConfig {
    pub host: String,
    pub timeout: Duration,
}

impl GroqProviderConfig {
    pub fn new<S: Into<String>>(host: S, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.host.trim_end_matches('/'))
    }
}

impl Default for GroqProviderConfig {
    fn default() -> Self {
        Self::new(GROQ_HOST, Duration::from_secs(600))
    }
}

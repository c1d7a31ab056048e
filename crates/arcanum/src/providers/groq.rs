use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Client;
use tokio::time::{timeout_at, Instant};

use super::base::{ChatUpstream, UpstreamReply, UpstreamRequest};
use super::configs::GroqProviderConfig;
use super::utils::chat_completion_payload;
use crate::errors::{RelayError, RelayResult};

pub struct GroqProvider {
    client: Client,
    config: GroqProviderConfig,
}

impl GroqProvider {
    pub fn new(config: GroqProviderConfig) -> RelayResult<Self> {
        // No whole-request timeout: it would also cut off long streamed bodies
        let client = Client::builder().connect_timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn timed_out(&self) -> RelayError {
        RelayError::Internal(anyhow::anyhow!(
            "upstream did not respond within {:?}",
            self.config.timeout
        ))
    }
}

#[async_trait]
impl ChatUpstream for GroqProvider {
    async fn send(&self, request: UpstreamRequest) -> RelayResult<UpstreamReply> {
        if request.api_key.trim().is_empty() {
            return Err(RelayError::MissingApiKey);
        }

        // Bounds everything up to the response headers, plus the buffered body.
        // A streamed body is read for as long as the generation takes.
        let deadline = Instant::now() + self.config.timeout;

        let payload = chat_completion_payload(&request.model, &request.messages, request.stream);
        let send = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&request.api_key)
            .json(&payload)
            .send();
        let response = timeout_at(deadline, send)
            .await
            .map_err(|_| self.timed_out())??;

        let status = response.status();
        if !status.is_success() {
            let body = timeout_at(deadline, response.text())
                .await
                .map_err(|_| self.timed_out())??;
            tracing::error!(status = status.as_u16(), %body, "error from upstream provider");
            return Err(RelayError::from_upstream(status.as_u16(), body));
        }

        if request.stream {
            let body = response
                .bytes_stream()
                .map_err(|e| RelayError::TruncatedStream(e.to_string()));
            return Ok(UpstreamReply::Streaming(Box::pin(body)));
        }

        let body = timeout_at(deadline, response.bytes())
            .await
            .map_err(|_| self.timed_out())??;
        Ok(UpstreamReply::Complete(body))
    }
}

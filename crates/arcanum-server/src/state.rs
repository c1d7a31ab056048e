use arcanum::providers::base::ChatUpstream;
use std::sync::Arc;

use crate::configuration::UpstreamSettings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn ChatUpstream>,
    pub default_model: String,
    pub max_line_bytes: usize,
}

impl AppState {
    pub fn new(upstream: Arc<dyn ChatUpstream>, settings: &UpstreamSettings) -> Self {
        Self {
            upstream,
            default_model: settings.default_model.clone(),
            max_line_bytes: usize::try_from(settings.max_line_bytes).unwrap_or(usize::MAX),
        }
    }
}

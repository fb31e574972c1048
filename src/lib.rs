pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod pipeline;
pub mod scraper;
pub mod transcript;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use config::Config;
use pipeline::Pipeline;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Configuration is consumed here; handlers only see the pipeline.
    pub fn from_config(config: &Config) -> error::Result<Self> {
        Ok(Self::new(Pipeline::from_config(config)?))
    }
}

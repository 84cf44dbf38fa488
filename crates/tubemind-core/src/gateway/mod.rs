//! The single seam between tubemind and the hosted model.
//!
//! Orchestrators only see [`Gateway`]; the Gemini HTTP client is one implementation
//! and tests plug in scripted ones.

mod config;
mod gemini;
mod schema;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

pub use config::{API_KEY_ENV_VARS, DEFAULT_BASE_URL, DEFAULT_MODEL, GatewayConfig};
pub use gemini::GeminiGateway;
pub use schema::{Schema, SchemaType};

use crate::{error::GatewayError, types::Source};

/// One prompt plus the generation options the orchestrators care about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub temperature: Option<f32>,
    /// Ask the service to constrain its JSON output to this shape. Conformance is not
    /// checked here; callers decode and handle failures themselves.
    pub response_schema: Option<Schema>,
    /// Let the model ground its answer in web search results.
    pub search_grounding: bool,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_search_grounding(mut self) -> Self {
        self.search_grounding = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    /// Free-form model output; empty when the service produced no text.
    pub text: String,
    /// Web references from grounding metadata, in the order the service listed them.
    pub sources: Vec<Source>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sources: Vec::new(),
        }
    }
}

/// A single request/response call to a generative model. No retries, no streaming.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError>;
}

use async_trait::async_trait;
use ollama_rs::generation::completion::request::GenerationRequest;
use ollama_rs::Ollama;

use crate::error::AgentError;

const MODEL_NAME: &str = "llama3.2:latest";

/// Synchronous request/response completion boundary: one fully rendered
/// prompt in, generated text out. The chain makes two independent calls per
/// user turn through this trait; tests substitute a scripted implementation.
#[async_trait]
pub trait TextModel {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError>;
}

pub struct OllamaModel {
    client: Ollama,
    model: String,
}

impl OllamaModel {
    /// Talks to the default local Ollama endpoint.
    pub fn new() -> Self {
        Self {
            client: Ollama::default(),
            model: MODEL_NAME.to_string(),
        }
    }
}

impl Default for OllamaModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextModel for OllamaModel {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let request = GenerationRequest::new(self.model.clone(), prompt.to_string());
        let response = self
            .client
            .generate(request)
            .await
            .map_err(|e| AgentError::Model(e.to_string()))?;
        Ok(response.response)
    }
}

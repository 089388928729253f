//! Upstream generative-model capability.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message};
use aws_sdk_bedrockruntime::Client as BedrockClient;

use crate::{Error, Result};

/// A hosted generative model that completes a text prompt.
///
/// One narrow method so the service and controller can be exercised with a
/// deterministic stand-in instead of a live provider.
#[async_trait]
pub trait PromptModel: Send + Sync {
    /// Send one prompt and return the model's text reply.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Production model backed by Amazon Bedrock's Converse API.
pub struct BedrockModel {
    client: BedrockClient,
    model_id: String,
}

impl BedrockModel {
    /// Create a new Bedrock-backed model.
    pub fn new(client: BedrockClient, model_id: String) -> Self {
        Self { client, model_id }
    }
}

#[async_trait]
impl PromptModel for BedrockModel {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let message = Message::builder()
            .role(ConversationRole::User)
            .content(ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build model message: {}", e)))?;

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .messages(message)
            .send()
            .await
            .map_err(|e| Error::Upstream(format!("Model invocation failed: {}", e)))?;

        let output = response
            .output
            .ok_or_else(|| Error::MalformedOutput("No output from model".to_string()))?;

        let message = output
            .as_message()
            .map_err(|_| Error::MalformedOutput("Model output is not a message".to_string()))?;

        let text = message
            .content()
            .iter()
            .find_map(|block| block.as_text().ok().cloned())
            .ok_or_else(|| Error::MalformedOutput("Model reply has no text block".to_string()))?;

        Ok(text)
    }
}

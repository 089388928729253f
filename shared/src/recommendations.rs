//! The recommendation service: validates input, renders prompts, and coerces
//! model replies into their declared output shapes.

use serde::de::DeserializeOwned;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    ImageSuggestionRequest, ImageSuggestionResponse, RecommendationRequest, RecommendationResponse,
};
use crate::prompts;
use crate::upstream::PromptModel;
use crate::{Error, Result};

/// Service wrapping the generative model behind the two prompt operations.
///
/// Each accepted request makes exactly one upstream call; failures are never
/// retried here since that would change latency and cost characteristics.
pub struct RecommendationService<M> {
    model: M,
}

impl<M: PromptModel> RecommendationService<M> {
    /// Create a new service over the given model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Generate personalized food recommendations.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse> {
        request
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let request_id = Uuid::new_v4();
        info!(%request_id, "Generating food recommendations");

        let prompt = prompts::recommendation_prompt(&request);
        let reply = self.model.complete(&prompt).await?;
        parse_reply(&reply)
    }

    /// Suggest image keywords for a piece of food content.
    pub async fn suggest_images(
        &self,
        request: ImageSuggestionRequest,
    ) -> Result<ImageSuggestionResponse> {
        request
            .validate()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let request_id = Uuid::new_v4();
        info!(%request_id, num_suggestions = request.num_suggestions, "Generating image suggestions");

        let prompt = prompts::image_suggestion_prompt(&request);
        let reply = self.model.complete(&prompt).await?;
        parse_reply(&reply)
    }
}

/// Coerce a model reply into the declared output shape.
///
/// Models habitually wrap JSON in markdown fences; stripping those is the only
/// repair attempted. A reply that still does not match the shape is rejected
/// whole rather than patched field by field.
fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T> {
    let text = strip_code_fence(reply.trim());
    serde_json::from_str(text).map_err(|e| {
        Error::MalformedOutput(format!("Model reply did not match the expected shape: {}", e))
    })
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

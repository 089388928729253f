//! Wire shapes for the recommendation and image-suggestion operations.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Recommendation request payload.
///
/// Each field is free text; the minimum length matches the form-level check so
/// the service rejects anything a tampered client slips past the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[validate(length(
        min = 10,
        message = "Please describe your dietary needs in at least 10 characters."
    ))]
    pub dietary_needs: String,
    #[validate(length(
        min = 10,
        message = "Please describe your health goals in at least 10 characters."
    ))]
    pub health_goals: String,
    #[validate(length(
        min = 10,
        message = "Please describe your food preferences in at least 10 characters."
    ))]
    pub food_preferences: String,
}

/// Recommendation response payload.
///
/// Both fields are opaque text from the model; either missing makes the whole
/// reply malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: String,
    pub reasoning: String,
}

fn default_num_suggestions() -> u8 {
    3
}

/// Image-suggestion request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageSuggestionRequest {
    #[validate(length(min = 1, message = "Food content must not be empty."))]
    pub food_content: String,
    /// Number of suggestions to generate, 1 through 5.
    #[validate(range(min = 1, max = 5, message = "numSuggestions must be between 1 and 5."))]
    #[serde(default = "default_num_suggestions")]
    pub num_suggestions: u8,
}

/// Image-suggestion response payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSuggestionResponse {
    pub image_suggestions: Vec<String>,
}

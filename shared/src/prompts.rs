//! Prompt templates sent to the generative model.
//!
//! The wording here is a configuration artifact: downstream behavior depends
//! on these strings staying stable, so edit with care.

use crate::models::{ImageSuggestionRequest, RecommendationRequest};

/// Instruction pinning the recommendation reply to its declared JSON shape.
const RECOMMENDATION_FORMAT: &str = "Respond with a single JSON object with exactly two string \
fields, \"recommendations\" and \"reasoning\", and no other text.";

/// Instruction pinning the image-suggestion reply to its declared JSON shape.
const IMAGE_SUGGESTION_FORMAT: &str = "Respond with a single JSON object with exactly one field, \
\"imageSuggestions\", an array of strings, and no other text.";

/// Render the nutritionist prompt for a recommendation request.
pub fn recommendation_prompt(request: &RecommendationRequest) -> String {
    format!(
        "You are a nutritionist providing personalized food recommendations.

Based on the user's dietary needs, health goals, and food preferences, provide a list of food recommendations and explain why they are suitable.

Dietary Needs: {dietary_needs}
Health Goals: {health_goals}
Food Preferences: {food_preferences}

Provide the recommendations in a concise and easy-to-understand format.
Include a reasoning section to explain why the recommendations are appropriate.

{format_instruction}",
        dietary_needs = request.dietary_needs,
        health_goals = request.health_goals,
        food_preferences = request.food_preferences,
        format_instruction = RECOMMENDATION_FORMAT,
    )
}

/// Render the image-suggestion prompt for a piece of food content.
pub fn image_suggestion_prompt(request: &ImageSuggestionRequest) -> String {
    format!(
        "You are an AI assistant specialized in suggesting images for food-related content.

Based on the provided food content, suggest {num_suggestions} relevant images that would visually represent the content.
Return the image suggestions as a list of descriptive keywords that can be used to find images.

Food Content: {food_content}

Image Suggestions:

{format_instruction}",
        num_suggestions = request.num_suggestions,
        food_content = request.food_content,
        format_instruction = IMAGE_SUGGESTION_FORMAT,
    )
}

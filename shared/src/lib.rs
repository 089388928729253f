//! Shared library for NutriGuide Lambda functions.
//!
//! This crate provides the recommendation service, the request controller, and
//! common types used across all Lambda functions.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod models;
pub mod prompts;
pub mod recommendations;
pub mod upstream;

pub use config::Config;
pub use controller::{CoachRuntime, Controller, RequestState, COOLDOWN_SECONDS};
pub use error::{Error, Result};
pub use http::ApiResponse;
pub use models::{
    ImageSuggestionRequest, ImageSuggestionResponse, RecommendationRequest, RecommendationResponse,
};
pub use recommendations::RecommendationService;
pub use upstream::{BedrockModel, PromptModel};

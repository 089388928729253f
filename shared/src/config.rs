//! Configuration management for Lambda functions.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bedrock model identifier used for both prompt operations
    pub model_id: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            model_id: env::var("MODEL_ID")
                .unwrap_or_else(|_| "anthropic.claude-3-haiku-20240307-v1:0".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        }
    }
}

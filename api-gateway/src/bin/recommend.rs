//! Recommendation Lambda - Handles /v1/recommendations endpoint.
//!
//! Validates the submitted form fields and invokes the generative model to
//! produce personalized food recommendations.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::{parse_body, ApiResponse, BedrockModel, Config, RecommendationRequest, RecommendationService};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Application state shared across requests.
struct AppState {
    service: RecommendationService<BedrockModel>,
}

impl AppState {
    async fn new() -> Result<Self, Error> {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_bedrockruntime::Client::new(&aws_config);
        let config = Config::from_env();

        Ok(Self {
            service: RecommendationService::new(BedrockModel::new(client, config.model_id)),
        })
    }
}

async fn handler(state: Arc<AppState>, event: Request) -> Result<Response<Body>, Error> {
    let request: RecommendationRequest = parse_body!(event.body());

    info!("Processing recommendation request");

    match state.service.recommend(request).await {
        Ok(response) => shared::http::json_response(200, &ApiResponse::success(response)),
        Err(e) => {
            error!("Recommendation failed: {}", e);
            shared::http::failure_response(&e)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let state = Arc::new(AppState::new().await?);

    run(service_fn(move |event| {
        let state = Arc::clone(&state);
        async move { handler(state, event).await }
    }))
    .await
}

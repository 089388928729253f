//! Categories Lambda - Handles /v1/categories endpoint.
//!
//! Serves the static food-category catalog with resolved image references.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use shared::catalog::{category_image, FOOD_CATEGORIES};
use shared::ApiResponse;
use tracing_subscriber::EnvFilter;

async fn handler(_event: Request) -> Result<Response<Body>, Error> {
    let categories: Vec<serde_json::Value> = FOOD_CATEGORIES
        .iter()
        .map(|category| {
            serde_json::json!({
                "id": category.id,
                "name": category.name,
                "description": category.description,
                "healthBenefits": category.health_benefits,
                "image": category_image(category.image_id),
            })
        })
        .collect();

    shared::http::json_response(
        200,
        &ApiResponse::success(serde_json::json!({ "categories": categories })),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    run(service_fn(handler)).await
}

use axum::{extract::State, Json};

use crate::response::{EndpointSummary, HealthResponse};
use crate::routes::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let records = state.endpoints.find_all().await;
    Json(HealthResponse::ok(EndpointSummary::from_records(&records)))
}

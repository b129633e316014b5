use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::warn;

use crate::presentation::AppState;

#[derive(Debug, Serialize)]
pub(crate) struct HealthzResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    posts: Option<i64>,
}

/// Reports `ok` only when the post store answers.
pub(crate) async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthzResponse>) {
    match state.blog_service.count_posts().await {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthzResponse {
                status: "ok",
                posts: Some(count),
            }),
        ),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthzResponse {
                    status: "unavailable",
                    posts: None,
                }),
            )
        }
    }
}

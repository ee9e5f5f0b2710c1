//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly; no server or database is needed.

use atreia_api::error::AppError;
use atreia_core::error::CoreError;
use atreia_gameapi::GameApiError;
use atreia_pipeline::PipelineError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("serverId is required".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "serverId is required");
}

#[tokio::test]
async fn upstream_error_returns_500_without_leaking_body() {
    let err = AppError::from(PipelineError::Upstream(GameApiError::Status {
        status: 403,
        body: "<html>blocked</html>".into(),
    }));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    assert!(!json["error"].as_str().unwrap().contains("blocked"));
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let err = AppError::Database(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn other_database_errors_hide_details() {
    let err = AppError::from(PipelineError::Database(sqlx::Error::PoolTimedOut));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

//! HTTP request handlers for the working-time engine API.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::ClassifyRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/classify", post(classify_handler))
        .route("/policy", get(policy_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Handler for POST /classify.
///
/// Classifies one employee-month and returns a `MonthlyClassification`.
async fn classify_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing classification request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's message, e.g. "missing field"
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::validation_error(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "Missing JSON content type"
                    );
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return error_response(ApiErrorResponse::bad_request(error));
        }
    };

    if let Err(error) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %error.message,
            "Request validation failed"
        );
        return error_response(ApiErrorResponse::bad_request(error));
    }

    let config = state.config();
    let classifier = match request.policy {
        Some(policy) => config.classifier_with_policy(policy),
        None => config.classifier(),
    };

    let start_time = Instant::now();
    match classifier.calculate_weekly_overtime(
        &request.employee_id,
        &request.punches,
        request.year,
        request.month,
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                year = result.year,
                month = result.month,
                punches_count = request.punches.len(),
                regular_minutes = result.totals.regular_minutes,
                overtime_minutes = result.totals.overtime_minutes,
                holiday_minutes = result.totals.holiday_minutes,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Classification completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Classification failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /policy.
///
/// Returns the configured policy and limits.
async fn policy_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.config().config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, EngineConfig};
    use crate::models::{DailyPunch, MonthlyClassification};
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Datelike, NaiveDate, NaiveTime};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn nine_to_six(date_str: &str) -> DailyPunch {
        DailyPunch::new(
            make_date(date_str),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            60,
        )
    }

    fn create_valid_request() -> ClassifyRequest {
        ClassifyRequest {
            employee_id: "emp_001".to_string(),
            year: 2025,
            month: 9,
            policy: None,
            punches: vec![nine_to_six("2025-09-01"), nine_to_six("2025-09-02")],
        }
    }

    async fn post_classify(body: impl Into<Body>) -> Response {
        create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/classify")
                    .header("Content-Type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let body = serde_json::to_string(&create_valid_request()).unwrap();
        let response = post_classify(body).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let result: MonthlyClassification = serde_json::from_slice(&body).unwrap();

        assert_eq!(result.employee_id, "emp_001");
        assert_eq!(result.days.len(), 2);
        assert_eq!(result.totals.regular_minutes, 960);
        assert_eq!(result.totals.overtime_minutes, 0);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let response = post_classify("{invalid json").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_employee_id_returns_validation_error() {
        let body = r#"{ "year": 2025, "month": 9, "punches": [] }"#;
        let response = post_classify(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(
            error.message.contains("missing field"),
            "Expected missing field message, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_bad_week_start_day_returns_validation_error() {
        let body = r#"{
            "employee_id": "emp_001",
            "year": 2025,
            "month": 9,
            "policy": { "week_start_day": 9 },
            "punches": []
        }"#;
        let response = post_classify(body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("week_start_day"));
    }

    #[tokio::test]
    async fn test_blank_employee_id_returns_validation_error() {
        let mut request = create_valid_request();
        request.employee_id = String::new();
        let response = post_classify(serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let mut request = create_valid_request();
        request.month = 13;
        let response = post_classify(serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_month_past_date_limits_returns_invalid_month() {
        let mut request = create_valid_request();
        request.year = NaiveDate::MIN.year();
        request.month = NaiveDate::MIN.month();
        request.punches = Vec::new();
        let response = post_classify(serde_json::to_string(&request).unwrap()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "INVALID_MONTH");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let body = serde_json::to_string(&create_valid_request()).unwrap();
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/classify")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_get_policy_returns_configuration() {
        let response = create_router(create_test_state())
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/policy")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let config: EngineConfig = serde_json::from_slice(&body).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}

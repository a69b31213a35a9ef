//! HTTP handlers for the promotions resource.
//!
//! Handlers stay thin: parse the request, delegate to the domain layer and
//! let [`ServiceError`] render the failure. Body extraction failures are
//! caught before validation runs and rendered through the same error shape.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use contracts::promotion::{validate_and_build, Promotion};
use serde_json::{json, Value};

use crate::domain::promotion::service::{self, ListFilters};
use crate::error::ServiceError;
use crate::AppState;

/// GET /health
///
/// Kept independent of the database so liveness probes stay stable.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /api
pub async fn index() -> Json<Value> {
    Json(json!({
        "name": "Promotions Service",
        "version": "1.0.0",
        "description": "RESTful service for managing promotions",
        "paths": {
            "promotions": "/api/promotions",
        },
    }))
}

/// GET /api/promotions
pub async fn list(
    State(state): State<AppState>,
    Query(filters): Query<ListFilters>,
) -> Result<Json<Value>, ServiceError> {
    tracing::info!("Request to list Promotions");
    let promotions = service::list(&state.repo, &filters).await?;
    let body: Vec<Value> = promotions.iter().map(Promotion::to_transport).collect();
    Ok(Json(Value::Array(body)))
}

/// POST /api/promotions
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ServiceError> {
    tracing::info!("Request to Create a Promotion");
    let Json(payload) = payload?;
    let draft = validate_and_build(&payload)?;
    let created = state.repo.create(&draft).await?;
    let location = format!("/api/promotions/{}", created.id.unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created.to_transport()),
    ))
}

/// GET /api/promotions/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ServiceError> {
    tracing::info!("Request to get Promotion with id [{id}]");
    let promotion = state
        .repo
        .find_by_id(id)
        .await?
        .ok_or(ServiceError::NotFound(id))?;
    Ok(Json(promotion.to_transport()))
}

/// PUT /api/promotions/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ServiceError> {
    tracing::info!("Request to update Promotion with id [{id}]");
    let Json(payload) = payload?;
    // A body id is allowed but must agree with the path.
    if let Some(body_id) = payload.get("id").filter(|value| !value.is_null()) {
        if body_id.as_i64() != Some(i64::from(id)) {
            return Err(ServiceError::UnsupportedInput(
                "ID in body must match resource path".to_string(),
            ));
        }
    }
    let draft = validate_and_build(&payload)?;
    let updated = state.repo.update(id, &draft).await?;
    Ok(Json(updated.to_transport()))
}

/// DELETE /api/promotions/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServiceError> {
    tracing::info!("Request to delete Promotion with id [{id}]");
    state.repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/promotions/:id/deactivate
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ServiceError> {
    tracing::info!("Request to deactivate Promotion with id [{id}]");
    let promotion = service::deactivate(&state.repo, id).await?;
    Ok(Json(promotion.to_transport()))
}

/// POST /api/promotions/testdata
pub async fn insert_test_data(
    State(state): State<AppState>,
) -> Result<Json<Value>, ServiceError> {
    tracing::info!("Request to load sample Promotions");
    let created = service::insert_test_data(&state.repo).await?;
    Ok(Json(json!({ "created": created })))
}

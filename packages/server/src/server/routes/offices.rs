//! Office listing endpoints.
//!
//! Handlers stay thin: they turn the HTTP request into an explicit caller
//! context plus typed inputs, then delegate to the office service.

use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::common::{ApiError, OfficeId, Page};
use crate::domains::office::{service, ListParams, OfficePayload, OfficeResource};
use crate::server::app::AppState;
use crate::server::middleware::AuthUser;

/// Single-resource envelope, matching the list envelope's `data` key.
#[derive(Serialize)]
pub struct OfficeEnvelope {
    data: OfficeResource,
}

/// GET /api/offices - list visible offices (auth optional)
pub async fn list_offices(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Page<OfficeResource>>, ApiError> {
    let caller = auth_user.as_ref().map(|Extension(user)| user.caller());
    let page = service::list(&params, caller.as_ref(), &state.db_pool).await?;
    Ok(Json(page))
}

/// GET /api/offices/{id} - office detail (no auth)
pub async fn get_office(
    Extension(state): Extension<AppState>,
    Path(office_id): Path<OfficeId>,
) -> Result<Json<OfficeEnvelope>, ApiError> {
    let office = service::get(office_id, &state.db_pool).await?;
    Ok(Json(OfficeEnvelope { data: office }))
}

/// POST /api/offices - create a listing (auth + office.create scope)
pub async fn create_office(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Json(payload): Json<OfficePayload>,
) -> Result<(StatusCode, Json<OfficeEnvelope>), ApiError> {
    let caller = require_auth(auth_user)?;
    let office = service::create(&caller, &payload, &state.deps).await?;
    Ok((StatusCode::CREATED, Json(OfficeEnvelope { data: office })))
}

/// PUT /api/offices/{id} - update a listing (auth + office.update scope + ownership)
pub async fn update_office(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(office_id): Path<OfficeId>,
    Json(payload): Json<OfficePayload>,
) -> Result<Json<OfficeEnvelope>, ApiError> {
    let caller = require_auth(auth_user)?;
    let office = service::update(office_id, &caller, &payload, &state.deps).await?;
    Ok(Json(OfficeEnvelope { data: office }))
}

/// DELETE /api/offices/{id} - delete a listing (auth + office.delete scope + ownership)
pub async fn delete_office(
    Extension(state): Extension<AppState>,
    auth_user: Option<Extension<AuthUser>>,
    Path(office_id): Path<OfficeId>,
) -> Result<StatusCode, ApiError> {
    let caller = require_auth(auth_user)?;
    service::delete(office_id, &caller, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn require_auth(
    auth_user: Option<Extension<AuthUser>>,
) -> Result<crate::common::auth::Caller, ApiError> {
    auth_user
        .map(|Extension(user)| user.caller())
        .ok_or(ApiError::Unauthenticated)
}

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::race_loop::{CreateLoopRequest, LoopDetailResponse, UpdateLoopRequest},
    models::RaceLoop,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/loops",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Loops of the event in display order", body = Vec<RaceLoop>),
        (status = 404, description = "Event not found")
    ),
    tag = "loops"
)]
pub async fn list_event_loops(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<RaceLoop>>, WebError> {
    let loops = services::list_event_loops(db.pool(), event_id).await?;

    Ok(Json(loops))
}

#[utoipa::path(
    post,
    path = "/api/events/{event_id}/loops",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    request_body = CreateLoopRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Loop created successfully", body = RaceLoop),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Sequence number already used in this event")
    ),
    tag = "loops"
)]
pub async fn create_loop(
    State(db): State<Database>,
    Path(event_id): Path<Uuid>,
    Json(req): Json<CreateLoopRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let race_loop = services::create_loop(db.pool(), event_id, &req).await?;

    Ok((StatusCode::CREATED, Json(race_loop)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/loops/{loop_id}",
    params(
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    responses(
        (status = 200, description = "Loop with occupancy", body = LoopDetailResponse),
        (status = 404, description = "Loop not found")
    ),
    tag = "loops"
)]
pub async fn get_loop(
    State(db): State<Database>,
    Path(loop_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let detail = services::get_loop(db.pool(), loop_id).await?;

    Ok(Json(detail).into_response())
}

#[utoipa::path(
    put,
    path = "/api/loops/{loop_id}",
    params(
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    request_body = UpdateLoopRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Loop updated successfully", body = RaceLoop),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Loop not found")
    ),
    tag = "loops"
)]
pub async fn update_loop(
    State(db): State<Database>,
    Path(loop_id): Path<Uuid>,
    Json(update_req): Json<UpdateLoopRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_loop(db.pool(), loop_id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/loops/{loop_id}",
    params(
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Loop deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Loop not found")
    ),
    tag = "loops"
)]
pub async fn delete_loop(
    State(db): State<Database>,
    Path(loop_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_loop(db.pool(), loop_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::race_result::{PublishResultsRequest, ResultEntry, UpdateRankRequest},
    models::{Principal, RaceResult, ResultScope},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/events/{event_id}/loops/{loop_id}/results",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    responses(
        (status = 200, description = "Results ordered by rank", body = Vec<ResultEntry>),
        (status = 404, description = "Loop not found in this event")
    ),
    tag = "results"
)]
pub async fn list_results(
    State(db): State<Database>,
    Path((event_id, loop_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Vec<ResultEntry>>, WebError> {
    let entries = services::list_results(db.pool(), ResultScope::new(event_id, loop_id)).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    put,
    path = "/api/events/{event_id}/loops/{loop_id}/results",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    request_body = PublishResultsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Previous results replaced by the submitted list", body = Vec<RaceResult>),
        (status = 400, description = "Ranks are not 1..N or a camel appears twice"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Loop, camel or owner not found")
    ),
    tag = "results"
)]
pub async fn publish_results(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path((event_id, loop_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<PublishResultsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let published = services::publish(
        db.pool(),
        &principal,
        ResultScope::new(event_id, loop_id),
        &req.results,
    )
    .await?;

    Ok(Json(published).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/events/{event_id}/loops/{loop_id}/results/rank",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    request_body = UpdateRankRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Result moved; results in between shifted by one", body = RaceResult),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No result for this camel in the loop"),
        (status = 422, description = "Rank outside 1..N")
    ),
    tag = "results"
)]
pub async fn update_rank(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path((event_id, loop_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<UpdateRankRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_rank(
        db.pool(),
        &principal,
        ResultScope::new(event_id, loop_id),
        req.camel_id,
        req.new_rank,
    )
    .await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/events/{event_id}/loops/{loop_id}/results/{camel_id}",
    params(
        ("event_id" = Uuid, Path, description = "Event ID"),
        ("loop_id" = Uuid, Path, description = "Loop ID"),
        ("camel_id" = i64, Path, description = "Camel ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Result removed; ranks below it moved up"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "No result for this camel in the loop")
    ),
    tag = "results"
)]
pub async fn delete_result(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path((event_id, loop_id, camel_id)): Path<(Uuid, Uuid, i64)>,
) -> Result<Response, WebError> {
    services::delete_result(
        db.pool(),
        &principal,
        ResultScope::new(event_id, loop_id),
        camel_id,
    )
    .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

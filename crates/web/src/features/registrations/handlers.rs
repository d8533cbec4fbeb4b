use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::registration::{DeregisterResponse, RegisterRequest, RegistrationEntry, TransferRequest},
    models::{Principal, Registration},
};
use uuid::Uuid;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/loops/{loop_id}/registrations",
    params(
        ("loop_id" = Uuid, Path, description = "Loop ID")
    ),
    responses(
        (status = 200, description = "Camels registered in the loop", body = Vec<RegistrationEntry>),
        (status = 404, description = "Loop not found")
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    Path(loop_id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationEntry>>, WebError> {
    let entries = services::list_registrations(db.pool(), loop_id).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = RegisterRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Camel registered; any other registration in the event is replaced", body = Registration),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Camel or loop not found"),
        (status = 409, description = "Loop is full or camel already registered in it"),
        (status = 422, description = "Camel age class or sex does not match the loop")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, WebError> {
    let registration = services::register(db.pool(), &principal, req.camel_id, req.loop_id).await?;

    Ok((StatusCode::CREATED, Json(registration)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/registrations/transfer",
    request_body = TransferRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Camel moved into the new loop", body = Registration),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Camel or loop not found"),
        (status = 409, description = "Target loop is full"),
        (status = 422, description = "Camel age class or sex does not match the loop")
    ),
    tag = "registrations"
)]
pub async fn transfer(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Json(req): Json<TransferRequest>,
) -> Result<Response, WebError> {
    let registration =
        services::transfer(db.pool(), &principal, req.camel_id, req.new_loop_id).await?;

    Ok(Json(registration).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/loops/{loop_id}/registrations/{camel_id}",
    params(
        ("loop_id" = Uuid, Path, description = "Loop ID"),
        ("camel_id" = i64, Path, description = "Camel ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registrations removed (possibly none)", body = DeregisterResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Loop not found"),
        (status = 409, description = "Registration for the loop has closed")
    ),
    tag = "registrations"
)]
pub async fn deregister(
    State(db): State<Database>,
    Extension(principal): Extension<Principal>,
    Path((loop_id, camel_id)): Path<(Uuid, i64)>,
) -> Result<Response, WebError> {
    let outcome = services::deregister(db.pool(), &principal, camel_id, loop_id).await?;

    Ok(Json(outcome).into_response())
}

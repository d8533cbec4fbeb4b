use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::owner::{CreateOwnerRequest, UpdateOwnerRequest},
    models::Owner,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/owners",
    responses(
        (status = 200, description = "List all owners", body = Vec<Owner>)
    ),
    tag = "owners"
)]
pub async fn list_owners(State(db): State<Database>) -> Result<Json<Vec<Owner>>, WebError> {
    let owners = services::list_owners(db.pool()).await?;

    Ok(Json(owners))
}

#[utoipa::path(
    get,
    path = "/api/owners/{id}",
    params(
        ("id" = i64, Path, description = "Owner ID")
    ),
    responses(
        (status = 200, description = "Owner found", body = Owner),
        (status = 404, description = "Owner not found")
    ),
    tag = "owners"
)]
pub async fn get_owner(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let owner = services::get_owner(db.pool(), id).await?;

    Ok(Json(owner).into_response())
}

#[utoipa::path(
    post,
    path = "/api/owners",
    request_body = CreateOwnerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Owner created successfully", body = Owner),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Admin key required")
    ),
    tag = "owners"
)]
pub async fn create_owner(
    State(db): State<Database>,
    Json(req): Json<CreateOwnerRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let owner = services::create_owner(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(owner)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/owners/{id}",
    params(
        ("id" = i64, Path, description = "Owner ID")
    ),
    request_body = UpdateOwnerRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Owner updated successfully", body = Owner),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Owner not found")
    ),
    tag = "owners"
)]
pub async fn update_owner(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(update_req): Json<UpdateOwnerRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_owner(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/owners/{id}",
    params(
        ("id" = i64, Path, description = "Owner ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Owner deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Owner still has camels or results")
    ),
    tag = "owners"
)]
pub async fn delete_owner(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_owner(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

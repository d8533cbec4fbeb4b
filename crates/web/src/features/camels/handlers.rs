use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        camel::{CamelFilter, CreateCamelRequest, UpdateCamelRequest},
        common::PaginatedResponse,
    },
    models::Camel,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/camels",
    params(CamelFilter),
    responses(
        (status = 200, description = "Camels matching the filter", body = PaginatedResponse<Camel>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "camels"
)]
pub async fn list_camels(
    State(db): State<Database>,
    Query(filter): Query<CamelFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (camels, total_items) = services::list_camels(db.pool(), &filter).await?;

    let response = PaginatedResponse::new(camels, filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/camels/{id}",
    params(
        ("id" = i64, Path, description = "Camel ID")
    ),
    responses(
        (status = 200, description = "Camel found", body = Camel),
        (status = 404, description = "Camel not found")
    ),
    tag = "camels"
)]
pub async fn get_camel(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    let camel = services::get_camel(db.pool(), id).await?;

    Ok(Json(camel).into_response())
}

#[utoipa::path(
    post,
    path = "/api/camels",
    request_body = CreateCamelRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Camel created successfully", body = Camel),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Chip id already registered or unknown owner")
    ),
    tag = "camels"
)]
pub async fn create_camel(
    State(db): State<Database>,
    Json(req): Json<CreateCamelRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let camel = services::create_camel(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(camel)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/camels/{id}",
    params(
        ("id" = i64, Path, description = "Camel ID")
    ),
    request_body = UpdateCamelRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Camel updated successfully", body = Camel),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Camel not found"),
        (status = 409, description = "Chip id already registered or unknown owner")
    ),
    tag = "camels"
)]
pub async fn update_camel(
    State(db): State<Database>,
    Path(id): Path<i64>,
    Json(update_req): Json<UpdateCamelRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_camel(db.pool(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/camels/{id}",
    params(
        ("id" = i64, Path, description = "Camel ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Camel deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Camel not found"),
        (status = 409, description = "Camel has published results")
    ),
    tag = "camels"
)]
pub async fn delete_camel(
    State(db): State<Database>,
    Path(id): Path<i64>,
) -> Result<Response, WebError> {
    services::delete_camel(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

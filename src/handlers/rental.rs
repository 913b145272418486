// src/handlers/rental.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{error::AppError, pagination::paginate, validation::from_query},
    config::AppState,
    middleware::body::JsonBody,
    models::rental::{Rental, RentalFilter, RentalPayload, RENTAL_QUERY_SCHEMA, RENTAL_SCHEMA},
};

// POST /api/v1/rental
#[utoipa::path(
    post,
    path = "/api/v1/rental",
    tag = "Rentals",
    request_body = RentalPayload,
    responses(
        (status = 201, description = "Locadora cadastrada", body = Rental),
        (status = 400, description = "Payload fora do formato, CNPJ ou CEP inválido"),
        (status = 409, description = "CNPJ em uso ou mais de uma matriz")
    )
)]
pub async fn create_rental(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: RentalPayload = RENTAL_SCHEMA.parse(&body)?;
    let rental = app_state.rental_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental",
    tag = "Rentals",
    responses(
        (status = 200, description = "Envelope paginado com a chave `locadoras`"),
        (status = 400, description = "Filtro fora do formato")
    )
)]
pub async fn list_rentals(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter: RentalFilter = RENTAL_QUERY_SCHEMA.parse(&from_query(params))?;
    let page = app_state.rental_service.list(&filter).await?;
    Ok(Json(paginate::<Rental, Rental>(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental/{id}",
    tag = "Rentals",
    params(("id" = String, Path, description = "Id da locadora (24 hex)")),
    responses(
        (status = 200, body = Rental),
        (status = 400, description = "Id fora do formato"),
        (status = 404, description = "Locadora não encontrada")
    )
)]
pub async fn get_rental(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rental = app_state.rental_service.get(&id).await?;
    Ok(Json(rental))
}

#[utoipa::path(
    put,
    path = "/api/v1/rental/{id}",
    tag = "Rentals",
    request_body = RentalPayload,
    params(("id" = String, Path, description = "Id da locadora (24 hex)")),
    responses(
        (status = 200, body = Rental),
        (status = 400, description = "Payload ou id fora do formato"),
        (status = 404, description = "Locadora não encontrada"),
        (status = 409, description = "CNPJ em uso ou mais de uma matriz")
    )
)]
pub async fn update_rental(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: RentalPayload = RENTAL_SCHEMA.parse(&body)?;
    let rental = app_state.rental_service.update(&id, payload).await?;
    Ok(Json(rental))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rental/{id}",
    tag = "Rentals",
    params(("id" = String, Path, description = "Id da locadora (24 hex)")),
    responses(
        (status = 204, description = "Removida"),
        (status = 404, description = "Locadora não encontrada")
    )
)]
pub async fn delete_rental(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.rental_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

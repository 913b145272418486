// src/handlers/car.rs

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::{
        error::AppError,
        pagination::paginate,
        validation::from_query,
    },
    config::AppState,
    middleware::body::JsonBody,
    models::car::{
        Car, CarFilter, CarPatch, CarPayload, CAR_PATCH_SCHEMA, CAR_QUERY_SCHEMA, CAR_SCHEMA,
    },
};

// POST /api/v1/car
#[utoipa::path(
    post,
    path = "/api/v1/car",
    tag = "Cars",
    request_body = CarPayload,
    responses(
        (status = 201, description = "Veículo cadastrado", body = Car),
        (status = 400, description = "Payload fora do formato")
    )
)]
pub async fn create_car(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: CarPayload = CAR_SCHEMA.parse(&body)?;
    let car = app_state.car_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

// GET /api/v1/car
#[utoipa::path(
    get,
    path = "/api/v1/car",
    tag = "Cars",
    responses(
        (status = 200, description = "Envelope paginado com a chave `veiculos`"),
        (status = 400, description = "Filtro fora do formato")
    )
)]
pub async fn list_cars(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter: CarFilter = CAR_QUERY_SCHEMA.parse(&from_query(params))?;
    let page = app_state.car_service.list(&filter).await?;
    Ok(Json(paginate::<Car, Car>(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/car/{id}",
    tag = "Cars",
    params(("id" = String, Path, description = "Id do veículo (24 hex)")),
    responses(
        (status = 200, body = Car),
        (status = 400, description = "Id fora do formato"),
        (status = 404, description = "Veículo não encontrado")
    )
)]
pub async fn get_car(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let car = app_state.car_service.get(&id).await?;
    Ok(Json(car))
}

#[utoipa::path(
    put,
    path = "/api/v1/car/{id}",
    tag = "Cars",
    request_body = CarPayload,
    params(("id" = String, Path, description = "Id do veículo (24 hex)")),
    responses(
        (status = 200, body = Car),
        (status = 400, description = "Payload ou id fora do formato"),
        (status = 404, description = "Veículo não encontrado")
    )
)]
pub async fn update_car(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: CarPayload = CAR_SCHEMA.parse(&body)?;
    let car = app_state.car_service.update(&id, payload).await?;
    Ok(Json(car))
}

#[utoipa::path(
    patch,
    path = "/api/v1/car/{id}",
    tag = "Cars",
    request_body = CarPatch,
    params(("id" = String, Path, description = "Id do veículo (24 hex)")),
    responses(
        (status = 200, body = Car),
        (status = 400, description = "Payload vazio ou fora do formato"),
        (status = 404, description = "Veículo não encontrado")
    )
)]
pub async fn patch_car(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let patch: CarPatch = CAR_PATCH_SCHEMA.parse(&body)?;
    let car = app_state.car_service.patch(&id, patch).await?;
    Ok(Json(car))
}

#[utoipa::path(
    delete,
    path = "/api/v1/car/{id}",
    tag = "Cars",
    params(("id" = String, Path, description = "Id do veículo (24 hex)")),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Veículo não encontrado")
    )
)]
pub async fn delete_car(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.car_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

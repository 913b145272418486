// src/handlers/fleet.rs

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
    models::fleet::{FleetFilter, FleetPayload, RentalFleet, FLEET_QUERY_SCHEMA, FLEET_SCHEMA},
};

// POST /api/v1/rental/{id}/fleet
#[utoipa::path(
    post,
    path = "/api/v1/rental/{id}/fleet",
    tag = "Fleet",
    request_body = FleetPayload,
    params(("id" = String, Path, description = "Id da locadora")),
    responses(
        (status = 201, description = "Carro adicionado à frota", body = RentalFleet),
        (status = 404, description = "Locadora ou carro não encontrado"),
        (status = 409, description = "Placa já em uso")
    )
)]
pub async fn create_fleet(
    State(app_state): State<AppState>,
    Path(rental_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: FleetPayload = FLEET_SCHEMA.parse(&body)?;
    let entry = app_state.fleet_service.create(&rental_id, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental/{id}/fleet",
    tag = "Fleet",
    params(("id" = String, Path, description = "Id da locadora")),
    responses(
        (status = 200, description = "Envelope paginado com a chave `frota`"),
        (status = 404, description = "Locadora não encontrada")
    )
)]
pub async fn list_fleet(
    State(app_state): State<AppState>,
    Path(rental_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter: FleetFilter = FLEET_QUERY_SCHEMA.parse(&from_query(params))?;
    let page = app_state.fleet_service.list(&rental_id, &filter).await?;
    Ok(Json(paginate::<RentalFleet, RentalFleet>(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental/{id}/fleet/{idFleet}",
    tag = "Fleet",
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idFleet" = String, Path, description = "Id do item da frota")
    ),
    responses(
        (status = 200, body = RentalFleet),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_fleet(
    State(app_state): State<AppState>,
    Path((rental_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let entry = app_state.fleet_service.get(&rental_id, &id).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    put,
    path = "/api/v1/rental/{id}/fleet/{idFleet}",
    tag = "Fleet",
    request_body = FleetPayload,
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idFleet" = String, Path, description = "Id do item da frota")
    ),
    responses(
        (status = 200, body = RentalFleet),
        (status = 404, description = "Não encontrado"),
        (status = 409, description = "Placa já em uso")
    )
)]
pub async fn update_fleet(
    State(app_state): State<AppState>,
    Path((rental_id, id)): Path<(String, String)>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: FleetPayload = FLEET_SCHEMA.parse(&body)?;
    let entry = app_state.fleet_service.update(&rental_id, &id, payload).await?;
    Ok(Json(entry))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rental/{id}/fleet/{idFleet}",
    tag = "Fleet",
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idFleet" = String, Path, description = "Id do item da frota")
    ),
    responses(
        (status = 204, description = "Removido"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn delete_fleet(
    State(app_state): State<AppState>,
    Path((rental_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    app_state.fleet_service.delete(&rental_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

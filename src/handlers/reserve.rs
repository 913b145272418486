// src/handlers/reserve.rs
//
// Todas as rotas de reserva passam pelo `auth_guard`.

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
    middleware::{auth::AuthenticatedUser, body::JsonBody},
    models::reserve::{Reserve, ReserveFilter, ReservePayload, RESERVE_QUERY_SCHEMA, RESERVE_SCHEMA},
};

// POST /api/v1/rental/{id}/reserve
#[utoipa::path(
    post,
    path = "/api/v1/rental/{id}/reserve",
    tag = "Reserves",
    request_body = ReservePayload,
    params(("id" = String, Path, description = "Id da locadora")),
    responses(
        (status = 201, description = "Reserva criada", body = Reserve),
        (status = 400, description = "Período inválido, usuário não habilitado ou carro indisponível"),
        (status = 401, description = "Não autorizado"),
        (status = 409, description = "Período já reservado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_reserve(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(rental_id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: ReservePayload = RESERVE_SCHEMA.parse(&body)?;
    let reserve = app_state
        .reserve_service
        .create(&rental_id, &user, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(reserve)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental/{id}/reserve",
    tag = "Reserves",
    params(("id" = String, Path, description = "Id da locadora")),
    responses(
        (status = 200, description = "Envelope paginado com a chave `reservas`"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_reserves(
    State(app_state): State<AppState>,
    Path(rental_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter: ReserveFilter = RESERVE_QUERY_SCHEMA.parse(&from_query(params))?;
    let page = app_state.reserve_service.list(&rental_id, &filter).await?;
    Ok(Json(paginate::<Reserve, Reserve>(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rental/{id}/reserve/{idReserve}",
    tag = "Reserves",
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idReserve" = String, Path, description = "Id da reserva")
    ),
    responses(
        (status = 200, body = Reserve),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_reserve(
    State(app_state): State<AppState>,
    Path((rental_id, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let reserve = app_state.reserve_service.get(&rental_id, &id).await?;
    Ok(Json(reserve))
}

#[utoipa::path(
    put,
    path = "/api/v1/rental/{id}/reserve/{idReserve}",
    tag = "Reserves",
    request_body = ReservePayload,
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idReserve" = String, Path, description = "Id da reserva")
    ),
    responses(
        (status = 200, body = Reserve),
        (status = 404, description = "Não encontrada"),
        (status = 409, description = "Período já reservado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_reserve(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((rental_id, id)): Path<(String, String)>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: ReservePayload = RESERVE_SCHEMA.parse(&body)?;
    let reserve = app_state
        .reserve_service
        .update(&rental_id, &id, &user, payload)
        .await?;
    Ok(Json(reserve))
}

#[utoipa::path(
    delete,
    path = "/api/v1/rental/{id}/reserve/{idReserve}",
    tag = "Reserves",
    params(
        ("id" = String, Path, description = "Id da locadora"),
        ("idReserve" = String, Path, description = "Id da reserva")
    ),
    responses(
        (status = 204, description = "Removida"),
        (status = 404, description = "Não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_reserve(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path((rental_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    app_state.reserve_service.delete(&rental_id, &id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}

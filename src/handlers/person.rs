// src/handlers/person.rs

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
    models::person::{
        PersonFilter, PersonPayload, PersonResponse, PersonUpdate, PERSON_QUERY_SCHEMA,
        PERSON_SCHEMA, PERSON_UPDATE_SCHEMA,
    },
};

// POST /api/v1/people
#[utoipa::path(
    post,
    path = "/api/v1/people",
    tag = "People",
    request_body = PersonPayload,
    responses(
        (status = 201, description = "Pessoa cadastrada", body = PersonResponse),
        (status = 400, description = "Payload fora do formato, menor de idade ou CPF inválido"),
        (status = 409, description = "CPF ou e-mail já em uso")
    )
)]
pub async fn create_person(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: PersonPayload = PERSON_SCHEMA.parse(&body)?;
    let person = app_state.person_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(PersonResponse::from(person))))
}

// GET /api/v1/people
#[utoipa::path(
    get,
    path = "/api/v1/people",
    tag = "People",
    responses(
        (status = 200, description = "Envelope paginado com a chave `pessoas`"),
        (status = 400, description = "Filtro fora do formato")
    )
)]
pub async fn list_people(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter: PersonFilter = PERSON_QUERY_SCHEMA.parse(&from_query(params))?;
    let page = app_state.person_service.list(&filter).await?;
    Ok(Json(paginate::<_, PersonResponse>(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = String, Path, description = "Id da pessoa (24 hex)")),
    responses(
        (status = 200, body = PersonResponse),
        (status = 400, description = "Id fora do formato"),
        (status = 404, description = "Pessoa não encontrada")
    )
)]
pub async fn get_person(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let person = app_state.person_service.get(&id).await?;
    Ok(Json(PersonResponse::from(person)))
}

#[utoipa::path(
    put,
    path = "/api/v1/people/{id}",
    tag = "People",
    request_body = PersonUpdate,
    params(("id" = String, Path, description = "Id da pessoa (24 hex)")),
    responses(
        (status = 200, body = PersonResponse),
        (status = 400, description = "Payload vazio ou fora do formato"),
        (status = 404, description = "Pessoa não encontrada"),
        (status = 409, description = "CPF ou e-mail já em uso")
    )
)]
pub async fn update_person(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let update: PersonUpdate = PERSON_UPDATE_SCHEMA.parse(&body)?;
    let person = app_state.person_service.update(&id, update).await?;
    Ok(Json(PersonResponse::from(person)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/people/{id}",
    tag = "People",
    params(("id" = String, Path, description = "Id da pessoa (24 hex)")),
    responses(
        (status = 204, description = "Removida"),
        (status = 404, description = "Pessoa não encontrada")
    )
)]
pub async fn delete_person(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    app_state.person_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::body::JsonBody,
    models::auth::{AuthenticatePayload, AUTHENTICATE_SCHEMA},
};

// POST /api/v1/authenticate
#[utoipa::path(
    post,
    path = "/api/v1/authenticate",
    tag = "Auth",
    request_body = AuthenticatePayload,
    responses(
        (status = 204, description = "Autenticado; o JWT vai no cabeçalho `token`"),
        (status = 400, description = "Payload fora do formato"),
        (status = 401, description = "E-mail ou senha inválidos")
    )
)]
pub async fn authenticate(
    State(app_state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let payload: AuthenticatePayload = AUTHENTICATE_SCHEMA.parse(&body)?;
    let token = app_state
        .auth_service
        .authenticate(&payload.email, &payload.senha)
        .await?;

    Ok((StatusCode::NO_CONTENT, [("token", token)]))
}

// src/middleware/body.rs

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::Value;

use crate::common::error::AppError;

/// Corpo JSON ainda não tipado; o schema da rota decide o formato.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid("Bad Request", e.body_text()))?;

        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(AppError::MissingBody);
        }

        serde_json::from_slice(&bytes)
            .map(JsonBody)
            .map_err(|e| AppError::invalid("SyntaxError", format!("Malformed JSON body: {}", e)))
    }
}

// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    // Erros de formato do payload (schema), todos de uma vez
    #[error("Validation failed")]
    ValidationError(ValidationErrors),

    #[error("Field '{0}' is outside the standard format")]
    InvalidField(String),

    #[error("Value {0} not found")]
    NotFound(String),

    // Regra de negócio violada (CPF inválido, CNPJ duplicado, mais de uma matriz...)
    #[error("{message}")]
    InvalidValue {
        kind: String,
        message: String,
        conflict: bool,
    },

    #[error("Request body is incomplete")]
    MissingBody,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or missing authentication token")]
    InvalidToken,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Erro na consulta de CEP: {0}")]
    PostalCodeError(#[from] reqwest::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Violação de regra respondida com 400.
    pub fn invalid(kind: &str, message: impl Into<String>) -> Self {
        AppError::InvalidValue {
            kind: kind.to_string(),
            message: message.into(),
            conflict: false,
        }
    }

    /// Violação de regra respondida com 409.
    pub fn conflict(kind: &str, message: impl Into<String>) -> Self {
        AppError::InvalidValue {
            kind: kind.to_string(),
            message: message.into(),
            conflict: true,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidField(_)
            | AppError::MissingBody => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidValue { conflict: true, .. } => StatusCode::CONFLICT,
            AppError::InvalidValue { conflict: false, .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::ValidationError(errors) => json!({
                "name": "ValidationError",
                "details": errors.details(),
            }),
            AppError::InvalidValue { kind, message, .. } => json!({
                "name": kind,
                "message": message,
            }),
            AppError::InvalidField(_)
            | AppError::NotFound(_)
            | AppError::MissingBody
            | AppError::InvalidCredentials
            | AppError::InvalidToken => json!({ "message": self.to_string() }),

            // Todo o resto vira 500. O detalhe fica só no log.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                json!({ "message": "Unexpected internal error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_public_contract() {
        assert_eq!(
            AppError::InvalidField("id".into()).to_string(),
            "Field 'id' is outside the standard format"
        );
        assert_eq!(
            AppError::NotFound("6171508962f47a7a91938d30".into()).to_string(),
            "Value 6171508962f47a7a91938d30 not found"
        );
        assert_eq!(AppError::MissingBody.to_string(), "Request body is incomplete");
    }

    #[test]
    fn conflict_flag_selects_status() {
        assert_eq!(AppError::conflict("conflict", "x").status(), StatusCode::CONFLICT);
        assert_eq!(AppError::invalid("invalid", "x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

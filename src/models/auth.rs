// src/models/auth.rs

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::validation::{Field, Schema},
    models::person::Habilitado,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthenticatePayload {
    #[schema(example = "joazinho@email.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub senha: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (ID da pessoa)
    pub email: String,
    pub habilitado: Habilitado,
    pub exp: usize,
    pub iat: usize,
}

pub static AUTHENTICATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("email").email().required())
        .field(Field::string("senha").min_length(6).required())
});

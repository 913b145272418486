// src/common/id.rs

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::error::AppError;

pub const ID_LENGTH: usize = 24;

/// Identificador de documento: 24 caracteres hexadecimais.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// 4 bytes do instante de criação + 8 bytes aleatórios.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let random = Uuid::new_v4();
        let tail: String = random.as_bytes()[..8]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        Self(format!("{seconds:08x}{tail}"))
    }

    pub fn is_valid(raw: &str) -> bool {
        raw.len() == ID_LENGTH && raw.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Valida o formato antes de qualquer acesso ao banco.
    /// `field` é o nome reportado no erro (`id`, `idFleet`...).
    pub fn parse(raw: &str, field: &str) -> Result<Self, AppError> {
        if !Self::is_valid(raw) {
            return Err(AppError::InvalidField(field.to_string()));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert!(DocumentId::is_valid(a.as_str()));
        assert_ne!(a, b);
    }

    #[test]
    fn short_id_is_an_invalid_field() {
        match DocumentId::parse("12", "id") {
            Err(AppError::InvalidField(field)) => assert_eq!(field, "id"),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(DocumentId::parse("6171508962f47a7a91938d3g", "id").is_err());
    }

    #[test]
    fn uppercase_hex_is_normalized() {
        let id = DocumentId::parse("6171508962F47A7A91938D30", "id").unwrap();
        assert_eq!(id.as_str(), "6171508962f47a7a91938d30");
    }
}

// src/services/cep_service.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::common::error::AppError;

/// Endereço devolvido pela consulta de CEP.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PostalAddress {
    #[serde(default)]
    pub cep: String,
    #[serde(default)]
    pub logradouro: String,
    #[serde(default)]
    pub complemento: String,
    #[serde(default)]
    pub bairro: String,
    #[serde(default)]
    pub localidade: String,
    #[serde(default)]
    pub uf: String,
}

#[async_trait]
pub trait PostalCodeLookup: Send + Sync {
    async fn lookup(&self, cep: &str) -> Result<PostalAddress, AppError>;
}

pub fn cep_not_found(cep: &str) -> AppError {
    AppError::invalid("invalid", format!("CEP {} not found", cep))
}

#[derive(Clone)]
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, cep: &str) -> String {
        let digits: String = cep.chars().filter(|c| c.is_ascii_digit()).collect();
        format!("{}/{}/json/", self.base_url.trim_end_matches('/'), digits)
    }
}

// O ViaCEP responde 200 com `{"erro": true}` para CEP inexistente
fn parse_response(cep: &str, body: Value) -> Result<PostalAddress, AppError> {
    if body.get("erro").is_some() {
        return Err(cep_not_found(cep));
    }
    Ok(serde_json::from_value(body)?)
}

#[async_trait]
impl PostalCodeLookup for ViaCepClient {
    async fn lookup(&self, cep: &str) -> Result<PostalAddress, AppError> {
        let url = self.url_for(cep);
        tracing::debug!("Consultando CEP em {}", url);

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::BAD_REQUEST {
            return Err(cep_not_found(cep));
        }
        let body: Value = response.error_for_status()?.json().await?;
        parse_response(cep, body)
    }
}

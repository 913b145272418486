#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use locadora_api::{
    common::error::AppError,
    config::{AppState, Config},
    db::MemoryDocumentStore,
    routes,
    services::cep_service::{cep_not_found, PostalAddress, PostalCodeLookup},
};

pub const UNKNOWN_CEP: &str = "99999-999";

/// Consulta de CEP sem rede: qualquer CEP existe, menos `UNKNOWN_CEP`.
pub struct StubPostalCodes;

#[async_trait]
impl PostalCodeLookup for StubPostalCodes {
    async fn lookup(&self, cep: &str) -> Result<PostalAddress, AppError> {
        if cep == UNKNOWN_CEP {
            return Err(cep_not_found(cep));
        }
        Ok(PostalAddress {
            cep: cep.to_string(),
            logradouro: "Rua General Canabarro".into(),
            complemento: String::new(),
            bairro: "Centro".into(),
            localidade: "Rio Grande".into(),
            uf: "RS".into(),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: None,
        jwt_secret: "segredo-de-teste".into(),
        bind_addr: "127.0.0.1:0".into(),
        cep_base_url: "http://localhost".into(),
        jwt_ttl_secs: 3600,
        db_max_connections: 1,
        bcrypt_cost: 4,
    }
}

pub fn app() -> Router {
    let state = AppState::from_parts(
        test_config(),
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(StubPostalCodes),
    );
    routes::router(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None, None).await
}

pub fn car_payload() -> Value {
    json!({
        "modelo": "GM S10 2.8",
        "cor": "Verde",
        "ano": 2021,
        "acessorios": [
            { "descricao": "Ar-condicionado" },
            { "descricao": "Dir. Hidráulica" }
        ],
        "quantidadePassageiros": 5
    })
}

pub fn person_payload(cpf: &str, email: &str) -> Value {
    json!({
        "nome": "joaozinho ciclano",
        "cpf": cpf,
        "data_nascimento": "03/03/2000",
        "email": email,
        "senha": "123456",
        "habilitado": "sim"
    })
}

pub fn rental_payload(cnpj: &str) -> Value {
    json!({
        "nome": "Localiza Rent a Car",
        "cnpj": cnpj,
        "atividades": "Aluguel de Carros E Gestão de Frotas",
        "endereco": [
            { "cep": "96200-200", "number": "1234", "isFilial": false },
            { "cep": "96200-500", "number": "5678", "complemento": "Loja 2", "isFilial": true }
        ]
    })
}

pub fn messages(body: &Value) -> Vec<String> {
    body["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .filter_map(|d| d["message"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

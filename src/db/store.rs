// src/db/store.rs

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::common::{error::AppError, id::DocumentId, pagination::PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionName {
    Cars,
    People,
    Rentals,
    Fleet,
    Reserves,
}

impl CollectionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Cars => "cars",
            CollectionName::People => "people",
            CollectionName::Rentals => "rentals",
            CollectionName::Fleet => "fleet",
            CollectionName::Reserves => "reserves",
        }
    }
}

/// Índice único do banco. É a última barreira contra duplicidade;
/// os serviços checam antes só para dar uma mensagem por campo.
#[derive(Debug)]
pub struct UniqueIndex {
    pub collection: CollectionName,
    pub field: &'static str,
    pub constraint: &'static str,
    pub label: &'static str,
}

pub const UNIQUE_INDEXES: &[UniqueIndex] = &[
    UniqueIndex {
        collection: CollectionName::People,
        field: "cpf",
        constraint: "documents_people_cpf_key",
        label: "CPF",
    },
    UniqueIndex {
        collection: CollectionName::People,
        field: "email",
        constraint: "documents_people_email_key",
        label: "Email",
    },
    UniqueIndex {
        collection: CollectionName::Rentals,
        field: "cnpj",
        constraint: "documents_rentals_cnpj_key",
        label: "CNPJ",
    },
    UniqueIndex {
        collection: CollectionName::Fleet,
        field: "placa",
        constraint: "documents_fleet_placa_key",
        label: "Plate",
    },
];

impl UniqueIndex {
    pub fn by_constraint(constraint: &str) -> Option<&'static UniqueIndex> {
        UNIQUE_INDEXES.iter().find(|i| i.constraint == constraint)
    }

    pub fn for_collection(collection: CollectionName) -> impl Iterator<Item = &'static UniqueIndex> {
        UNIQUE_INDEXES.iter().filter(move |i| i.collection == collection)
    }

    /// Converte a violação no mesmo 409 que a checagem do serviço produziria.
    pub fn violation(&self, doc: &Value) -> AppError {
        let value = doc
            .get(self.field)
            .and_then(Value::as_str)
            .unwrap_or_default();
        AppError::conflict("Conflict", format!("{} {} already in use", self.label, value))
    }
}

/// Filtro tipado traduzido para o banco de documentos:
/// `matching` é um documento de contenção (igualdade exata em campos diretos,
/// pertencimento em listas), `any_of` exige ao menos uma alternativa e
/// `exclude_id` ignora o próprio registro durante um update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub matching: Map<String, Value>,
    pub any_of: Vec<Value>,
    pub exclude_id: Option<DocumentId>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.matching.insert(key.to_string(), value.into());
        self
    }

    /// Só adiciona o filtro quando o valor veio preenchido.
    pub fn with_opt<V: Into<Value>>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    pub fn or_matching(mut self, alternative: Value) -> Self {
        self.any_of.push(alternative);
        self
    }

    pub fn excluding(mut self, id: Option<&DocumentId>) -> Self {
        self.exclude_id = id.cloned();
        self
    }

    pub fn matches(&self, id: &DocumentId, doc: &Value) -> bool {
        if self.exclude_id.as_ref() == Some(id) {
            return false;
        }
        if !contains(doc, &Value::Object(self.matching.clone())) {
            return false;
        }
        self.any_of.is_empty() || self.any_of.iter().any(|alt| contains(doc, alt))
    }
}

/// Mesma semântica do operador `@>` do JSONB.
pub fn contains(doc: &Value, pattern: &Value) -> bool {
    match (doc, pattern) {
        (Value::Object(d), Value::Object(p)) => p
            .iter()
            .all(|(key, expected)| d.get(key).is_some_and(|found| contains(found, expected))),
        (Value::Array(d), Value::Array(p)) => p
            .iter()
            .all(|expected| d.iter().any(|found| contains(found, expected))),
        (Value::Array(d), p) if !p.is_object() => d.iter().any(|found| found == p),
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (a, b) => a == b,
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawPage {
    pub docs: Vec<Value>,
    pub total: u64,
}

/// Driver do banco de documentos. Cada documento carrega o próprio `_id`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Value, AppError>;

    async fn find_by_id(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<Option<Value>, AppError>;

    async fn find_one(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Option<Value>, AppError>;

    async fn find_all(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Vec<Value>, AppError>;

    async fn find_page(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
        page: PageRequest,
    ) -> Result<RawPage, AppError>;

    async fn replace(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Option<Value>, AppError>;

    async fn delete(&self, collection: CollectionName, id: &DocumentId) -> Result<bool, AppError>;
}

// src/models/fleet.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        id::DocumentId,
        pagination::{Listing, PageRequest},
        validation::{Field, Schema, ID_PATTERN},
    },
    db::store::{CollectionName, Criteria},
    models::Document,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FleetStatus {
    #[serde(rename = "disponível")]
    Disponivel,
    #[serde(rename = "indisponível")]
    Indisponivel,
}

impl FleetStatus {
    pub const VALUES: &'static [&'static str] = &["disponível", "indisponível"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FleetStatus::Disponivel => "disponível",
            FleetStatus::Indisponivel => "indisponível",
        }
    }
}

/// Um carro na frota de uma locadora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RentalFleet {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: DocumentId,
    #[schema(value_type = String)]
    pub id_carro: DocumentId,
    #[schema(value_type = String)]
    pub id_locadora: DocumentId,
    pub status: FleetStatus,
    #[schema(example = "FPH3204")]
    pub placa: String,
    #[schema(value_type = f64, example = 150.5)]
    pub valor_diaria: Decimal,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
    #[serde(rename = "dataAtualizacao")]
    pub data_atualizacao: DateTime<Utc>,
}

impl Document for RentalFleet {
    const COLLECTION: CollectionName = CollectionName::Fleet;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Listing for RentalFleet {
    const ITEMS_KEY: &'static str = "frota";
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FleetPayload {
    #[schema(example = "6171508962f47a7a91938d30")]
    pub id_carro: String,
    pub status: FleetStatus,
    #[schema(value_type = f64, example = 150.5)]
    pub valor_diaria: Decimal,
    #[schema(example = "FPH3204")]
    pub placa: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FleetFilter {
    pub id_carro: Option<String>,
    pub status: Option<FleetStatus>,
    pub placa: Option<String>,
    pub valor_diaria: Option<Decimal>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FleetFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }

    /// Sempre restrito à locadora da rota.
    pub fn criteria(&self, rental_id: &DocumentId) -> Criteria {
        let valor = self
            .valor_diaria
            .and_then(|v| serde_json::to_value(v).ok());

        Criteria::new()
            .with("id_locadora", rental_id.as_str())
            .with_opt("id_carro", self.id_carro.as_ref().map(|id| id.to_ascii_lowercase()))
            .with_opt("status", self.status.map(|s| s.as_str()))
            .with_opt("placa", self.placa.clone())
            .with_opt("valor_diaria", valor)
    }
}

/// Teto da diária; mantém `valor_final` dentro da faixa de `Decimal`.
pub const MAX_DAILY_RATE: f64 = 1_000_000_000.0;

pub static FLEET_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("id_carro").pattern(&ID_PATTERN).required())
        .field(Field::string("status").one_of(FleetStatus::VALUES).required())
        .field(Field::number("valor_diaria").min(0.0).max(MAX_DAILY_RATE).required())
        .field(Field::string("placa").required())
});

pub static FLEET_QUERY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("id_carro").pattern(&ID_PATTERN))
        .field(Field::string("status").one_of(FleetStatus::VALUES))
        .field(Field::string("placa"))
        .field(Field::number("valor_diaria").min(0.0).max(MAX_DAILY_RATE))
        .paged()
});

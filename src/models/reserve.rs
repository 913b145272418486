// src/models/reserve.rs

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        dates::br_date,
        id::DocumentId,
        pagination::{Listing, PageRequest},
        validation::{Field, Schema, ID_PATTERN},
    },
    db::store::{CollectionName, Criteria},
    models::Document,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reserve {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: DocumentId,
    #[schema(value_type = String)]
    pub id_user: DocumentId,
    #[schema(value_type = String)]
    pub id_carro: DocumentId,
    #[schema(value_type = String)]
    pub id_locadora: DocumentId,
    #[serde(with = "br_date")]
    #[schema(value_type = String, example = "20/11/2021")]
    pub data_inicio: NaiveDate,
    #[serde(with = "br_date")]
    #[schema(value_type = String, example = "23/11/2021")]
    pub data_fim: NaiveDate,
    #[schema(value_type = f64)]
    pub valor_final: Decimal,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
}

impl Reserve {
    /// Intervalos fechados: dividir um dia já é conflito.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.data_inicio <= end && start <= self.data_fim
    }
}

impl Document for Reserve {
    const COLLECTION: CollectionName = CollectionName::Reserves;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Listing for Reserve {
    const ITEMS_KEY: &'static str = "reservas";
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReservePayload {
    #[schema(example = "6171508962f47a7a91938d30")]
    pub id_carro: String,
    #[schema(example = "20/11/2021")]
    pub data_inicio: String,
    #[schema(example = "23/11/2021")]
    pub data_fim: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReserveFilter {
    pub id_user: Option<String>,
    pub id_carro: Option<String>,
    pub data_inicio: Option<String>,
    pub data_fim: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl ReserveFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }

    pub fn criteria(&self, rental_id: &DocumentId) -> Criteria {
        Criteria::new()
            .with("id_locadora", rental_id.as_str())
            .with_opt("id_user", self.id_user.as_ref().map(|id| id.to_ascii_lowercase()))
            .with_opt("id_carro", self.id_carro.as_ref().map(|id| id.to_ascii_lowercase()))
            .with_opt("data_inicio", self.data_inicio.clone())
            .with_opt("data_fim", self.data_fim.clone())
    }
}

pub static RESERVE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(
            Field::string("id_carro")
                .pattern(&ID_PATTERN)
                .pattern_message("Invalid id_carro")
                .required(),
        )
        .field(Field::date("data_inicio").required())
        .field(Field::date("data_fim").required())
});

pub static RESERVE_QUERY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("id_user").pattern(&ID_PATTERN))
        .field(Field::string("id_carro").pattern(&ID_PATTERN))
        .field(Field::date("data_inicio"))
        .field(Field::date("data_fim"))
        .paged()
});

// src/models/car.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    common::{
        id::DocumentId,
        pagination::{Listing, PageRequest},
        validation::{Field, Schema},
    },
    db::store::{CollectionName, Criteria},
    models::Document,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Accessory {
    #[schema(example = "Ar-condicionado")]
    pub descricao: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(rename = "_id")]
    #[schema(value_type = String, example = "6171508962f47a7a91938d30")]
    pub id: DocumentId,
    pub modelo: String,
    pub cor: String,
    pub ano: i32,
    pub acessorios: Vec<Accessory>,
    pub quantidade_passageiros: u32,
    pub data_criacao: DateTime<Utc>,
}

impl Document for Car {
    const COLLECTION: CollectionName = CollectionName::Cars;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Listing for Car {
    const ITEMS_KEY: &'static str = "veiculos";
}

// POST / PUT
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    #[schema(example = "GM S10 2.8")]
    pub modelo: String,
    #[schema(example = "Verde")]
    pub cor: String,
    #[schema(example = 2021)]
    pub ano: i32,
    pub acessorios: Vec<Accessory>,
    #[schema(example = 5)]
    pub quantidade_passageiros: u32,
}

// PATCH: só os campos enviados mudam
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarPatch {
    pub modelo: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,
    pub acessorios: Option<Vec<Accessory>>,
    pub quantidade_passageiros: Option<u32>,
}

impl CarPatch {
    pub fn is_empty(&self) -> bool {
        self.modelo.is_none()
            && self.cor.is_none()
            && self.ano.is_none()
            && self.acessorios.is_none()
            && self.quantidade_passageiros.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilter {
    pub modelo: Option<String>,
    pub cor: Option<String>,
    pub ano: Option<i32>,
    pub acessorio: Option<String>,
    pub descricao: Option<String>,
    pub quantidade_passageiros: Option<u32>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub size: Option<u64>,
    pub start: Option<u64>,
}

impl CarFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit.or(self.size), self.offset.or(self.start))
    }

    pub fn criteria(&self) -> Criteria {
        let accessory = self.descricao.as_ref().or(self.acessorio.as_ref());

        let mut criteria = Criteria::new()
            .with_opt("modelo", self.modelo.clone())
            .with_opt("cor", self.cor.clone())
            .with_opt("ano", self.ano)
            .with_opt("quantidadePassageiros", self.quantidade_passageiros);

        // Pertencimento: basta um acessório com a descrição
        if let Some(descricao) = accessory {
            criteria = criteria.with("acessorios", json!([{ "descricao": descricao }]));
        }
        criteria
    }
}

pub const MIN_YEAR: f64 = 1950.0;
pub const MAX_YEAR: f64 = 2022.0;
pub const MAX_PASSENGERS: f64 = u32::MAX as f64;

fn accessory_schema() -> Schema {
    Schema::new().field(Field::string("descricao").required())
}

pub static CAR_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("modelo").required())
        .field(Field::string("cor").required())
        .field(Field::integer("ano").min(MIN_YEAR).max(MAX_YEAR).required())
        .field(Field::array("acessorios", accessory_schema()).min_items(1).required())
        .field(
            Field::integer("quantidadePassageiros")
                .min(1.0)
                .max(MAX_PASSENGERS)
                .required(),
        )
});

pub static CAR_PATCH_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("modelo"))
        .field(Field::string("cor"))
        .field(Field::integer("ano").min(MIN_YEAR).max(MAX_YEAR))
        .field(Field::array("acessorios", accessory_schema()).min_items(1))
        .field(Field::integer("quantidadePassageiros").min(1.0).max(MAX_PASSENGERS))
});

pub static CAR_QUERY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("modelo"))
        .field(Field::string("cor"))
        .field(Field::integer("ano").min(MIN_YEAR).max(MAX_YEAR))
        .field(Field::string("acessorio"))
        .field(Field::string("descricao"))
        .field(Field::integer("quantidadePassageiros").min(1.0).max(MAX_PASSENGERS))
        .field(Field::integer("size").min(1.0))
        .field(Field::integer("start").min(0.0))
        .paged()
});

// src/models/rental.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::{
    common::{
        id::DocumentId,
        pagination::{Listing, PageRequest},
        validation::{Field, Schema, CEP_PATTERN, CNPJ_PATTERN},
    },
    db::store::{CollectionName, Criteria},
    models::Document,
};

/// Endereço já enriquecido com os dados da consulta de CEP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[schema(example = "96200-200")]
    pub cep: String,
    pub logradouro: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complemento: Option<String>,
    pub bairro: String,
    #[schema(example = "1234")]
    pub number: String,
    pub localidade: String,
    pub uf: String,
    #[serde(rename = "isFilial")]
    pub is_filial: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Rental {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: DocumentId,
    #[schema(example = "Localiza Rent a Car")]
    pub nome: String,
    #[schema(example = "16.670.085/0001-55")]
    pub cnpj: String,
    #[schema(example = "Aluguel de Carros E Gestão de Frotas")]
    pub atividades: String,
    pub endereco: Vec<Address>,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
}

impl Document for Rental {
    const COLLECTION: CollectionName = CollectionName::Rentals;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

impl Listing for Rental {
    const ITEMS_KEY: &'static str = "locadoras";
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddressPayload {
    #[schema(example = "96200-200")]
    pub cep: String,
    #[schema(example = "1234")]
    pub number: String,
    pub complemento: Option<String>,
    #[serde(rename = "isFilial")]
    pub is_filial: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RentalPayload {
    pub nome: String,
    pub cnpj: String,
    pub atividades: String,
    pub endereco: Vec<AddressPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RentalFilter {
    pub nome: Option<String>,
    pub cnpj: Option<String>,
    pub atividades: Option<String>,
    pub cep: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl RentalFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }

    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new()
            .with_opt("nome", self.nome.clone())
            .with_opt("cnpj", self.cnpj.clone())
            .with_opt("atividades", self.atividades.clone());
        if let Some(cep) = &self.cep {
            criteria = criteria.with("endereco", json!([{ "cep": cep }]));
        }
        criteria
    }
}

pub static RENTAL_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    let address = Schema::new()
        .field(Field::string("cep").pattern(&CEP_PATTERN).required())
        .field(Field::string("number").required())
        .field(Field::string("complemento"))
        .field(Field::boolean("isFilial").required());

    Schema::new()
        .field(Field::string("nome").required())
        .field(Field::string("cnpj").pattern(&CNPJ_PATTERN).required())
        .field(Field::string("atividades").required())
        .field(Field::array("endereco", address).min_items(1).required())
});

pub static RENTAL_QUERY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("nome"))
        .field(Field::string("cnpj").pattern(&CNPJ_PATTERN))
        .field(Field::string("atividades"))
        .field(Field::string("cep").pattern(&CEP_PATTERN))
        .paged()
});

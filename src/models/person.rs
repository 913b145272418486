// src/models/person.rs

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::{
        dates::br_date,
        id::DocumentId,
        pagination::{Listing, PageRequest},
        validation::{Field, Schema, CPF_PATTERN},
    },
    db::store::{CollectionName, Criteria},
    models::Document,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Habilitado {
    #[serde(rename = "sim")]
    Sim,
    #[serde(rename = "não")]
    Nao,
}

impl Habilitado {
    pub const VALUES: &'static [&'static str] = &["sim", "não"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Habilitado::Sim => "sim",
            Habilitado::Nao => "não",
        }
    }
}

/// Documento armazenado. `senha` guarda o hash bcrypt e nunca sai na resposta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub nome: String,
    pub cpf: String,
    #[serde(with = "br_date")]
    pub data_nascimento: NaiveDate,
    pub email: String,
    pub senha: String,
    pub habilitado: Habilitado,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
}

impl Document for Person {
    const COLLECTION: CollectionName = CollectionName::People;

    fn id(&self) -> &DocumentId {
        &self.id
    }
}

// O que a API devolve (lista de campos permitidos)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PersonResponse {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: DocumentId,
    pub nome: String,
    pub cpf: String,
    #[serde(with = "br_date")]
    #[schema(value_type = String, example = "03/03/2000")]
    pub data_nascimento: NaiveDate,
    pub email: String,
    pub habilitado: Habilitado,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: DateTime<Utc>,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            nome: p.nome,
            cpf: p.cpf,
            data_nascimento: p.data_nascimento,
            email: p.email,
            habilitado: p.habilitado,
            data_criacao: p.data_criacao,
        }
    }
}

impl Listing for PersonResponse {
    const ITEMS_KEY: &'static str = "pessoas";
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PersonPayload {
    #[schema(example = "joaozinho ciclano")]
    pub nome: String,
    #[schema(example = "131.147.860-49")]
    pub cpf: String,
    #[schema(example = "03/03/2000")]
    pub data_nascimento: String,
    #[schema(example = "joazinho@email.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub senha: String,
    pub habilitado: Habilitado,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PersonUpdate {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<String>,
    pub email: Option<String>,
    pub senha: Option<String>,
    pub habilitado: Option<Habilitado>,
}

impl PersonUpdate {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none()
            && self.cpf.is_none()
            && self.data_nascimento.is_none()
            && self.email.is_none()
            && self.senha.is_none()
            && self.habilitado.is_none()
    }
}

// Sem `senha`: a senha não é campo de busca
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonFilter {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub data_nascimento: Option<String>,
    pub email: Option<String>,
    pub habilitado: Option<Habilitado>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PersonFilter {
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.limit, self.offset)
    }

    pub fn criteria(&self) -> Criteria {
        Criteria::new()
            .with_opt("nome", self.nome.clone())
            .with_opt("cpf", self.cpf.clone())
            .with_opt("data_nascimento", self.data_nascimento.clone())
            .with_opt("email", self.email.clone())
            .with_opt("habilitado", self.habilitado.map(|h| h.as_str()))
    }
}

pub static PERSON_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("nome").required())
        .field(Field::string("cpf").pattern(&CPF_PATTERN).required())
        .field(Field::date("data_nascimento").required())
        .field(Field::string("email").email().required())
        .field(Field::string("senha").min_length(6).required())
        .field(Field::string("habilitado").one_of(Habilitado::VALUES).required())
});

pub static PERSON_UPDATE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("nome"))
        .field(Field::string("cpf").pattern(&CPF_PATTERN))
        .field(Field::date("data_nascimento"))
        .field(Field::string("email").email())
        .field(Field::string("senha").min_length(6))
        .field(Field::string("habilitado").one_of(Habilitado::VALUES))
});

// Sem `senha`: a senha nunca é critério de busca.
pub static PERSON_QUERY_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new()
        .field(Field::string("nome"))
        .field(Field::string("cpf").pattern(&CPF_PATTERN))
        .field(Field::date("data_nascimento"))
        .field(Field::string("email").email())
        .field(Field::string("habilitado").one_of(Habilitado::VALUES))
        .paged()
});

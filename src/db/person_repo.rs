// src/db/person_repo.rs

use std::sync::Arc;

use serde_json::json;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{
        repository::Repository,
        store::{Criteria, DocumentStore},
    },
    models::person::{Person, PersonFilter},
};

#[derive(Clone)]
pub struct PersonRepository {
    docs: Repository<Person>,
}

impl PersonRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs: Repository::new(store),
        }
    }

    pub async fn create(&self, person: &Person) -> Result<Person, AppError> {
        self.docs.insert(person).await
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Person>, AppError> {
        self.docs.find_by_id(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Person>, AppError> {
        self.docs.find_one(&Criteria::new().with("email", email)).await
    }

    /// Qualquer outra pessoa com o mesmo e-mail OU o mesmo CPF.
    pub async fn find_by_email_or_cpf(
        &self,
        email: &str,
        cpf: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<Option<Person>, AppError> {
        let criteria = Criteria::new()
            .or_matching(json!({ "email": email }))
            .or_matching(json!({ "cpf": cpf }))
            .excluding(exclude_id);
        self.docs.find_one(&criteria).await
    }

    pub async fn list(&self, filter: &PersonFilter) -> Result<Page<Person>, AppError> {
        self.docs.find_page(&filter.criteria(), filter.page()).await
    }

    pub async fn update(&self, person: &Person) -> Result<Option<Person>, AppError> {
        self.docs.replace(person).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.docs.delete(id).await
    }
}

// src/db/rental_repo.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{
        repository::Repository,
        store::{Criteria, DocumentStore},
    },
    models::rental::{Rental, RentalFilter},
};

#[derive(Clone)]
pub struct RentalRepository {
    docs: Repository<Rental>,
}

impl RentalRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs: Repository::new(store),
        }
    }

    pub async fn create(&self, rental: &Rental) -> Result<Rental, AppError> {
        self.docs.insert(rental).await
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Rental>, AppError> {
        self.docs.find_by_id(id).await
    }

    pub async fn find_by_cnpj(
        &self,
        cnpj: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<Option<Rental>, AppError> {
        let criteria = Criteria::new().with("cnpj", cnpj).excluding(exclude_id);
        self.docs.find_one(&criteria).await
    }

    pub async fn list(&self, filter: &RentalFilter) -> Result<Page<Rental>, AppError> {
        self.docs.find_page(&filter.criteria(), filter.page()).await
    }

    pub async fn update(&self, rental: &Rental) -> Result<Option<Rental>, AppError> {
        self.docs.replace(rental).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.docs.delete(id).await
    }
}

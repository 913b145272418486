// src/db/reserve_repo.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{
        repository::Repository,
        store::{Criteria, DocumentStore},
    },
    models::reserve::{Reserve, ReserveFilter},
};

#[derive(Clone)]
pub struct ReserveRepository {
    docs: Repository<Reserve>,
}

impl ReserveRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs: Repository::new(store),
        }
    }

    pub async fn create(&self, reserve: &Reserve) -> Result<Reserve, AppError> {
        self.docs.insert(reserve).await
    }

    pub async fn find_in_rental(
        &self,
        rental_id: &DocumentId,
        id: &DocumentId,
    ) -> Result<Option<Reserve>, AppError> {
        Ok(self
            .docs
            .find_by_id(id)
            .await?
            .filter(|reserve| &reserve.id_locadora == rental_id))
    }

    /// Reservas do mesmo carro na mesma locadora (menos a que está sendo editada).
    pub async fn find_by_car(
        &self,
        rental_id: &DocumentId,
        car_id: &DocumentId,
        exclude_id: Option<&DocumentId>,
    ) -> Result<Vec<Reserve>, AppError> {
        let criteria = Criteria::new()
            .with("id_locadora", rental_id.as_str())
            .with("id_carro", car_id.as_str())
            .excluding(exclude_id);
        self.docs.find_all(&criteria).await
    }

    pub async fn find_by_user(
        &self,
        user_id: &DocumentId,
        exclude_id: Option<&DocumentId>,
    ) -> Result<Vec<Reserve>, AppError> {
        let criteria = Criteria::new()
            .with("id_user", user_id.as_str())
            .excluding(exclude_id);
        self.docs.find_all(&criteria).await
    }

    pub async fn list(
        &self,
        rental_id: &DocumentId,
        filter: &ReserveFilter,
    ) -> Result<Page<Reserve>, AppError> {
        self.docs
            .find_page(&filter.criteria(rental_id), filter.page())
            .await
    }

    pub async fn update(&self, reserve: &Reserve) -> Result<Option<Reserve>, AppError> {
        self.docs.replace(reserve).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.docs.delete(id).await
    }
}

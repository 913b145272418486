// src/db/fleet_repo.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{
        repository::Repository,
        store::{Criteria, DocumentStore},
    },
    models::fleet::{FleetFilter, RentalFleet},
};

#[derive(Clone)]
pub struct FleetRepository {
    docs: Repository<RentalFleet>,
}

impl FleetRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs: Repository::new(store),
        }
    }

    pub async fn create(&self, entry: &RentalFleet) -> Result<RentalFleet, AppError> {
        self.docs.insert(entry).await
    }

    /// Busca pelo id dentro da frota de uma locadora específica.
    pub async fn find_in_rental(
        &self,
        rental_id: &DocumentId,
        id: &DocumentId,
    ) -> Result<Option<RentalFleet>, AppError> {
        Ok(self
            .docs
            .find_by_id(id)
            .await?
            .filter(|entry| &entry.id_locadora == rental_id))
    }

    pub async fn find_by_car(
        &self,
        rental_id: &DocumentId,
        car_id: &DocumentId,
    ) -> Result<Option<RentalFleet>, AppError> {
        let criteria = Criteria::new()
            .with("id_locadora", rental_id.as_str())
            .with("id_carro", car_id.as_str());
        self.docs.find_one(&criteria).await
    }

    pub async fn find_by_plate(
        &self,
        placa: &str,
        exclude_id: Option<&DocumentId>,
    ) -> Result<Option<RentalFleet>, AppError> {
        let criteria = Criteria::new().with("placa", placa).excluding(exclude_id);
        self.docs.find_one(&criteria).await
    }

    pub async fn list(
        &self,
        rental_id: &DocumentId,
        filter: &FleetFilter,
    ) -> Result<Page<RentalFleet>, AppError> {
        self.docs
            .find_page(&filter.criteria(rental_id), filter.page())
            .await
    }

    pub async fn update(&self, entry: &RentalFleet) -> Result<Option<RentalFleet>, AppError> {
        self.docs.replace(entry).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.docs.delete(id).await
    }
}

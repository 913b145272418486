// src/db/car_repo.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::Page},
    db::{repository::Repository, store::DocumentStore},
    models::car::{Car, CarFilter},
};

#[derive(Clone)]
pub struct CarRepository {
    docs: Repository<Car>,
}

impl CarRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            docs: Repository::new(store),
        }
    }

    pub async fn create(&self, car: &Car) -> Result<Car, AppError> {
        self.docs.insert(car).await
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Car>, AppError> {
        self.docs.find_by_id(id).await
    }

    pub async fn list(&self, filter: &CarFilter) -> Result<Page<Car>, AppError> {
        self.docs.find_page(&filter.criteria(), filter.page()).await
    }

    pub async fn update(&self, car: &Car) -> Result<Option<Car>, AppError> {
        self.docs.replace(car).await
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.docs.delete(id).await
    }
}

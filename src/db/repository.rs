// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use crate::{
    common::{
        error::AppError,
        id::DocumentId,
        pagination::{Page, PageRequest},
    },
    db::store::{Criteria, DocumentStore},
    models::Document,
};

/// Acesso tipado a uma coleção: serializa/desserializa e delega ao driver.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn insert(&self, doc: &T) -> Result<T, AppError> {
        let body = serde_json::to_value(doc)?;
        let stored = self.store.insert(T::COLLECTION, doc.id(), body).await?;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn find_by_id(&self, id: &DocumentId) -> Result<Option<T>, AppError> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(AppError::from)
    }

    pub async fn find_one(&self, criteria: &Criteria) -> Result<Option<T>, AppError> {
        self.store
            .find_one(T::COLLECTION, criteria)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(AppError::from)
    }

    pub async fn find_all(&self, criteria: &Criteria) -> Result<Vec<T>, AppError> {
        self.store
            .find_all(T::COLLECTION, criteria)
            .await?
            .into_iter()
            .map(|doc| serde_json::from_value(doc).map_err(AppError::from))
            .collect()
    }

    pub async fn find_page(&self, criteria: &Criteria, page: PageRequest) -> Result<Page<T>, AppError> {
        let raw = self.store.find_page(T::COLLECTION, criteria, page).await?;
        let items = raw
            .docs
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<T>, _>>()?;

        Ok(Page {
            items,
            total: raw.total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// Substitui o documento inteiro. `None` se o id não existe mais.
    pub async fn replace(&self, doc: &T) -> Result<Option<T>, AppError> {
        let body = serde_json::to_value(doc)?;
        self.store
            .replace(T::COLLECTION, doc.id(), body)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(AppError::from)
    }

    pub async fn delete(&self, id: &DocumentId) -> Result<bool, AppError> {
        self.store.delete(T::COLLECTION, id).await
    }
}

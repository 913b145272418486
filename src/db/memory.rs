// src/db/memory.rs
//
// Banco de documentos em memória: usado nos testes e quando não há DATABASE_URL.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    common::{error::AppError, id::DocumentId, pagination::PageRequest},
    db::store::{CollectionName, Criteria, DocumentStore, RawPage, UniqueIndex},
};

#[derive(Debug, Clone)]
struct StoredDocument {
    id: DocumentId,
    body: Value,
}

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    // Ordem de inserção = ordem de listagem
    collections: RwLock<HashMap<CollectionName, Vec<StoredDocument>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        collection: CollectionName,
        docs: &[StoredDocument],
        id: &DocumentId,
        body: &Value,
    ) -> Result<(), AppError> {
        for index in UniqueIndex::for_collection(collection) {
            let Some(value) = body.get(index.field) else {
                continue;
            };
            let taken = docs
                .iter()
                .any(|d| &d.id != id && d.body.get(index.field) == Some(value));
            if taken {
                return Err(index.violation(body));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Value, AppError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        Self::check_unique(collection, docs, id, &doc)?;
        docs.push(StoredDocument {
            id: id.clone(),
            body: doc.clone(),
        });
        Ok(doc)
    }

    async fn find_by_id(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<Option<Value>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| &d.id == id))
            .map(|d| d.body.clone()))
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Option<Value>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| criteria.matches(&d.id, &d.body)))
            .map(|d| d.body.clone()))
    }

    async fn find_all(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Vec<Value>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| criteria.matches(&d.id, &d.body))
                    .map(|d| d.body.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_page(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
        page: PageRequest,
    ) -> Result<RawPage, AppError> {
        let matching = self.find_all(collection, criteria).await?;
        let total = matching.len() as u64;
        let docs = matching
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect();
        Ok(RawPage { docs, total })
    }

    async fn replace(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Option<Value>, AppError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();
        let Some(position) = docs.iter().position(|d| &d.id == id) else {
            return Ok(None);
        };
        Self::check_unique(collection, docs, id, &doc)?;
        docs[position].body = doc.clone();
        Ok(Some(doc))
    }

    async fn delete(&self, collection: CollectionName, id: &DocumentId) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| &d.id != id);
        Ok(docs.len() < before)
    }
}

// src/db/postgres.rs
//
// Banco de documentos sobre uma única tabela JSONB (`documents`).

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::{error::AppError, id::DocumentId, pagination::PageRequest},
    db::store::{CollectionName, Criteria, DocumentStore, RawPage, UniqueIndex},
};

// $1 coleção, $2 documento de contenção, $3 alternativas (jsonb array ou NULL), $4 id excluído
const WHERE_CRITERIA: &str = r#"
    WHERE collection = $1
      AND body @> $2
      AND ($3::jsonb IS NULL OR EXISTS (
            SELECT 1 FROM jsonb_array_elements($3::jsonb) AS alt
            WHERE documents.body @> alt.value
      ))
      AND ($4::text IS NULL OR id <> $4)
"#;

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    fn any_of(criteria: &Criteria) -> Option<Value> {
        if criteria.any_of.is_empty() {
            None
        } else {
            Some(Value::Array(criteria.any_of.clone()))
        }
    }

    fn excluded(criteria: &Criteria) -> Option<String> {
        criteria.exclude_id.as_ref().map(|id| id.as_str().to_string())
    }

    // Violação de índice único vira o 409 do campo correspondente
    fn map_write_error(e: sqlx::Error, doc: &Value) -> AppError {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                if let Some(index) = db_err.constraint().and_then(UniqueIndex::by_constraint) {
                    return index.violation(doc);
                }
            }
        }
        e.into()
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Value, AppError> {
        sqlx::query_scalar::<_, Value>(
            "INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3) RETURNING body",
        )
        .bind(collection.as_str())
        .bind(id.as_str())
        .bind(&doc)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &doc))
    }

    async fn find_by_id(
        &self,
        collection: CollectionName,
        id: &DocumentId,
    ) -> Result<Option<Value>, AppError> {
        let body = sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(body)
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Option<Value>, AppError> {
        let sql = format!("SELECT body FROM documents {WHERE_CRITERIA} ORDER BY created_at, id LIMIT 1");
        let body = sqlx::query_scalar::<_, Value>(&sql)
            .bind(collection.as_str())
            .bind(Value::Object(criteria.matching.clone()))
            .bind(Self::any_of(criteria))
            .bind(Self::excluded(criteria))
            .fetch_optional(&self.pool)
            .await?;
        Ok(body)
    }

    async fn find_all(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
    ) -> Result<Vec<Value>, AppError> {
        let sql = format!("SELECT body FROM documents {WHERE_CRITERIA} ORDER BY created_at, id");
        let docs = sqlx::query_scalar::<_, Value>(&sql)
            .bind(collection.as_str())
            .bind(Value::Object(criteria.matching.clone()))
            .bind(Self::any_of(criteria))
            .bind(Self::excluded(criteria))
            .fetch_all(&self.pool)
            .await?;
        Ok(docs)
    }

    async fn find_page(
        &self,
        collection: CollectionName,
        criteria: &Criteria,
        page: PageRequest,
    ) -> Result<RawPage, AppError> {
        let count_sql = format!("SELECT COUNT(*) FROM documents {WHERE_CRITERIA}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(collection.as_str())
            .bind(Value::Object(criteria.matching.clone()))
            .bind(Self::any_of(criteria))
            .bind(Self::excluded(criteria))
            .fetch_one(&self.pool)
            .await?;

        let page_sql = format!(
            "SELECT body FROM documents {WHERE_CRITERIA} ORDER BY created_at, id LIMIT $5 OFFSET $6"
        );
        let docs = sqlx::query_scalar::<_, Value>(&page_sql)
            .bind(collection.as_str())
            .bind(Value::Object(criteria.matching.clone()))
            .bind(Self::any_of(criteria))
            .bind(Self::excluded(criteria))
            .bind(page.limit as i64)
            .bind(page.offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(RawPage {
            docs,
            total: total.max(0) as u64,
        })
    }

    async fn replace(
        &self,
        collection: CollectionName,
        id: &DocumentId,
        doc: Value,
    ) -> Result<Option<Value>, AppError> {
        sqlx::query_scalar::<_, Value>(
            "UPDATE documents SET body = $3 WHERE collection = $1 AND id = $2 RETURNING body",
        )
        .bind(collection.as_str())
        .bind(id.as_str())
        .bind(&doc)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &doc))
    }

    async fn delete(&self, collection: CollectionName, id: &DocumentId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

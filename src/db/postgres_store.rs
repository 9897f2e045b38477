// src/db/postgres_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{types::Json, FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Document, DocumentStore},
};

// Colunas devolvidas por todas as consultas
const DOCUMENT_COLUMNS: &str = "id, doc_key, body, created_at, updated_at";

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    doc_key: Option<String>,
    body: Json<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            key: row.doc_key,
            body: row.body.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Store em Postgres: uma tabela `documents` (JSONB) e uma `counters`.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        key: Option<&str>,
        body: Value,
    ) -> Result<Document, AppError> {
        let sql = format!(
            "INSERT INTO documents (id, collection, doc_key, body) VALUES ($1, $2, $3, $4) RETURNING {}",
            DOCUMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(collection)
            .bind(key)
            .bind(Json(body))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                // Tratamento de erro de chave duplicada
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_unique_violation() {
                        return AppError::UniqueConstraintViolation(
                            key.unwrap_or_default().to_string(),
                        );
                    }
                }
                e.into()
            })?;

        Ok(row.into())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let sql = format!(
            "SELECT {} FROM documents WHERE collection = $1 ORDER BY created_at DESC, seq DESC",
            DOCUMENT_COLUMNS
        );

        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let sql = format!(
            "SELECT {} FROM documents WHERE collection = $1 AND id = $2",
            DOCUMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn find_by_key(&self, collection: &str, key: &str) -> Result<Option<Document>, AppError> {
        let sql = format!(
            "SELECT {} FROM documents WHERE collection = $1 AND doc_key = $2",
            DOCUMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Option<Document>, AppError> {
        let sql = format!(
            "UPDATE documents SET body = $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 RETURNING {}",
            DOCUMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(collection)
            .bind(id)
            .bind(Json(body))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Document::from))
    }

    async fn upsert_by_key(
        &self,
        collection: &str,
        key: &str,
        body: Value,
    ) -> Result<Document, AppError> {
        // UPSERT (Insert or Update)
        let sql = format!(
            "INSERT INTO documents (id, collection, doc_key, body) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (collection, doc_key) \
             DO UPDATE SET body = EXCLUDED.body, updated_at = NOW() \
             RETURNING {}",
            DOCUMENT_COLUMNS
        );

        let row = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(collection)
            .bind(key)
            .bind(Json(body))
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND doc_key = $2")
            .bind(collection)
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn next_sequence(&self, name: &str) -> Result<i64, AppError> {
        // Incremento + upsert numa única instrução: sem leitura separada
        let seq: i64 = sqlx::query_scalar(
            "INSERT INTO counters (name, seq) VALUES ($1, 1) \
             ON CONFLICT (name) DO UPDATE SET seq = counters.seq + 1 \
             RETURNING seq",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(seq)
    }
}

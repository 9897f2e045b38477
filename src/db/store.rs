// src/db/store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::common::error::AppError;

// Um documento genérico dentro de uma coleção
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    // Chave natural opcional, única por coleção (ex: tipo do setting, e-mail)
    pub key: Option<String>,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// O armazenamento de documentos. Cada coleção guarda corpos JSON livres;
/// os contadores entregam números sequenciais.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insere um documento novo. Chave repetida na mesma coleção vira
    /// `UniqueConstraintViolation`.
    async fn insert(
        &self,
        collection: &str,
        key: Option<&str>,
        body: Value,
    ) -> Result<Document, AppError>;

    /// Todos os documentos da coleção, mais novos primeiro.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, AppError>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError>;

    async fn find_by_key(&self, collection: &str, key: &str) -> Result<Option<Document>, AppError>;

    /// Troca o corpo inteiro. `None` se o documento não existe.
    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Option<Document>, AppError>;

    /// Cria ou substitui o documento com essa chave (último a escrever vence).
    async fn upsert_by_key(
        &self,
        collection: &str,
        key: &str,
        body: Value,
    ) -> Result<Document, AppError>;

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, AppError>;

    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<bool, AppError>;

    /// Incrementa e devolve o contador `name` em uma única operação atômica.
    /// O primeiro valor é 1.
    async fn next_sequence(&self, name: &str) -> Result<i64, AppError>;
}

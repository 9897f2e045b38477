// src/db/memory_store.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::{Document, DocumentStore},
};

/// Store em memória, usado em desenvolvimento (sem DATABASE_URL) e nos testes.
/// Cada coleção guarda os documentos em ordem de inserção.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    counters: Mutex<HashMap<String, i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(
        &self,
        collection: &str,
        key: Option<&str>,
        body: Value,
    ) -> Result<Document, AppError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(key) = key {
            if docs.iter().any(|d| d.key.as_deref() == Some(key)) {
                return Err(AppError::UniqueConstraintViolation(key.to_string()));
            }
        }

        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            key: key.map(str::to_string),
            body,
            created_at: now,
            updated_at: now,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        let mut docs: Vec<Document> = collections
            .get(collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default();
        // Ordenação estável: empates de horário mantêm o último inserido na frente
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_by_key(&self, collection: &str, key: &str) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.key.as_deref() == Some(key)))
            .cloned())
    }

    async fn replace(
        &self,
        collection: &str,
        id: Uuid,
        body: Value,
    ) -> Result<Option<Document>, AppError> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(None);
        };
        doc.body = body;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn upsert_by_key(
        &self,
        collection: &str,
        key: &str,
        body: Value,
    ) -> Result<Document, AppError> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        let now = Utc::now();

        if let Some(doc) = docs.iter_mut().find(|d| d.key.as_deref() == Some(key)) {
            doc.body = body;
            doc.updated_at = now;
            return Ok(doc.clone());
        }

        let doc = Document {
            id: Uuid::new_v4(),
            key: Some(key.to_string()),
            body,
            created_at: now,
            updated_at: now,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn delete_by_key(&self, collection: &str, key: &str) -> Result<bool, AppError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.key.as_deref() != Some(key));
        Ok(docs.len() != before)
    }

    async fn next_sequence(&self, name: &str) -> Result<i64, AppError> {
        // O lock cobre leitura + escrita: não existe janela para lost update
        let mut counters = self.counters.lock().await;
        let seq = counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn concurrent_sequence_calls_are_unique_and_gap_free() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.next_sequence("orderId").await })
            })
            .collect();

        let mut issued = HashSet::new();
        for handle in handles {
            let n = handle.await.unwrap().unwrap();
            assert!(issued.insert(n), "número repetido: {n}");
        }
        assert_eq!(issued, (1..=50).collect::<HashSet<i64>>());
    }

    #[tokio::test]
    async fn sequences_are_independent_per_name() {
        let store = MemoryStore::new();
        assert_eq!(store.next_sequence("orderId").await.unwrap(), 1);
        assert_eq!(store.next_sequence("orderId").await.unwrap(), 2);
        assert_eq!(store.next_sequence("quotationId").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let store = MemoryStore::new();
        store.insert("leads", None, json!({"n": 1})).await.unwrap();
        store.insert("leads", None, json!({"n": 2})).await.unwrap();
        store.insert("leads", None, json!({"n": 3})).await.unwrap();

        let docs = store.list("leads").await.unwrap();
        let order: Vec<i64> = docs.iter().map(|d| d.body["n"].as_i64().unwrap()).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn duplicate_keys_are_rejected_but_upsert_replaces() {
        let store = MemoryStore::new();
        store.insert("users", Some("a@b.com"), json!({})).await.unwrap();
        let err = store.insert("users", Some("a@b.com"), json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::UniqueConstraintViolation(_)));

        let first = store.upsert_by_key("settings", "lead_sources", json!({"values": ["A"]})).await.unwrap();
        let second = store.upsert_by_key("settings", "lead_sources", json!({"values": ["B"]})).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.list("settings").await.unwrap().len(), 1);
        assert!(store.delete_by_key("settings", "lead_sources").await.unwrap());
        assert!(store.find_by_key("settings", "lead_sources").await.unwrap().is_none());
    }
}

// src/db/repository.rs

use std::{marker::PhantomData, sync::Arc};

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::store::DocumentStore,
    models::record::{Entity, Record},
};

/// Repositório tipado sobre uma coleção do store.
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

// Manual: o derive exigiria `T: Clone`
impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn insert(&self, entity: &T) -> Result<Record<T>, AppError> {
        let body = serde_json::to_value(entity)?;
        let doc = self.store.insert(T::COLLECTION, None, body).await?;
        Record::from_document(doc)
    }

    /// Coleção completa, mais novos primeiro.
    pub async fn list(&self) -> Result<Vec<Record<T>>, AppError> {
        self.store
            .list(T::COLLECTION)
            .await?
            .into_iter()
            .map(Record::from_document)
            .collect()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<T>>, AppError> {
        self.store
            .get(T::COLLECTION, id)
            .await?
            .map(Record::from_document)
            .transpose()
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.get(T::COLLECTION, id).await?.is_some())
    }

    pub async fn replace(&self, id: Uuid, entity: &T) -> Result<Option<Record<T>>, AppError> {
        let body = serde_json::to_value(entity)?;
        self.store
            .replace(T::COLLECTION, id, body)
            .await?
            .map(Record::from_document)
            .transpose()
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.store.delete(T::COLLECTION, id).await
    }
}

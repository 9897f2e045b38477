// src/models/record.rs

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::{common::error::AppError, db::store::Document};

/// Uma entidade persistida como documento em uma coleção.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: &'static str;
}

// Documento salvo: identidade e datas geradas pelo servidor + o corpo da entidade
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    pub id: Uuid,

    #[serde(flatten)]
    pub data: T,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: DeserializeOwned> Record<T> {
    pub fn from_document(doc: Document) -> Result<Self, AppError> {
        Ok(Self {
            id: doc.id,
            data: serde_json::from_value(doc.body)?,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

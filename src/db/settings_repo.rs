// src/db/settings_repo.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::store::DocumentStore,
    models::settings::{Setting, SettingDocument},
};

const COLLECTION: &str = "settings";

// Settings são documentos chaveados pelo tipo (ex: "lead_sources")
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn DocumentStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn get_setting(&self, setting_type: &str) -> Result<Option<Setting>, AppError> {
        let Some(doc) = self.store.find_by_key(COLLECTION, setting_type).await? else {
            return Ok(None);
        };

        let body: SettingDocument = serde_json::from_value(doc.body)?;
        Ok(Some(Setting {
            setting_type: setting_type.to_string(),
            values: body.values,
            updated_at: Some(doc.updated_at),
        }))
    }

    pub async fn save_setting(
        &self,
        setting_type: &str,
        values: Vec<serde_json::Value>,
    ) -> Result<Setting, AppError> {
        let body = serde_json::to_value(SettingDocument { values })?;
        let doc = self.store.upsert_by_key(COLLECTION, setting_type, body).await?;
        let saved: SettingDocument = serde_json::from_value(doc.body)?;

        Ok(Setting {
            setting_type: setting_type.to_string(),
            values: saved.values,
            updated_at: Some(doc.updated_at),
        })
    }

    pub async fn delete_setting(&self, setting_type: &str) -> Result<bool, AppError> {
        self.store.delete_by_key(COLLECTION, setting_type).await
    }
}

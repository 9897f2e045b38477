// src/services/settings_service.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::{Duration, Instant},
};

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    common::error::AppError,
    db::SettingsRepository,
    models::{
        forms::FieldDefinition,
        settings::{is_custom_fields_type, Setting, DEFAULT_LEAD_SOURCES, LEAD_SOURCES},
    },
    services::form_schema::FormSchema,
};

struct CacheEntry {
    loaded_at: Instant,
    // `None` também é cacheado: "não existe no store"
    setting: Option<Setting>,
}

#[derive(Default)]
struct Cache {
    entries: HashMap<String, CacheEntry>,
    // Incrementada a cada invalidação. Leitura iniciada antes dela não repovoa o cache.
    generation: u64,
}

/// Settings ficam no store; o processo só guarda uma cópia com validade (TTL)
/// que é descartada a cada escrita.
#[derive(Clone)]
pub struct SettingsService {
    repo: SettingsRepository,
    cache: Arc<RwLock<Cache>>,
    ttl: Duration,
}

impl SettingsService {
    pub fn new(repo: SettingsRepository, ttl: Duration) -> Self {
        Self {
            repo,
            cache: Arc::new(RwLock::new(Cache::default())),
            ttl,
        }
    }

    async fn load(&self, setting_type: &str) -> Result<Option<Setting>, AppError> {
        let generation = {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.entries.get(setting_type) {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Ok(entry.setting.clone());
                }
            }
            cache.generation
        };

        let setting = self.repo.get_setting(setting_type).await?;
        self.fill(setting_type, setting.clone(), generation).await;
        Ok(setting)
    }

    // Só grava se nenhuma escrita invalidou o cache desde `generation`
    async fn fill(&self, setting_type: &str, setting: Option<Setting>, generation: u64) {
        let mut cache = self.cache.write().await;
        if cache.generation != generation {
            return;
        }
        cache.entries.insert(
            setting_type.to_string(),
            CacheEntry {
                loaded_at: Instant::now(),
                setting,
            },
        );
    }

    async fn invalidate(&self, setting_type: &str) {
        let mut cache = self.cache.write().await;
        cache.generation = cache.generation.wrapping_add(1);
        cache.entries.remove(setting_type);
    }

    /// Tipo inexistente devolve lista vazia (ou os padrões de `lead_sources`).
    pub async fn get_setting(&self, setting_type: &str) -> Result<Setting, AppError> {
        if let Some(setting) = self.load(setting_type).await? {
            return Ok(setting);
        }

        let values = if setting_type == LEAD_SOURCES {
            DEFAULT_LEAD_SOURCES
                .iter()
                .map(|s| Value::String(s.to_string()))
                .collect()
        } else {
            Vec::new()
        };

        Ok(Setting {
            setting_type: setting_type.to_string(),
            values,
            updated_at: None,
        })
    }

    pub async fn lead_sources(&self) -> Result<Vec<String>, AppError> {
        let setting = self.get_setting(LEAD_SOURCES).await?;
        Ok(setting
            .values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect())
    }

    /// Esquema de campos personalizados salvo em `<entidade>.customFields`.
    pub async fn field_definitions(&self, key: &str) -> Result<Vec<FieldDefinition>, AppError> {
        let setting = self.get_setting(key).await?;
        setting
            .values
            .into_iter()
            .map(|v| serde_json::from_value(v).map_err(AppError::from))
            .collect()
    }

    pub async fn save_field_definitions(
        &self,
        key: &str,
        fields: &[FieldDefinition],
    ) -> Result<Setting, AppError> {
        let values = fields
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        self.store(key, values).await
    }

    /// Cria ou substitui um setting (upsert).
    pub async fn save_setting(&self, setting_type: &str, values: Value) -> Result<Setting, AppError> {
        let Value::Array(values) = values else {
            return Err(AppError::InvalidInput("values must be an array".to_string()));
        };

        let values = if is_custom_fields_type(setting_type) {
            normalize_field_definitions(values)?
        } else {
            normalize_plain_values(values)?
        };

        self.store(setting_type, values).await
    }

    /// Remove um valor simples (ex: uma origem de lead).
    pub async fn remove_value(&self, setting_type: &str, value: &str) -> Result<Setting, AppError> {
        let current = self.get_setting(setting_type).await?;
        let before = current.values.len();
        let values: Vec<Value> = current
            .values
            .into_iter()
            .filter(|v| v.as_str() != Some(value))
            .collect();

        if values.len() == before {
            return Err(AppError::NotFound("setting value"));
        }

        self.store(setting_type, values).await
    }

    pub async fn delete_setting(&self, setting_type: &str) -> Result<(), AppError> {
        let deleted = self.repo.delete_setting(setting_type).await?;
        self.invalidate(setting_type).await;

        if !deleted {
            return Err(AppError::NotFound("setting"));
        }
        tracing::info!(setting_type, "setting removido");
        Ok(())
    }

    async fn store(&self, setting_type: &str, values: Vec<Value>) -> Result<Setting, AppError> {
        let saved = self.repo.save_setting(setting_type, values).await;
        // Invalida mesmo se a escrita falhou: o estado do store é desconhecido
        self.invalidate(setting_type).await;
        let saved = saved?;
        tracing::info!(setting_type, count = saved.values.len(), "setting salvo");
        Ok(saved)
    }
}

// Strings não vazias, sem repetição
fn normalize_plain_values(values: Vec<Value>) -> Result<Vec<Value>, AppError> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(values.len());

    for value in values {
        let Value::String(s) = value else {
            return Err(AppError::InvalidInput("values must be strings".to_string()));
        };
        let s = s.trim().to_string();
        if s.is_empty() {
            continue;
        }
        if !seen.insert(s.to_lowercase()) {
            return Err(AppError::DuplicateField(s));
        }
        out.push(Value::String(s));
    }

    Ok(out)
}

// Mesmas regras do editor de formulários: nome derivado, opções limpas,
// ids e nomes únicos
fn normalize_field_definitions(values: Vec<Value>) -> Result<Vec<Value>, AppError> {
    let definitions = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            serde_json::from_value::<FieldDefinition>(value)
                .map_err(|e| AppError::InvalidInput(format!("values[{}]: {}", i, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    FormSchema::from_definitions(definitions)?
        .fields
        .iter()
        .map(|field| serde_json::to_value(field).map_err(AppError::from))
        .collect()
}

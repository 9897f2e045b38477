// src/models/settings.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const LEAD_SOURCES: &str = "lead_sources";

// Valores padrão (somente leitura) enquanto ninguém salvou `lead_sources`
pub const DEFAULT_LEAD_SOURCES: [&str; 4] = ["Friend", "Walk In", "Social Media", "Other"];

// Sufixo das chaves que guardam esquemas de campos (ex: "lead.customFields")
pub const CUSTOM_FIELDS_SUFFIX: &str = ".customFields";

// Corpo do documento salvo na coleção "settings", chaveado pelo tipo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingDocument {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(rename = "type")]
    #[schema(example = "lead_sources")]
    pub setting_type: String,

    // Lista de strings ou lista de definições de campo
    #[schema(value_type = Vec<Object>)]
    pub values: Vec<Value>,

    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingRequest {
    // Precisa ser um array; validado no serviço
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub values: Value,
}

pub fn is_custom_fields_type(setting_type: &str) -> bool {
    setting_type.ends_with(CUSTOM_FIELDS_SUFFIX)
}

// src/models/crm.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::Validate;

use crate::{common::validation::not_blank, models::record::Entity};

// --- ENUMS ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[default]
    New,
    Active,
    Converted,
    Lost,
}

// --- LEAD ---

// Anotação de acompanhamento embutida no próprio lead
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadFollowUp {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "2024-05-20")]
    pub date: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "14:30")]
    pub time: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Ligar de volta com a proposta")]
    pub remark: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[schema(example = "Maria da Silva")]
    pub name: String,
    #[schema(example = "maria@email.com")]
    pub email: String,
    pub phone: String,
    pub address: String,
    pub state: String,

    // Texto livre, normalmente um dos valores de `lead_sources`
    #[schema(example = "Walk In")]
    pub source: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    #[serde(default)]
    pub follow_ups: Vec<LeadFollowUp>,

    // CAMPOS PERSONALIZADOS: nome do campo -> valor
    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

impl Entity for Lead {
    const COLLECTION: &'static str = "leads";
}

// --- CLIENTE ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = "Acme Ltda")]
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

impl Entity for Customer {
    const COLLECTION: &'static str = "customers";
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    pub address: String,

    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    pub state: String,

    pub source: Option<String>,

    #[serde(default)]
    pub status: LeadStatus,

    #[serde(default)]
    #[validate(nested)]
    pub follow_ups: Vec<LeadFollowUp>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Acme Ltda")]
    pub name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

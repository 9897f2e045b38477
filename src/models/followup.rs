// src/models/followup.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::record::Entity;

// Referência polimórfica: o follow-up pertence a um Lead OU a uma Cotação
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RelatedType {
    Lead,
    Quotation,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FollowUpStatus {
    #[default]
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub related_type: RelatedType,
    pub related_id: Uuid,
    pub follow_up_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: FollowUpStatus,
}

impl Entity for FollowUp {
    const COLLECTION: &'static str = "followups";
}

// Campos obrigatórios são opcionais aqui para responder 400 (e não 422) quando faltam
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFollowUpPayload {
    pub related_type: Option<RelatedType>,
    pub related_id: Option<Uuid>,
    #[schema(example = "2024-05-20T14:30:00Z")]
    pub follow_up_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: FollowUpStatus,
}

// src/models/todo.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::validation::not_blank, models::record::Entity};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum TodoPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    // Lista pessoal: cada tarefa pertence a um usuário
    pub owner_id: Uuid,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub category: String,
    #[serde(default)]
    pub priority: TodoPriority,
    pub due_date: Option<NaiveDate>,
}

impl Entity for Todo {
    const COLLECTION: &'static str = "todos";
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodoPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Enviar proposta para a Acme")]
    pub text: String,

    #[schema(example = "work")]
    pub category: Option<String>,

    #[serde(default)]
    pub priority: TodoPriority,

    #[schema(value_type = Option<String>, format = Date, example = "2024-06-01")]
    pub due_date: Option<NaiveDate>,
}

// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::validation::not_blank,
    models::record::{Entity, Record},
};

// Usuário como fica salvo (inclui o hash da senha)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    pub address: Option<String>,
    pub state: Option<String>,
    pub password_hash: String,
}

impl Entity for User {
    const COLLECTION: &'static str = "users";
}

// O que pode sair para o cliente
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    #[schema(example = "maria")]
    pub username: String,
    #[schema(example = "maria@email.com")]
    pub email: String,
    pub address: Option<String>,
    pub state: Option<String>,
}

impl From<&Record<User>> for UserProfile {
    fn from(record: &Record<User>) -> Self {
        Self {
            id: record.id,
            username: record.data.username.clone(),
            email: record.data.email.clone(),
            address: record.data.address.clone(),
            state: record.data.state.clone(),
        }
    }
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "maria")]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub email: String,

    pub address: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    #[validate(length(min = 6, message = "password_too_short"))]
    pub password: String,
}

// Login aceita e-mail ou nome de usuário
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginUserPayload {
    #[schema(example = "maria")]
    pub username: Option<String>,
    #[schema(example = "maria@email.com")]
    pub email: Option<String>,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Mensagem legível já montada pelo serviço (ex: "items[0].discount ...")
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    // Campo -> código do erro (ex: "required", "invalid_number")
    #[error("Campos personalizados inválidos")]
    CustomFieldsValidationError(HashMap<String, String>),

    #[error("Referência inválida: {0}")]
    InvalidReference(String),

    #[error("Credenciais ausentes")]
    MissingCredentials,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("{0} não encontrado")]
    NotFound(&'static str),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Campo duplicado: {0}")]
    DuplicateField(String),

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Documento corrompido: {0}")]
    CorruptDocument(#[from] serde_json::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),
}

impl AppError {
    /// Código estável usado para buscar a mensagem traduzida.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_failed",
            AppError::InvalidInput(_) => "invalid_input",
            AppError::CustomFieldsValidationError(_) => "custom_fields_invalid",
            AppError::InvalidReference(_) => "invalid_reference",
            AppError::MissingCredentials => "missing_credentials",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::InvalidToken => "invalid_token",
            AppError::NotFound(_) => "not_found",
            AppError::EmailAlreadyExists => "email_already_exists",
            AppError::DuplicateField(_) => "duplicate_field",
            AppError::UniqueConstraintViolation(_) => "unique_violation",
            _ => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::InvalidInput(_)
            | AppError::CustomFieldsValidationError(_)
            | AppError::InvalidReference(_)
            | AppError::MissingCredentials => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists
            | AppError::DuplicateField(_)
            | AppError::UniqueConstraintViolation(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro de domínio no erro HTTP, já no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            // O detalhe fica só no log, o cliente recebe a mensagem genérica
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let message = i18n.translate(&locale.0, self.code());

        let (error, details) = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(camel_case(&field), messages);
                }
                (message, Some(json!(details)))
            }
            AppError::CustomFieldsValidationError(fields) => (message, Some(json!(fields))),
            AppError::InvalidInput(detail)
            | AppError::InvalidReference(detail)
            | AppError::DuplicateField(detail)
            | AppError::UniqueConstraintViolation(detail) => {
                (format!("{} {}", message, detail), None)
            }
            AppError::NotFound(what) => (format!("{} ({})", message, what), None),
            _ => (message, None),
        };

        ApiError {
            status,
            error,
            details,
        }
    }
}

// Chaves de `details` seguem os nomes do JSON: "customer_name" -> "customerName"
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

// O erro que de fato vai para o cliente
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

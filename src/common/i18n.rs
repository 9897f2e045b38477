// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

const EN: &[(&str, &str)] = &[
    ("validation_failed", "One or more fields are invalid."),
    ("invalid_input", "Invalid input:"),
    ("custom_fields_invalid", "One or more custom fields are invalid."),
    ("invalid_reference", "Referenced document does not exist:"),
    ("missing_credentials", "Email (or username) and password are required."),
    ("invalid_credentials", "Invalid email or password."),
    ("invalid_token", "Authentication token is invalid or missing."),
    ("not_found", "Document not found"),
    ("email_already_exists", "This email is already in use."),
    ("duplicate_field", "Duplicate field name:"),
    ("unique_violation", "Duplicate value:"),
    ("internal_error", "An unexpected error occurred."),
];

const PT: &[(&str, &str)] = &[
    ("validation_failed", "Um ou mais campos são inválidos."),
    ("invalid_input", "Entrada inválida:"),
    ("custom_fields_invalid", "Um ou mais campos personalizados são inválidos."),
    ("invalid_reference", "O documento referenciado não existe:"),
    ("missing_credentials", "E-mail (ou usuário) e senha são obrigatórios."),
    ("invalid_credentials", "E-mail ou senha inválidos."),
    ("invalid_token", "Token de autenticação inválido ou ausente."),
    ("not_found", "Documento não encontrado"),
    ("email_already_exists", "Este e-mail já está em uso."),
    ("duplicate_field", "Nome de campo duplicado:"),
    ("unique_violation", "Valor duplicado:"),
    ("internal_error", "Ocorreu um erro inesperado."),
];

/// Catálogo de mensagens por idioma, indexado pelo código do erro.
pub struct I18nStore {
    catalogs: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl Default for I18nStore {
    fn default() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", EN.iter().copied().collect());
        catalogs.insert("pt", PT.iter().copied().collect());
        Self { catalogs }
    }
}

impl I18nStore {
    pub fn translate(&self, lang: &str, code: &str) -> String {
        self.catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(code))
            .or_else(|| {
                self.catalogs
                    .get(DEFAULT_LANG)
                    .and_then(|catalog| catalog.get(code))
            })
            .map(|m| m.to_string())
            .unwrap_or_else(|| code.to_string())
    }
}

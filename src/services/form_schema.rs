// src/services/form_schema.rs

use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    models::forms::{
        fixed_fields, EntityType, FieldDefinition, FieldDraft, FieldOption, FieldKind, FormView,
        OptionsInput,
    },
    services::{field_renderer, settings_service::SettingsService},
};

/// "Annual Budget!" -> "annual_budget"
pub fn derive_field_name(label: &str) -> String {
    let cleaned: String = label
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Só dropdown e radio guardam opções; o resto fica com a lista vazia.
pub fn normalize_options(kind: &FieldKind, options: Option<OptionsInput>) -> Vec<FieldOption> {
    if !kind.has_options() {
        return Vec::new();
    }

    match options {
        None => Vec::new(),
        Some(OptionsInput::Csv(csv)) => csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| FieldOption::Plain(s.to_string()))
            .collect(),
        Some(OptionsInput::List(list)) => list
            .into_iter()
            .filter_map(|opt| match opt {
                FieldOption::Plain(s) => {
                    let s = s.trim();
                    (!s.is_empty()).then(|| FieldOption::Plain(s.to_string()))
                }
                pair => (!pair.value().trim().is_empty()).then_some(pair),
            })
            .collect(),
    }
}

fn label_required() -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("required");
    error.message = Some("required".into());
    errors.add("label", error);
    AppError::ValidationError(errors)
}

/// Lista ordenada de campos personalizados de uma entidade.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    pub fields: Vec<FieldDefinition>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    // Monta a definição a partir do rascunho, sem checar duplicidade
    fn build(id: String, draft: FieldDraft) -> Result<FieldDefinition, AppError> {
        let label = draft.label.trim().to_string();
        if label.is_empty() {
            return Err(label_required());
        }

        let source = draft
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&label);
        let name = derive_field_name(source);
        if name.is_empty() {
            return Err(AppError::InvalidInput(
                "field name must contain letters or digits".to_string(),
            ));
        }

        let options = normalize_options(&draft.kind, draft.options);
        let rows = matches!(draft.kind, FieldKind::TextArea)
            .then_some(draft.rows)
            .flatten();

        Ok(FieldDefinition {
            id,
            label,
            name,
            kind: draft.kind,
            options,
            required: draft.required,
            placeholder: draft.placeholder.filter(|p| !p.trim().is_empty()),
            rows,
        })
    }

    fn ensure_unique(&self, name: &str, ignore_id: Option<&str>) -> Result<(), AppError> {
        let taken = self
            .fields
            .iter()
            .filter(|f| Some(f.id.as_str()) != ignore_id)
            .any(|f| field_renderer::field_key(f).eq_ignore_ascii_case(name));

        if taken {
            return Err(AppError::DuplicateField(name.to_string()));
        }
        Ok(())
    }

    pub fn add_field(&mut self, draft: FieldDraft) -> Result<&FieldDefinition, AppError> {
        let field = Self::build(Uuid::new_v4().to_string(), draft)?;
        self.ensure_unique(&field.name, None)?;
        self.fields.push(field);
        let index = self.fields.len() - 1;
        Ok(&self.fields[index])
    }

    pub fn update_field(&mut self, id: &str, draft: FieldDraft) -> Result<&FieldDefinition, AppError> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::NotFound("field"))?;

        let field = Self::build(id.to_string(), draft)?;
        self.ensure_unique(&field.name, Some(id))?;
        self.fields[index] = field;
        Ok(&self.fields[index])
    }

    /// Reconstrói o esquema a partir de definições completas (ex: um POST direto
    /// em `<entidade>.customFields`), com as regras de `add_field`. Os ids
    /// enviados são mantidos; vazios ou repetidos são rejeitados.
    pub fn from_definitions(definitions: Vec<FieldDefinition>) -> Result<Self, AppError> {
        let mut schema = Self::default();

        for (i, definition) in definitions.into_iter().enumerate() {
            let id = definition.id.trim().to_string();
            if id.is_empty() {
                return Err(AppError::InvalidInput(format!("values[{}].id is required", i)));
            }
            if schema.fields.iter().any(|f| f.id == id) {
                return Err(AppError::DuplicateField(id));
            }

            let draft = FieldDraft {
                label: definition.label,
                name: Some(definition.name).filter(|n| !n.trim().is_empty()),
                kind: definition.kind,
                options: Some(OptionsInput::List(definition.options)),
                required: definition.required,
                placeholder: definition.placeholder,
                rows: definition.rows,
            };
            let field = Self::build(id, draft)?;
            schema.ensure_unique(&field.name, None)?;
            schema.fields.push(field);
        }

        Ok(schema)
    }

    pub fn remove_field(&mut self, id: &str) -> Result<FieldDefinition, AppError> {
        let index = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::NotFound("field"))?;
        Ok(self.fields.remove(index))
    }
}

/// Persiste o esquema de cada entidade nos settings (`<entidade>.customFields`).
/// Última escrita vence.
#[derive(Clone)]
pub struct FormSchemaService {
    settings: SettingsService,
}

impl FormSchemaService {
    pub fn new(settings: SettingsService) -> Self {
        Self { settings }
    }

    pub async fn schema(&self, entity: EntityType) -> Result<FormSchema, AppError> {
        let fields = self.settings.field_definitions(&entity.settings_key()).await?;
        Ok(FormSchema::new(fields))
    }

    async fn persist(&self, entity: EntityType, schema: &FormSchema) -> Result<(), AppError> {
        self.settings
            .save_field_definitions(&entity.settings_key(), &schema.fields)
            .await?;
        Ok(())
    }

    pub async fn add_field(
        &self,
        entity: EntityType,
        draft: FieldDraft,
    ) -> Result<FieldDefinition, AppError> {
        let mut schema = self.schema(entity).await?;
        let field = schema.add_field(draft)?.clone();
        self.persist(entity, &schema).await?;
        tracing::info!(%entity, field = %field.name, "campo personalizado criado");
        Ok(field)
    }

    pub async fn update_field(
        &self,
        entity: EntityType,
        id: &str,
        draft: FieldDraft,
    ) -> Result<FieldDefinition, AppError> {
        let mut schema = self.schema(entity).await?;
        let field = schema.update_field(id, draft)?.clone();
        self.persist(entity, &schema).await?;
        Ok(field)
    }

    pub async fn remove_field(&self, entity: EntityType, id: &str) -> Result<(), AppError> {
        let mut schema = self.schema(entity).await?;
        let removed = schema.remove_field(id)?;
        self.persist(entity, &schema).await?;
        tracing::info!(%entity, field = %removed.name, "campo personalizado removido");
        Ok(())
    }

    /// Campos fixos + personalizados, já renderizados como controles vazios.
    pub async fn form_view(&self, entity: EntityType) -> Result<FormView, AppError> {
        let sources = match entity {
            EntityType::Lead => self.settings.lead_sources().await?,
            _ => Vec::new(),
        };
        let schema = self.schema(entity).await?;
        let empty = Map::new();

        let mut controls = field_renderer::render_all(&fixed_fields(entity, &sources), &empty);
        controls.extend(field_renderer::render_all(&schema.fields, &empty));

        Ok(FormView {
            entity,
            custom_fields: schema.fields,
            controls,
        })
    }

    /// Confere `customFields` enviados na criação de uma entidade.
    pub async fn validate_values(
        &self,
        entity: EntityType,
        values: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let schema = self.schema(entity).await?;
        field_renderer::validate_custom_fields(&schema.fields, values)
    }
}

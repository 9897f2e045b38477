// src/models/forms.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::error::AppError;

// --- ENTIDADES QUE ACEITAM CAMPOS PERSONALIZADOS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EntityType {
    Lead,
    Customer,
    Order,
    Quotation,
}

impl EntityType {
    /// Chave do setting que guarda o esquema (ex: "lead.customFields").
    pub fn settings_key(&self) -> String {
        format!("{}.customFields", self.slug())
    }

    pub fn slug(&self) -> &'static str {
        match self {
            EntityType::Lead => "lead",
            EntityType::Customer => "customer",
            EntityType::Order => "order",
            EntityType::Quotation => "quotation",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityType::Lead => "Lead",
            EntityType::Customer => "Customer",
            EntityType::Order => "Order",
            EntityType::Quotation => "Quotation",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityType {
    type Err = AppError;

    // Aceita "Lead", "lead" ou "leads"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.trim_end_matches('s') {
            "lead" => Ok(EntityType::Lead),
            "customer" => Ok(EntityType::Customer),
            "order" => Ok(EntityType::Order),
            "quotation" => Ok(EntityType::Quotation),
            _ => Err(AppError::InvalidInput(format!("unknown entity type '{}'", s))),
        }
    }
}

// --- TIPOS DE CAMPO ---

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    Url,
    Number,
    Currency,
    Date,
    TextArea,
    Dropdown,
    Radio,
    Checkbox,
    // Tipo desconhecido vindo da configuração; preservado como está
    Unsupported(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
            FieldKind::Url => "url",
            FieldKind::Number => "number",
            FieldKind::Currency => "currency",
            FieldKind::Date => "date",
            FieldKind::TextArea => "textarea",
            FieldKind::Dropdown => "dropdown",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Unsupported(tag) => tag,
        }
    }

    /// Só dropdown e radio guardam lista de opções.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldKind::Dropdown | FieldKind::Radio)
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "tel" | "phone" => FieldKind::Tel,
            "url" => FieldKind::Url,
            "number" => FieldKind::Number,
            "currency" => FieldKind::Currency,
            "date" => FieldKind::Date,
            "textarea" => FieldKind::TextArea,
            "dropdown" | "select" => FieldKind::Dropdown,
            "radio" => FieldKind::Radio,
            "checkbox" => FieldKind::Checkbox,
            _ => FieldKind::Unsupported(value),
        }
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

// --- OPÇÕES ---

// Aceita "Gold" ou {"value": "gold", "label": "Gold"}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldOption {
    Plain(String),
    Pair {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
}

impl FieldOption {
    // Sem `value`, o valor é o próprio rótulo
    pub fn value(&self) -> &str {
        match self {
            FieldOption::Plain(s) => s,
            FieldOption::Pair { value: Some(v), .. } => v,
            FieldOption::Pair { label: Some(l), .. } => l,
            FieldOption::Pair { .. } => "",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            FieldOption::Plain(s) => s,
            FieldOption::Pair { label: Some(l), .. } => l,
            FieldOption::Pair { value: Some(v), .. } => v,
            FieldOption::Pair { .. } => "",
        }
    }
}

// Opções como chegam do formulário de configuração: "A, B ,C" ou lista
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OptionsInput {
    Csv(String),
    List(Vec<FieldOption>),
}

// --- DEFINIÇÃO DE CAMPO (O Molde) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[schema(example = "0b6c2d1e-5c0e-4e34-9d7c-0b1f1d7f8e11")]
    pub id: String,

    #[schema(example = "Annual Budget")]
    pub label: String,

    #[serde(default)]
    #[schema(example = "annual_budget")]
    pub name: String,

    #[serde(rename = "type", default)]
    #[schema(value_type = String, example = "number")]
    pub kind: FieldKind,

    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub options: Vec<FieldOption>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

impl FieldDefinition {
    // Campos fixos dos formulários (não ficam no setting)
    fn fixed(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            id: name.to_string(),
            label: label.to_string(),
            name: name.to_string(),
            kind,
            options: Vec::new(),
            required,
            placeholder: None,
            rows: None,
        }
    }

    fn with_options(mut self, options: &[&str]) -> Self {
        self.options = options.iter().map(|o| FieldOption::Plain(o.to_string())).collect();
        self
    }
}

/// Os campos embutidos de cada formulário, na ordem em que aparecem.
/// `lead_sources` entra pelo serviço, que conhece os settings.
pub fn fixed_fields(entity: EntityType, lead_sources: &[String]) -> Vec<FieldDefinition> {
    match entity {
        EntityType::Lead => {
            let sources: Vec<&str> = lead_sources.iter().map(String::as_str).collect();
            vec![
                FieldDefinition::fixed("name", "Name", FieldKind::Text, true),
                FieldDefinition::fixed("email", "Email", FieldKind::Email, true),
                FieldDefinition::fixed("phone", "Phone", FieldKind::Tel, true),
                FieldDefinition::fixed("address", "Address", FieldKind::TextArea, true),
                FieldDefinition::fixed("state", "State", FieldKind::Text, true),
                FieldDefinition::fixed("source", "Source", FieldKind::Dropdown, false)
                    .with_options(&sources),
                FieldDefinition::fixed("status", "Status", FieldKind::Dropdown, false)
                    .with_options(&["New", "Active", "Converted", "Lost"]),
            ]
        }
        EntityType::Customer => vec![
            FieldDefinition::fixed("name", "Name", FieldKind::Text, true),
            FieldDefinition::fixed("email", "Email", FieldKind::Email, false),
            FieldDefinition::fixed("phone", "Phone", FieldKind::Tel, false),
            FieldDefinition::fixed("address", "Address", FieldKind::TextArea, false),
            FieldDefinition::fixed("state", "State", FieldKind::Text, false),
        ],
        EntityType::Order | EntityType::Quotation => vec![
            FieldDefinition::fixed("customerName", "Customer Name", FieldKind::Text, true),
            FieldDefinition::fixed("email", "Email", FieldKind::Email, false),
            FieldDefinition::fixed("phone", "Phone", FieldKind::Tel, false),
            FieldDefinition::fixed("address", "Address", FieldKind::TextArea, false),
            FieldDefinition::fixed("state", "State", FieldKind::Text, false),
        ],
    }
}

// Payload de criação/edição de campo
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    #[serde(default)]
    #[schema(example = "Annual Budget")]
    pub label: String,

    // Gerado a partir do rótulo quando ausente
    pub name: Option<String>,

    #[serde(rename = "type", default)]
    #[schema(value_type = String, example = "dropdown")]
    pub kind: FieldKind,

    #[schema(value_type = Object, example = "Gold, Silver, Bronze")]
    pub options: Option<OptionsInput>,

    #[serde(default)]
    pub required: bool,

    pub placeholder: Option<String>,
    pub rows: Option<u32>,
}

// --- CONTROLES RENDERIZADOS ---

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadioButton {
    // Todos os botões do grupo compartilham o nome do campo
    pub group: String,
    pub value: String,
    pub label: String,
    pub checked: bool,
}

/// Descrição tipada de um controle de formulário, pronta para o front-end.
/// O cliente devolve o valor usando `name` como chave.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "camelCase")]
pub enum Control {
    #[serde(rename_all = "camelCase")]
    Input {
        id: String,
        name: String,
        label: String,
        input_type: String,
        value: String,
        placeholder: Option<String>,
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    TextArea {
        id: String,
        name: String,
        label: String,
        value: String,
        placeholder: Option<String>,
        rows: u32,
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    Select {
        id: String,
        name: String,
        label: String,
        value: String,
        options: Vec<Choice>,
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    Checkbox {
        id: String,
        name: String,
        label: String,
        checked: bool,
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    RadioGroup {
        id: String,
        name: String,
        label: String,
        buttons: Vec<RadioButton>,
        required: bool,
    },
    #[serde(rename_all = "camelCase")]
    Unsupported {
        id: String,
        label: String,
        message: String,
    },
}

impl Control {
    pub fn id(&self) -> &str {
        match self {
            Control::Input { id, .. }
            | Control::TextArea { id, .. }
            | Control::Select { id, .. }
            | Control::Checkbox { id, .. }
            | Control::RadioGroup { id, .. }
            | Control::Unsupported { id, .. } => id,
        }
    }
}

// Resposta de GET /api/forms/{entity}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub entity: EntityType,
    pub custom_fields: Vec<FieldDefinition>,
    pub controls: Vec<Control>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_kind_parses_aliases_and_keeps_unknown_tags() {
        let kind: FieldKind = serde_json::from_value(json!("select")).unwrap();
        assert_eq!(kind, FieldKind::Dropdown);
        let kind: FieldKind = serde_json::from_value(json!("phone")).unwrap();
        assert_eq!(kind, FieldKind::Tel);
        let kind: FieldKind = serde_json::from_value(json!("signature")).unwrap();
        assert_eq!(kind, FieldKind::Unsupported("signature".into()));
        assert_eq!(serde_json::to_value(&kind).unwrap(), json!("signature"));
    }

    #[test]
    fn option_value_defaults_to_label() {
        let opts: Vec<FieldOption> =
            serde_json::from_value(json!(["Gold", {"label": "Silver"}, {"value": "b", "label": "Bronze"}]))
                .unwrap();
        assert_eq!(opts[0].value(), "Gold");
        assert_eq!(opts[1].value(), "Silver");
        assert_eq!(opts[2].value(), "b");
        assert_eq!(opts[2].label(), "Bronze");
    }

    #[test]
    fn entity_type_parsing_is_lenient() {
        assert_eq!("Lead".parse::<EntityType>().unwrap(), EntityType::Lead);
        assert_eq!("quotations".parse::<EntityType>().unwrap(), EntityType::Quotation);
        assert!("invoice".parse::<EntityType>().is_err());
        assert_eq!(EntityType::Lead.settings_key(), "lead.customFields");
    }

    #[test]
    fn control_serializes_with_tag() {
        let control = Control::Checkbox {
            id: "vip".into(),
            name: "vip".into(),
            label: "VIP".into(),
            checked: true,
            required: false,
        };
        let value = serde_json::to_value(&control).unwrap();
        assert_eq!(value["control"], "checkbox");
        assert_eq!(value["checked"], true);
    }
}

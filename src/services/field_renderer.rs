// src/services/field_renderer.rs
//
// Transforma definições de campo em controles de formulário e confere os
// valores enviados para os campos personalizados.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::{
    common::error::AppError,
    models::forms::{Choice, Control, FieldDefinition, FieldKind, RadioButton},
};

pub const DEFAULT_TEXTAREA_ROWS: u32 = 4;
const SELECT_PROMPT: &str = "Select an option";

/// Chave usada no mapa `customFields`: o nome, ou o rótulo quando não há nome.
pub fn field_key(field: &FieldDefinition) -> &str {
    if field.name.is_empty() {
        &field.label
    } else {
        &field.name
    }
}

fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_checked(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// Nunca falha: tipos desconhecidos viram um controle `Unsupported`.
pub fn render(field: &FieldDefinition, value: Option<&Value>) -> Control {
    let id = field.id.clone();
    let name = field_key(field).to_string();
    let label = field.label.clone();
    let required = field.required;

    let input = |input_type: &str| Control::Input {
        id: id.clone(),
        name: name.clone(),
        label: label.clone(),
        input_type: input_type.to_string(),
        value: as_text(value),
        placeholder: field.placeholder.clone(),
        required,
    };

    match &field.kind {
        FieldKind::Text => input("text"),
        FieldKind::Email => input("email"),
        FieldKind::Tel => input("tel"),
        FieldKind::Url => input("url"),
        FieldKind::Number | FieldKind::Currency => input("number"),
        FieldKind::Date => input("date"),
        FieldKind::TextArea => Control::TextArea {
            id,
            name,
            label,
            value: as_text(value),
            placeholder: field.placeholder.clone(),
            rows: field.rows.unwrap_or(DEFAULT_TEXTAREA_ROWS),
            required,
        },
        FieldKind::Dropdown => {
            let current = as_text(value);
            let prompt = Choice {
                value: String::new(),
                label: field
                    .placeholder
                    .clone()
                    .unwrap_or_else(|| SELECT_PROMPT.to_string()),
                selected: current.is_empty(),
            };
            let options = std::iter::once(prompt)
                .chain(field.options.iter().map(|opt| Choice {
                    value: opt.value().to_string(),
                    label: opt.label().to_string(),
                    selected: !current.is_empty() && opt.value() == current,
                }))
                .collect();

            Control::Select {
                id,
                name,
                label,
                value: current,
                options,
                required,
            }
        }
        FieldKind::Radio => {
            let current = as_text(value);
            let buttons = field
                .options
                .iter()
                .map(|opt| RadioButton {
                    group: name.clone(),
                    value: opt.value().to_string(),
                    label: opt.label().to_string(),
                    checked: opt.value() == current,
                })
                .collect();

            Control::RadioGroup {
                id,
                name,
                label,
                buttons,
                required,
            }
        }
        FieldKind::Checkbox => Control::Checkbox {
            id,
            name,
            label,
            checked: is_checked(value),
            required,
        },
        FieldKind::Unsupported(tag) => Control::Unsupported {
            id,
            label,
            message: format!("Unsupported field type: {}", tag),
        },
    }
}

pub fn render_all(fields: &[FieldDefinition], values: &Map<String, Value>) -> Vec<Control> {
    fields
        .iter()
        .map(|field| render(field, values.get(field_key(field))))
        .collect()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// Código de erro quando o valor não combina com o tipo do campo
fn check_kind(field: &FieldDefinition, value: &Value) -> Option<&'static str> {
    let text = match value {
        Value::String(s) => Some(s.trim()),
        _ => None,
    };

    match &field.kind {
        FieldKind::Number | FieldKind::Currency => {
            let ok = value.is_number() || text.is_some_and(|s| s.parse::<f64>().is_ok());
            (!ok).then_some("invalid_number")
        }
        FieldKind::Date => {
            let ok = text.is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok());
            (!ok).then_some("invalid_date_format")
        }
        FieldKind::Checkbox => {
            let ok = value.is_boolean() || matches!(text, Some("true") | Some("false"));
            (!ok).then_some("invalid_boolean")
        }
        FieldKind::Email => {
            let ok = text.is_some_and(|s| s.contains('@'));
            (!ok).then_some("invalid_email")
        }
        FieldKind::Dropdown | FieldKind::Radio => {
            let ok = text.is_some_and(|s| field.options.iter().any(|opt| opt.value() == s));
            (!ok).then_some("invalid_option")
        }
        FieldKind::Text | FieldKind::Tel | FieldKind::Url | FieldKind::TextArea => {
            (!value.is_string()).then_some("invalid_text")
        }
        FieldKind::Unsupported(_) => None,
    }
}

/// Confere os valores de `customFields` contra o esquema da entidade.
/// Chaves que não pertencem ao esquema passam sem checagem.
pub fn validate_custom_fields(
    schema: &[FieldDefinition],
    values: &Map<String, Value>,
) -> Result<(), AppError> {
    // Campo -> código do erro
    let mut errors: HashMap<String, String> = HashMap::new();

    for field in schema {
        let key = field_key(field);
        let value = values.get(key);

        match value {
            None => {
                if field.required {
                    errors.insert(key.to_string(), "required".to_string());
                }
            }
            Some(v) if is_blank(v) => {
                if field.required {
                    errors.insert(key.to_string(), "required".to_string());
                }
            }
            Some(v) => {
                if let Some(code) = check_kind(field, v) {
                    errors.insert(key.to_string(), code.to_string());
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(AppError::CustomFieldsValidationError(errors));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::forms::FieldOption;
    use serde_json::json;

    fn field(name: &str, kind: FieldKind) -> FieldDefinition {
        FieldDefinition {
            id: format!("id-{}", name),
            label: name.to_uppercase(),
            name: name.to_string(),
            kind,
            options: Vec::new(),
            required: false,
            placeholder: None,
            rows: None,
        }
    }

    #[test]
    fn textarea_defaults_to_four_rows() {
        let control = render(&field("notes", FieldKind::TextArea), None);
        assert!(matches!(control, Control::TextArea { rows: 4, .. }));

        let mut tall = field("notes", FieldKind::TextArea);
        tall.rows = Some(10);
        assert!(matches!(render(&tall, None), Control::TextArea { rows: 10, .. }));
    }

    #[test]
    fn select_starts_with_blank_option() {
        let mut tier = field("tier", FieldKind::Dropdown);
        tier.options = vec![
            FieldOption::Plain("Gold".into()),
            FieldOption::Pair { value: Some("s".into()), label: Some("Silver".into()) },
        ];

        let Control::Select { options, .. } = render(&tier, Some(&json!("s"))) else {
            panic!("esperava Select");
        };
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "");
        assert_eq!(options[0].label, "Select an option");
        assert!(!options[0].selected);
        assert_eq!(options[1].value, "Gold");
        assert!(options[2].selected);
    }

    #[test]
    fn checkbox_accepts_bool_or_string_true() {
        let vip = field("vip", FieldKind::Checkbox);
        assert!(matches!(render(&vip, Some(&json!(true))), Control::Checkbox { checked: true, .. }));
        assert!(matches!(render(&vip, Some(&json!("true"))), Control::Checkbox { checked: true, .. }));
        assert!(matches!(render(&vip, Some(&json!("yes"))), Control::Checkbox { checked: false, .. }));
        assert!(matches!(render(&vip, None), Control::Checkbox { checked: false, .. }));
    }

    #[test]
    fn radio_buttons_share_the_field_name() {
        let mut size = field("size", FieldKind::Radio);
        size.options = vec![FieldOption::Plain("S".into()), FieldOption::Plain("M".into())];

        let Control::RadioGroup { buttons, .. } = render(&size, Some(&json!("M"))) else {
            panic!("esperava RadioGroup");
        };
        assert!(buttons.iter().all(|b| b.group == "size"));
        assert!(buttons[1].checked);
        assert!(!buttons[0].checked);
    }

    #[test]
    fn unknown_type_renders_placeholder() {
        let sig = field("sig", FieldKind::Unsupported("signature".into()));
        let Control::Unsupported { message, .. } = render(&sig, None) else {
            panic!("esperava Unsupported");
        };
        assert_eq!(message, "Unsupported field type: signature");
    }

    #[test]
    fn number_input_passes_value_through() {
        let Control::Input { input_type, value, .. } =
            render(&field("budget", FieldKind::Currency), Some(&json!(1500)))
        else {
            panic!("esperava Input");
        };
        assert_eq!(input_type, "number");
        assert_eq!(value, "1500");
    }

    #[test]
    fn custom_values_are_checked_per_kind() {
        let mut budget = field("budget", FieldKind::Number);
        budget.required = true;
        let mut tier = field("tier", FieldKind::Dropdown);
        tier.options = vec![FieldOption::Plain("Gold".into())];
        let schema = vec![budget, tier, field("since", FieldKind::Date)];

        let values = json!({"tier": "Platinum", "since": "05/20/2024", "extra": 1});
        let err = validate_custom_fields(&schema, values.as_object().unwrap()).unwrap_err();
        let AppError::CustomFieldsValidationError(errors) = err else {
            panic!("esperava erro de campos personalizados");
        };
        assert_eq!(errors["budget"], "required");
        assert_eq!(errors["tier"], "invalid_option");
        assert_eq!(errors["since"], "invalid_date_format");
        assert!(!errors.contains_key("extra"));

        let values = json!({"budget": "1200.50", "tier": "Gold", "since": "2024-05-20"});
        assert!(validate_custom_fields(&schema, values.as_object().unwrap()).is_ok());
    }
}

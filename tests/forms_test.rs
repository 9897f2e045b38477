//! Campos personalizados: esquema, renderização e validação dos valores.

mod common;

use anyhow::Result;
use common::{lead_body, TestApp};
use serde_json::{json, Value};

fn control_names(form: &Value) -> Vec<String> {
    form["controls"]
        .as_array()
        .map(|controls| {
            controls
                .iter()
                .filter_map(|c| c["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_lead_form_lists_fixed_fields_and_sources() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let form: Value = app.get("/api/forms/lead").await?.json().await?;

    // Assert
    let names = control_names(&form);
    assert_eq!(&names[..5], &["name", "email", "phone", "address", "state"]);
    let source = form["controls"]
        .as_array()
        .and_then(|c| c.iter().find(|c| c["name"] == "source"))
        .cloned()
        .unwrap_or_default();
    assert_eq!(source["control"], "select");
    assert_eq!(source["options"][0]["label"], "Select an option");
    assert_eq!(source["options"][1]["value"], "Friend");

    Ok(())
}

#[tokio::test]
async fn test_removing_a_field_keeps_the_others() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let budget: Value = app
        .post_json("/api/forms/lead/fields", &json!({ "label": "Annual Budget", "type": "number" }))
        .await?
        .json()
        .await?;
    let tier: Value = app
        .post_json(
            "/api/forms/lead/fields",
            &json!({ "label": "Tier", "type": "dropdown", "options": "Gold, Silver ,,Bronze" }),
        )
        .await?
        .json()
        .await?;

    // Act
    let response = app
        .client
        .delete(app.url(&format!(
            "/api/forms/lead/fields/{}",
            budget["id"].as_str().unwrap_or_default()
        )))
        .send()
        .await?;
    let form: Value = app.get("/api/forms/lead").await?.json().await?;

    // Assert
    assert_eq!(response.status(), 204);
    assert_eq!(budget["name"], "annual_budget");
    assert_eq!(tier["options"].as_array().map(Vec::len), Some(3));

    let fields = form["customFields"].as_array().cloned().unwrap_or_default();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["id"], tier["id"]);

    let names = control_names(&form);
    assert!(names.contains(&"tier".to_string()));
    assert!(!names.contains(&"annual_budget".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_field_schema_errors() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.post_json("/api/forms/lead/fields", &json!({ "label": "Tier" }))
        .await?;

    // Act
    let duplicate = app
        .post_json("/api/forms/lead/fields", &json!({ "label": "tier" }))
        .await?;
    let blank = app
        .post_json("/api/forms/lead/fields", &json!({ "label": "  " }))
        .await?;
    let unknown_entity = app.get("/api/forms/invoice").await?;
    let missing = app
        .client
        .put(app.url("/api/forms/lead/fields/nao-existe"))
        .json(&json!({ "label": "X" }))
        .send()
        .await?;

    // Assert
    assert_eq!(duplicate.status(), 409);
    assert_eq!(blank.status(), 400);
    assert_eq!(unknown_entity.status(), 400);
    assert_eq!(missing.status(), 404);

    Ok(())
}

#[tokio::test]
async fn test_lead_custom_fields_are_validated_against_the_schema() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.post_json(
        "/api/forms/lead/fields",
        &json!({ "label": "Annual Budget", "type": "number", "required": true }),
    )
    .await?;

    let mut missing = lead_body("Fabio");
    missing["customFields"] = json!({});
    let mut not_a_number = lead_body("Gabi");
    not_a_number["customFields"] = json!({ "annual_budget": "muito" });
    let mut valid = lead_body("Hugo");
    valid["customFields"] = json!({ "annual_budget": "25000", "extra": "ignorado" });

    // Act
    let missing = app.post_json("/api/leads", &missing).await?;
    let not_a_number = app.post_json("/api/leads", &not_a_number).await?;
    let valid = app.post_json("/api/leads", &valid).await?;

    // Assert
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json().await?;
    assert_eq!(body["details"]["annual_budget"], "required");

    assert_eq!(not_a_number.status(), 400);
    let body: Value = not_a_number.json().await?;
    assert_eq!(body["details"]["annual_budget"], "invalid_number");

    assert_eq!(valid.status(), 201);
    let lead: Value = valid.json().await?;
    assert_eq!(lead["customFields"]["annual_budget"], "25000");

    Ok(())
}

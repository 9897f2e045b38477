//! Listas de valores configuráveis.

mod common;

use anyhow::Result;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn test_lead_sources_have_defaults_until_saved() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let defaults: Value = app.get("/api/settings/lead_sources").await?.json().await?;
    let saved = app
        .post_json(
            "/api/settings/lead_sources",
            &json!({ "values": [" Feira ", "Indicação", ""] }),
        )
        .await?;
    let after: Value = app.get("/api/settings/lead_sources").await?.json().await?;

    // Assert
    assert_eq!(defaults["values"], json!(["Friend", "Walk In", "Social Media", "Other"]));
    assert_eq!(saved.status(), 200);
    assert_eq!(after["values"], json!(["Feira", "Indicação"]));
    assert!(after["updatedAt"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_unknown_setting_is_an_empty_list() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let response = app.get("/api/settings/order_statuses").await?;

    // Assert
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["type"], "order_statuses");
    assert_eq!(body["values"], json!([]));

    Ok(())
}

#[tokio::test]
async fn test_setting_values_can_be_removed_one_by_one() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.post_json("/api/settings/regions", &json!({ "values": ["Norte", "Sul"] }))
        .await?;

    // Act
    let removed = app
        .client
        .delete(app.url("/api/settings/regions/Norte"))
        .send()
        .await?;
    let missing_value = app
        .client
        .delete(app.url("/api/settings/regions/Leste"))
        .send()
        .await?;
    let deleted = app.client.delete(app.url("/api/settings/regions")).send().await?;
    let deleted_again = app.client.delete(app.url("/api/settings/regions")).send().await?;

    // Assert
    assert_eq!(removed.status(), 200);
    let body: Value = removed.json().await?;
    assert_eq!(body["values"], json!(["Sul"]));
    assert_eq!(missing_value.status(), 404);
    assert_eq!(deleted.status(), 200);
    assert_eq!(deleted_again.status(), 404);

    Ok(())
}

#[tokio::test]
async fn test_setting_values_must_be_a_list_of_unique_strings() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let not_array = app
        .post_json("/api/settings/regions", &json!({ "values": "Norte" }))
        .await?;
    let duplicated = app
        .post_json("/api/settings/regions", &json!({ "values": ["Norte", " Norte"] }))
        .await?;

    // Assert
    assert_eq!(not_array.status(), 400);
    assert_eq!(duplicated.status(), 409);

    Ok(())
}

#[tokio::test]
async fn test_custom_fields_saved_directly_follow_the_form_rules() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let duplicate_ids = json!({ "values": [
        { "id": "f1", "label": "Budget", "type": "number" },
        { "id": "f1", "label": "Tier", "type": "text" }
    ]});
    let valid = json!({ "values": [
        { "id": "f1", "label": "Annual Budget", "type": "number", "options": ["ignorada"] }
    ]});

    // Act
    let rejected = app.post_json("/api/settings/lead.customFields", &duplicate_ids).await?;
    let saved = app.post_json("/api/settings/lead.customFields", &valid).await?;
    let form: Value = app.get("/api/forms/lead").await?.json().await?;

    // Assert
    assert_eq!(rejected.status(), 409);
    assert_eq!(saved.status(), 200);
    let field = &form["customFields"][0];
    assert_eq!(field["id"], "f1");
    assert_eq!(field["name"], "annual_budget");
    assert_eq!(field["options"], json!([]));

    Ok(())
}

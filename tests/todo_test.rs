//! Lista de tarefas pessoal (rotas autenticadas).

mod common;

use anyhow::Result;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn test_todos_require_authentication() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let list = app.get("/api/todos").await?;
    let create = app.post_json("/api/todos", &json!({ "text": "x" })).await?;

    // Assert
    assert_eq!(list.status(), 401);
    assert_eq!(create.status(), 401);

    Ok(())
}

#[tokio::test]
async fn test_todo_lifecycle_for_the_owner() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let token = app.register_and_login("carol", "carol@example.com").await?;

    // Act
    let created: Value = app
        .client
        .post(app.url("/api/todos"))
        .bearer_auth(&token)
        .json(&json!({ "text": "Ligar para a Acme", "priority": "High" }))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let toggled: Value = app
        .client
        .patch(app.url(&format!("/api/todos/{id}/toggle")))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;
    let updated: Value = app
        .client
        .put(app.url(&format!("/api/todos/{id}")))
        .bearer_auth(&token)
        .json(&json!({ "text": "Ligar para a Acme amanhã", "category": "work" }))
        .send()
        .await?
        .json()
        .await?;
    let deleted = app
        .client
        .delete(app.url(&format!("/api/todos/{id}")))
        .bearer_auth(&token)
        .send()
        .await?;
    let remaining: Vec<Value> = app
        .client
        .get(app.url("/api/todos"))
        .bearer_auth(&token)
        .send()
        .await?
        .json()
        .await?;

    // Assert
    assert_eq!(created["category"], "personal");
    assert_eq!(created["completed"], false);
    assert_eq!(toggled["completed"], true);
    assert_eq!(updated["category"], "work");
    assert_eq!(updated["text"], "Ligar para a Acme amanhã");
    assert_eq!(deleted.status(), 204);
    assert!(remaining.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_todos_are_scoped_to_their_owner() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let owner = app.register_and_login("dani", "dani@example.com").await?;
    let intruder = app.register_and_login("eva", "eva@example.com").await?;
    let created: Value = app
        .client
        .post(app.url("/api/todos"))
        .bearer_auth(&owner)
        .json(&json!({ "text": "Fechar pedido" }))
        .send()
        .await?
        .json()
        .await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    // Act
    let foreign_list: Vec<Value> = app
        .client
        .get(app.url("/api/todos"))
        .bearer_auth(&intruder)
        .send()
        .await?
        .json()
        .await?;
    let foreign_toggle = app
        .client
        .patch(app.url(&format!("/api/todos/{id}/toggle")))
        .bearer_auth(&intruder)
        .send()
        .await?;
    let foreign_delete = app
        .client
        .delete(app.url(&format!("/api/todos/{id}")))
        .bearer_auth(&intruder)
        .send()
        .await?;

    // Assert
    assert!(foreign_list.is_empty());
    assert_eq!(foreign_toggle.status(), 404);
    assert_eq!(foreign_delete.status(), 404);

    Ok(())
}

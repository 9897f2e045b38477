//! Registro, login e rotas protegidas.

mod common;

use anyhow::Result;
use common::TestApp;
use serde_json::{json, Value};

#[tokio::test]
async fn test_register_then_login_returns_profile_and_token() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let register = app
        .post_json(
            "/api/register",
            &json!({
                "username": "maria",
                "email": "maria@example.com",
                "address": "Rua A",
                "state": "SP",
                "password": "segredo123"
            }),
        )
        .await?;
    let login = app
        .post_json("/api/login", &json!({ "username": "maria", "password": "segredo123" }))
        .await?;

    // Assert
    assert_eq!(register.status(), 201);
    assert_eq!(login.status(), 200);
    let body: Value = login.json().await?;
    assert_eq!(body["user"]["email"], "maria@example.com");
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    Ok(())
}

#[tokio::test]
async fn test_register_rejects_duplicate_email_and_bad_payloads() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.register_and_login("ana", "ana@example.com").await?;

    // Act
    let duplicate = app
        .post_json(
            "/api/register",
            &json!({ "username": "ana2", "email": "ANA@example.com", "password": "segredo123" }),
        )
        .await?;
    let invalid = app
        .post_json(
            "/api/register",
            &json!({ "username": "", "email": "not-an-email", "password": "123" }),
        )
        .await?;

    // Assert
    assert_eq!(duplicate.status(), 409);
    assert_eq!(invalid.status(), 400);
    let body: Value = invalid.json().await?;
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());

    Ok(())
}

#[tokio::test]
async fn test_login_failures() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    app.register_and_login("joao", "joao@example.com").await?;

    // Act
    let wrong_password = app
        .post_json("/api/login", &json!({ "email": "joao@example.com", "password": "errada" }))
        .await?;
    let unknown_user = app
        .post_json("/api/login", &json!({ "email": "ninguem@example.com", "password": "x" }))
        .await?;
    let missing = app.post_json("/api/login", &json!({ "password": "x" })).await?;

    // Assert
    assert_eq!(wrong_password.status(), 401);
    assert_eq!(unknown_user.status(), 401);
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_me_requires_a_valid_token() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let token = app.register_and_login("bia", "bia@example.com").await?;

    // Act
    let anonymous = app.get("/api/me").await?;
    let forged = app
        .client
        .get(app.url("/api/me"))
        .bearer_auth("not-a-jwt")
        .send()
        .await?;
    let me = app.client.get(app.url("/api/me")).bearer_auth(&token).send().await?;

    // Assert
    assert_eq!(anonymous.status(), 401);
    assert_eq!(forged.status(), 401);
    assert_eq!(me.status(), 200);
    let body: Value = me.json().await?;
    assert_eq!(body["username"], "bia");

    Ok(())
}

#[tokio::test]
async fn test_error_messages_follow_accept_language() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let response = app
        .client
        .post(app.url("/api/login"))
        .header("Accept-Language", "pt-BR,pt;q=0.9")
        .json(&json!({ "email": "x@example.com", "password": "x" }))
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), 401);
    let body: Value = response.json().await?;
    assert_eq!(body["error"], "E-mail ou senha inválidos.");

    Ok(())
}

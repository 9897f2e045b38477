//! Cotações: numeração, totais calculados no servidor, edição e exportação.

mod common;

use anyhow::Result;
use common::TestApp;
use regex::Regex;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};
use serde_json::{json, Value};

fn quotation_body() -> Value {
    json!({
        "customerName": "Acme",
        "email": "compras@acme.com",
        "items": [
            { "itemName": "Cadeira", "qty": 3, "unit": "pcs", "price": 50, "discount": 0, "tax": 18 }
        ]
    })
}

#[tokio::test]
async fn test_create_quotation_computes_subtotal_and_number() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let number_format = Regex::new(r"^Q-\d{5}$")?;

    // Act
    let response = app.post_json("/api/quotations", &quotation_body()).await?;

    // Assert
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await?;
    assert_eq!(body["items"][0]["subtotal"].as_f64(), Some(177.0));
    assert_eq!(body["totalAmount"].as_f64(), Some(177.0));
    let number = body["quotationNumber"].as_str().unwrap_or_default();
    assert!(number_format.is_match(number), "número inesperado: {number}");
    assert!(body["id"].is_string());
    assert!(body["createdAt"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_quotation_numbers_increase() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let first: Value = app.post_json("/api/quotations", &quotation_body()).await?.json().await?;
    let second: Value = app.post_json("/api/quotations", &quotation_body()).await?.json().await?;

    // Assert
    assert_eq!(first["quotationNumber"], "Q-00001");
    assert_eq!(second["quotationNumber"], "Q-00002");

    Ok(())
}

#[tokio::test]
async fn test_tampered_totals_are_rejected() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let mut tampered_total = quotation_body();
    tampered_total["totalAmount"] = json!(1);
    let mut tampered_item = quotation_body();
    tampered_item["items"][0]["subtotal"] = json!(0.5);

    // Act
    let by_total = app.post_json("/api/quotations", &tampered_total).await?;
    let by_item = app.post_json("/api/quotations", &tampered_item).await?;

    // Assert
    assert_eq!(by_total.status(), 400);
    assert_eq!(by_item.status(), 400);
    // Nada foi gravado
    let list: Vec<Value> = app.get("/api/quotations").await?.json().await?;
    assert!(list.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_quotation_requires_customer_name_and_valid_discount() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let mut no_customer = quotation_body();
    no_customer["customerName"] = json!("  ");
    let mut bad_discount = quotation_body();
    bad_discount["items"][0]["discount"] = json!(150);

    // Act
    let missing = app.post_json("/api/quotations", &no_customer).await?;
    let discount = app.post_json("/api/quotations", &bad_discount).await?;

    // Assert
    assert_eq!(missing.status(), 400);
    let body: Value = missing.json().await?;
    assert!(body["details"]["customerName"].is_array());
    assert_eq!(discount.status(), 400);

    Ok(())
}

#[tokio::test]
async fn test_update_quotation_keeps_its_number() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let created: Value = app.post_json("/api/quotations", &quotation_body()).await?.json().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    let mut changed = quotation_body();
    changed["items"] = json!([
        { "itemName": "Mesa", "qty": 2, "price": 100, "discount": 10, "tax": 5 }
    ]);

    // Act
    let response = app
        .client
        .put(app.url(&format!("/api/quotations/{id}")))
        .json(&changed)
        .send()
        .await?;
    let missing = app
        .client
        .put(app.url(&format!("/api/quotations/{}", uuid::Uuid::new_v4())))
        .json(&changed)
        .send()
        .await?;

    // Assert
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await?;
    assert_eq!(body["quotationNumber"], created["quotationNumber"]);
    assert_eq!(body["totalAmount"].as_f64(), Some(189.0));
    assert_eq!(missing.status(), 404);

    Ok(())
}

#[tokio::test]
async fn test_export_of_missing_quotation_is_not_found() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;

    // Act
    let response = app
        .get(&format!("/api/quotations/{}/export", uuid::Uuid::new_v4()))
        .await?;

    // Assert
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_export_returns_a_pdf_attachment() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let created: Value = app.post_json("/api/quotations", &quotation_body()).await?.json().await?;
    let id = created["id"].as_str().unwrap_or_default().to_string();

    // Act
    let response = app.get(&format!("/api/quotations/{id}/export")).await?;

    // Assert
    assert_eq!(response.status(), 200);
    let header = |name: HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header(CONTENT_TYPE).as_deref(), Some("application/pdf"));
    assert_eq!(
        header(CONTENT_DISPOSITION),
        Some(format!("attachment; filename=quotation-{id}.pdf"))
    );
    let bytes = response.bytes().await?;
    assert!(bytes.starts_with(b"%PDF"));

    Ok(())
}

#[tokio::test]
async fn test_amounts_too_large_for_a_decimal_are_a_bad_request() -> Result<()> {
    // Arrange
    let app = TestApp::spawn().await?;
    let mut body = quotation_body();
    body["items"][0]["qty"] = json!(10);
    body["items"][0]["price"] = json!(1e28);

    // Act
    let response = app.post_json("/api/quotations", &body).await?;

    // Assert
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await?;
    assert!(body["error"].as_str().is_some_and(|e| e.contains("out of range")));

    Ok(())
}

// src/models/sales.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::validation::not_blank, models::record::Entity};

// Dados do cliente copiados para dentro da cotação/pedido no momento da criação
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    #[schema(example = "Acme")]
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,
}

// --- ITENS ---

// O que o cliente envia. `subtotal` é opcional e só serve para conferência.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Cadeira de escritório")]
    pub item_name: String,

    #[serde(default)]
    #[schema(value_type = f64, example = 3)]
    pub qty: Decimal,

    #[schema(example = "pcs")]
    pub unit: Option<String>,

    #[serde(default)]
    #[schema(value_type = f64, example = 50)]
    pub price: Decimal,

    /// Desconto percentual (0 a 100)
    #[serde(default)]
    #[schema(value_type = f64, example = 0)]
    pub discount: Decimal,

    /// Imposto percentual
    #[serde(default)]
    #[schema(value_type = f64, example = 18)]
    pub tax: Decimal,

    #[schema(value_type = Option<f64>, example = 177)]
    pub subtotal: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub item_name: String,
    #[schema(value_type = f64)]
    pub qty: Decimal,
    pub unit: Option<String>,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub discount: Decimal,
    #[schema(value_type = f64)]
    pub tax: Decimal,
    // Sempre recalculado no servidor
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
}

// --- COTAÇÃO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[schema(example = 1)]
    pub quotation_id: i64,
    #[schema(example = "Q-00001")]
    pub quotation_number: String,

    #[serde(flatten)]
    pub customer: CustomerSnapshot,

    pub items: Vec<LineItem>,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

impl Entity for Quotation {
    const COLLECTION: &'static str = "quotations";
}

// --- PEDIDO ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[schema(example = 1024)]
    pub order_id: i64,
    #[schema(example = "O-01024")]
    pub order_number: String,

    // Referência opcional ao cadastro; o snapshot abaixo é o que vale para o pedido
    pub customer_id: Option<Uuid>,

    #[serde(flatten)]
    pub customer: CustomerSnapshot,

    pub items: Vec<LineItem>,
    #[schema(value_type = f64)]
    pub total_amount: Decimal,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

impl Entity for Order {
    const COLLECTION: &'static str = "orders";
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotationPayload {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "required"))]
    #[schema(example = "Acme")]
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    pub items: Vec<LineItemInput>,

    // Conferido contra o total recalculado
    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    // Com `customerId`, os campos em branco abaixo vêm do cadastro do cliente
    pub customer_id: Option<Uuid>,

    #[serde(default)]
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub state: Option<String>,

    #[serde(default)]
    pub items: Vec<LineItemInput>,

    #[schema(value_type = Option<f64>)]
    pub total_amount: Option<Decimal>,

    #[serde(default)]
    #[schema(value_type = Object)]
    pub custom_fields: Map<String, Value>,
}

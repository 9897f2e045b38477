// src/services/sales_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{
        error::AppError,
        listing::{ListPage, ListQuery},
        validation::trimmed,
    },
    db::Repository,
    models::{
        crm::Customer,
        forms::EntityType,
        record::Record,
        sales::{CustomerSnapshot, Order, OrderPayload, Quotation, QuotationPayload},
    },
    services::{
        crm_service::list_view,
        form_schema::FormSchemaService,
        pricing::price_items,
        sequence::{format_sequence, SequenceIssuer, ORDER_SEQUENCE, QUOTATION_SEQUENCE},
    },
};

const QUOTATION_PREFIX: &str = "Q";
const ORDER_PREFIX: &str = "O";

fn customer_name_required() -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("required");
    error.message = Some("required".into());
    errors.add("customer_name", error);
    AppError::ValidationError(errors)
}

// Campo em branco do snapshot é completado com o valor do cadastro
fn fill(target: Option<String>, fallback: &Option<String>) -> Option<String> {
    trimmed(target).or_else(|| fallback.clone())
}

#[derive(Clone)]
pub struct SalesService {
    quotations: Repository<Quotation>,
    orders: Repository<Order>,
    customers: Repository<Customer>,
    sequences: SequenceIssuer,
    forms: FormSchemaService,
}

impl SalesService {
    pub fn new(
        quotations: Repository<Quotation>,
        orders: Repository<Order>,
        customers: Repository<Customer>,
        sequences: SequenceIssuer,
        forms: FormSchemaService,
    ) -> Self {
        Self {
            quotations,
            orders,
            customers,
            sequences,
            forms,
        }
    }

    // =========================================================================
    //  COTAÇÕES
    // =========================================================================

    pub async fn create_quotation(
        &self,
        payload: QuotationPayload,
    ) -> Result<Record<Quotation>, AppError> {
        payload.validate()?;
        let (items, total_amount) = price_items(&payload.items, payload.total_amount, Decimal::ZERO)?;
        self.forms
            .validate_values(EntityType::Quotation, &payload.custom_fields)
            .await?;

        // O número só é consumido depois da validação
        let quotation_id = self.sequences.next(QUOTATION_SEQUENCE).await?;

        let quotation = Quotation {
            quotation_id,
            quotation_number: format_sequence(QUOTATION_PREFIX, quotation_id),
            customer: CustomerSnapshot {
                customer_name: payload.customer_name.trim().to_string(),
                email: trimmed(payload.email),
                phone: trimmed(payload.phone),
                address: trimmed(payload.address),
                state: trimmed(payload.state),
            },
            items,
            total_amount,
            custom_fields: payload.custom_fields,
        };

        let record = self.quotations.insert(&quotation).await?;
        tracing::info!(
            quotation_number = %record.data.quotation_number,
            total = %record.data.total_amount,
            "cotação criada"
        );
        Ok(record)
    }

    /// Substitui o conteúdo da cotação. Número e id sequencial não mudam.
    pub async fn update_quotation(
        &self,
        id: Uuid,
        payload: QuotationPayload,
    ) -> Result<Record<Quotation>, AppError> {
        payload.validate()?;
        let current = self.get_quotation(id).await?;
        let (items, total_amount) = price_items(&payload.items, payload.total_amount, Decimal::ZERO)?;
        self.forms
            .validate_values(EntityType::Quotation, &payload.custom_fields)
            .await?;

        let quotation = Quotation {
            quotation_id: current.data.quotation_id,
            quotation_number: current.data.quotation_number,
            customer: CustomerSnapshot {
                customer_name: payload.customer_name.trim().to_string(),
                email: trimmed(payload.email),
                phone: trimmed(payload.phone),
                address: trimmed(payload.address),
                state: trimmed(payload.state),
            },
            items,
            total_amount,
            custom_fields: payload.custom_fields,
        };

        self.quotations
            .replace(id, &quotation)
            .await?
            .ok_or(AppError::NotFound("quotation"))
    }

    pub async fn list_quotations(&self) -> Result<Vec<Record<Quotation>>, AppError> {
        self.quotations.list().await
    }

    pub async fn get_quotation(&self, id: Uuid) -> Result<Record<Quotation>, AppError> {
        self.quotations
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("quotation"))
    }

    pub async fn quotations_view(&self, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.quotations.list().await?, query)
    }

    // =========================================================================
    //  PEDIDOS
    // =========================================================================

    pub async fn create_order(&self, payload: OrderPayload) -> Result<Record<Order>, AppError> {
        if payload.items.is_empty() {
            return Err(AppError::InvalidInput("an order needs at least one item".to_string()));
        }

        let mut customer = CustomerSnapshot {
            customer_name: payload.customer_name.trim().to_string(),
            email: trimmed(payload.email),
            phone: trimmed(payload.phone),
            address: trimmed(payload.address),
            state: trimmed(payload.state),
        };

        if let Some(customer_id) = payload.customer_id {
            let Some(known) = self.customers.find_by_id(customer_id).await? else {
                return Err(AppError::InvalidReference(format!(
                    "customer {} does not exist",
                    customer_id
                )));
            };
            let known = known.data;
            if customer.customer_name.is_empty() {
                customer.customer_name = known.name;
            }
            customer.email = fill(customer.email, &known.email);
            customer.phone = fill(customer.phone, &known.phone);
            customer.address = fill(customer.address, &known.address);
            customer.state = fill(customer.state, &known.state);
        }

        if customer.customer_name.is_empty() {
            return Err(customer_name_required());
        }

        let (items, total_amount) = price_items(&payload.items, payload.total_amount, Decimal::ONE)?;
        self.forms
            .validate_values(EntityType::Order, &payload.custom_fields)
            .await?;

        let order_id = self.sequences.next(ORDER_SEQUENCE).await?;

        let order = Order {
            order_id,
            order_number: format_sequence(ORDER_PREFIX, order_id),
            customer_id: payload.customer_id,
            customer,
            items,
            total_amount,
            custom_fields: payload.custom_fields,
        };

        let record = self.orders.insert(&order).await?;
        tracing::info!(order_number = %record.data.order_number, "pedido criado");
        Ok(record)
    }

    pub async fn list_orders(&self) -> Result<Vec<Record<Order>>, AppError> {
        self.orders.list().await
    }

    pub async fn get_order(&self, id: Uuid) -> Result<Record<Order>, AppError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("order"))
    }

    pub async fn orders_view(&self, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.orders.list().await?, query)
    }
}

// src/services/crm_service.rs

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        listing::{ListPage, ListQuery},
        validation::trimmed,
    },
    db::Repository,
    models::{
        crm::{CreateCustomerPayload, CreateLeadPayload, Customer, Lead},
        forms::EntityType,
        record::Record,
    },
    services::form_schema::FormSchemaService,
};

/// Serializa os registros e aplica busca / filtros / paginação.
pub fn list_view<T: Serialize>(records: &[T], query: &ListQuery) -> Result<ListPage, AppError> {
    let rows = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()?;
    Ok(query.apply(&rows))
}

#[derive(Clone)]
pub struct CrmService {
    leads: Repository<Lead>,
    customers: Repository<Customer>,
    forms: FormSchemaService,
}

impl CrmService {
    pub fn new(
        leads: Repository<Lead>,
        customers: Repository<Customer>,
        forms: FormSchemaService,
    ) -> Self {
        Self {
            leads,
            customers,
            forms,
        }
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn create_lead(&self, payload: CreateLeadPayload) -> Result<Record<Lead>, AppError> {
        payload.validate()?;
        self.forms
            .validate_values(EntityType::Lead, &payload.custom_fields)
            .await?;

        let lead = Lead {
            name: payload.name.trim().to_string(),
            email: payload.email.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            address: payload.address.trim().to_string(),
            state: payload.state.trim().to_string(),
            source: trimmed(payload.source),
            status: payload.status,
            follow_ups: payload.follow_ups,
            custom_fields: payload.custom_fields,
        };

        let record = self.leads.insert(&lead).await?;
        tracing::info!(lead_id = %record.id, "lead criado");
        Ok(record)
    }

    pub async fn list_leads(&self) -> Result<Vec<Record<Lead>>, AppError> {
        self.leads.list().await
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Record<Lead>, AppError> {
        self.leads
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("lead"))
    }

    pub async fn leads_view(&self, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.leads.list().await?, query)
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

    pub async fn create_customer(
        &self,
        payload: CreateCustomerPayload,
    ) -> Result<Record<Customer>, AppError> {
        payload.validate()?;
        self.forms
            .validate_values(EntityType::Customer, &payload.custom_fields)
            .await?;

        let customer = Customer {
            name: payload.name.trim().to_string(),
            email: trimmed(payload.email),
            phone: trimmed(payload.phone),
            address: trimmed(payload.address),
            state: trimmed(payload.state),
            custom_fields: payload.custom_fields,
        };

        let record = self.customers.insert(&customer).await?;
        tracing::info!(customer_id = %record.id, "cliente criado");
        Ok(record)
    }

    pub async fn list_customers(&self) -> Result<Vec<Record<Customer>>, AppError> {
        self.customers.list().await
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Record<Customer>, AppError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("customer"))
    }

    pub async fn customers_view(&self, query: &ListQuery) -> Result<ListPage, AppError> {
        list_view(&self.customers.list().await?, query)
    }
}

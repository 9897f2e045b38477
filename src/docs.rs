// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Leads / Clientes ---
        handlers::crm::create_lead,
        handlers::crm::list_leads,
        handlers::crm::get_lead,
        handlers::crm::view_leads,
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::view_customers,

        // --- Cotações / Pedidos ---
        handlers::sales::create_quotation,
        handlers::sales::update_quotation,
        handlers::sales::list_quotations,
        handlers::sales::get_quotation,
        handlers::sales::view_quotations,
        handlers::documents::export_quotation_pdf,
        handlers::sales::create_order,
        handlers::sales::list_orders,
        handlers::sales::get_order,
        handlers::sales::view_orders,

        // --- Follow-ups ---
        handlers::followups::create_followup,
        handlers::followups::list_followups,
        handlers::followups::view_followups,

        // --- Settings ---
        handlers::settings::get_setting,
        handlers::settings::save_setting,
        handlers::settings::delete_setting,
        handlers::settings::remove_setting_value,

        // --- Formulários ---
        handlers::forms::get_form,
        handlers::forms::add_field,
        handlers::forms::update_field,
        handlers::forms::remove_field,

        // --- To-Do ---
        handlers::todos::create_todo,
        handlers::todos::list_todos,
        handlers::todos::view_todos,
        handlers::todos::update_todo,
        handlers::todos::toggle_todo,
        handlers::todos::delete_todo,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::LoginResponse,
            models::auth::MessageResponse,

            // --- CRM ---
            models::crm::LeadStatus,
            models::crm::LeadFollowUp,
            models::crm::Lead,
            models::crm::Customer,
            models::crm::CreateLeadPayload,
            models::crm::CreateCustomerPayload,

            // --- Vendas ---
            models::sales::CustomerSnapshot,
            models::sales::LineItemInput,
            models::sales::LineItem,
            models::sales::Quotation,
            models::sales::Order,
            models::sales::QuotationPayload,
            models::sales::OrderPayload,

            // --- Follow-ups ---
            models::followup::RelatedType,
            models::followup::FollowUpStatus,
            models::followup::FollowUp,
            models::followup::CreateFollowUpPayload,

            // --- Settings / Formulários ---
            models::settings::Setting,
            models::settings::UpdateSettingRequest,
            models::forms::EntityType,
            models::forms::FieldDefinition,
            models::forms::FieldDraft,

            // --- To-Do ---
            models::todo::TodoPriority,
            models::todo::Todo,
            models::todo::TodoPayload,

            // --- Listagens ---
            common::listing::ListPage,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Leads", description = "Gestão de Leads"),
        (name = "Customers", description = "Cadastro de Clientes"),
        (name = "Quotations", description = "Cotações e exportação em PDF"),
        (name = "Orders", description = "Pedidos"),
        (name = "FollowUps", description = "Agenda de Follow-ups"),
        (name = "Settings", description = "Listas configuráveis e esquemas de campos"),
        (name = "Forms", description = "Campos personalizados por entidade"),
        (name = "Todos", description = "Lista de tarefas pessoal")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

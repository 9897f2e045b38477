pub mod auth;
pub mod crm_service;
pub mod document_service;
pub mod field_renderer;
pub mod followup_service;
pub mod form_schema;
pub mod pricing;
pub mod sales_service;
pub mod sequence;
pub mod settings_service;
pub mod todo_service;

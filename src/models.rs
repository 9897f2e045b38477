pub mod auth;
pub mod crm;
pub mod followup;
pub mod forms;
pub mod record;
pub mod sales;
pub mod settings;
pub mod todo;

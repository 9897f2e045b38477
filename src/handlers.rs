pub mod auth;
pub mod crm;
pub mod documents;
pub mod followups;
pub mod forms;
pub mod sales;
pub mod settings;
pub mod todos;

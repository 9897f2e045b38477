pub mod error;
pub mod extract;
pub mod i18n;
pub mod listing;
pub mod validation;

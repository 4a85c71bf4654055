//! Domain aggregates exposed by the CRM service layer.

pub mod followup;
pub mod interaction;
pub mod lead;
pub mod template;
pub mod types;

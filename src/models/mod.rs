//! Database models shared across the CRM repository.

pub mod config;
pub mod followup_log;
pub mod interaction;
pub mod lead;
pub mod template;

//! Actix-Web handlers.

pub mod api;
pub mod lead;
pub mod main;
pub mod templates;

//! DTOs exposed by the CRM API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;

/// Query parameters accepted by the `/api/v1/leads` service.
#[derive(Debug, Default, Deserialize)]
pub struct LeadsQuery {
    /// Optional free-form search string applied to the lead list.
    pub search: Option<String>,
    /// Optional page number for pagination.
    pub page: Option<usize>,
}

/// Result payload returned by [`crate::services::api::list_leads`].
#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    /// Total number of leads matching the filter.
    pub total: usize,
    /// Page of leads requested by the caller.
    pub leads: Vec<Lead>,
}

/// Raw values to run through the Polish declension helpers.
#[derive(Debug, Default, Deserialize)]
pub struct PersonalizeQuery {
    pub city: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Declined and formatted forms of [`PersonalizeQuery`]. Absent inputs come
/// back as `None`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PersonalizeResponse {
    pub city_locative: Option<String>,
    pub name_vocative: Option<String>,
    pub phone_display: Option<String>,
}

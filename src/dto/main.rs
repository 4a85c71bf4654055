use pushkind_common::pagination::Paginated;
use serde::Deserialize;

use crate::domain::lead::{Lead, LeadStatus};

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional search string entered by the user.
    pub search: Option<String>,
    /// Optional pipeline status filter, e.g. `contacted`.
    pub status: Option<String>,
    /// Page number requested by the user interface.
    pub page: Option<usize>,
}

/// Data required to render the main index template.
pub struct IndexPageData {
    /// Paginated list of leads to show in the table.
    pub leads: Paginated<Lead>,
    /// Number of leads matching the filters across all pages.
    pub total: usize,
    /// Search query echoed back to the template when present.
    pub search_query: Option<String>,
    pub status_filter: Option<LeadStatus>,
}

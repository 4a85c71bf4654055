//! DTOs shaped for the lead detail template.

use pushkind_common::pagination::Paginated;
use serde::Deserialize;

use crate::domain::followup::{FollowupLog, OutreachStep};
use crate::domain::interaction::LeadInteraction;
use crate::domain::lead::Lead;
use crate::domain::types::LeadId;

/// Query parameters of the lead page.
#[derive(Debug, Default, Deserialize)]
pub struct LeadPageQuery {
    /// Timeline page.
    pub page: Option<usize>,
}

/// Aggregated data required to render the lead details page.
pub struct LeadPageData {
    pub lead: Lead,
    pub interactions: Paginated<LeadInteraction>,
    pub followup_logs: Vec<FollowupLog>,
    /// Step the follow-up processor would send next, if any is due now.
    pub next_step: Option<OutreachStep>,
}

/// Result of a lead mutation so callers can redirect back to it.
#[derive(Debug)]
pub struct LeadOperationOutcome {
    pub lead_id: LeadId,
}

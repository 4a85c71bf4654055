use chrono::NaiveDateTime;

use crate::{
    db::{DbConnection, DbPool},
    domain::{
        followup::{FollowupLog, NewFollowupLog, OutreachStep},
        interaction::{InteractionKind, LeadInteraction, NewLeadInteraction},
        lead::{Lead, LeadStatus, NewLead, UpdateLead},
        template::{
            EmailTemplate, EmailTemplateKind, NewEmailTemplate, NewSmsTemplate, SmsTemplate,
        },
        types::{HubId, LeadId},
    },
    outreach::DueCutoffs,
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod followup_log;
pub mod interaction;
pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod template;

/// Diesel-backed implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Rows to skip; saturates so absurd page numbers just yield an empty page.
    fn offset(&self) -> i64 {
        let offset = self.page.max(1).saturating_sub(1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

#[derive(Debug, Clone)]
pub struct LeadListQuery {
    pub hub_id: HubId,
    pub search: Option<String>,
    pub status: Option<LeadStatus>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone)]
pub struct InteractionListQuery {
    pub lead_id: LeadId,
    pub kind: Option<InteractionKind>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new(hub_id: HubId) -> Self {
        Self {
            hub_id,
            search: None,
            status: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

impl InteractionListQuery {
    pub fn new(lead_id: LeadId) -> Self {
        Self {
            lead_id,
            kind: None,
            pagination: None,
        }
    }

    pub fn kind(mut self, kind: InteractionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    /// Leads of every hub with an automated step due by `due`, oldest cold
    /// email first. `limit` counts due leads only.
    fn list_outreach_candidates(
        &self,
        due: DueCutoffs,
        limit: usize,
    ) -> RepositoryResult<Vec<Lead>>;
}

pub trait LeadWriter {
    /// Inserts leads, silently skipping ones whose email already exists in the hub.
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    fn update_lead(&self, id: LeadId, hub_id: HubId, updates: &UpdateLead)
    -> RepositoryResult<Lead>;
    fn update_lead_status(
        &self,
        id: LeadId,
        hub_id: HubId,
        status: LeadStatus,
    ) -> RepositoryResult<Lead>;
    fn delete_lead(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<()>;
    /// Records that `step` went out at `at`. Sending the cold email also
    /// moves a `New` lead to `Contacted`.
    fn mark_step_sent(
        &self,
        id: LeadId,
        step: OutreachStep,
        at: NaiveDateTime,
    ) -> RepositoryResult<Lead>;
}

pub trait TemplateReader {
    fn list_email_templates(&self, hub_id: HubId) -> RepositoryResult<Vec<EmailTemplate>>;
    fn get_email_template(
        &self,
        hub_id: HubId,
        kind: EmailTemplateKind,
    ) -> RepositoryResult<Option<EmailTemplate>>;
    fn get_sms_template(&self, hub_id: HubId) -> RepositoryResult<Option<SmsTemplate>>;
}

pub trait TemplateWriter {
    fn upsert_email_template(&self, template: &NewEmailTemplate)
    -> RepositoryResult<EmailTemplate>;
    fn upsert_sms_template(&self, template: &NewSmsTemplate) -> RepositoryResult<SmsTemplate>;
}

pub trait InteractionReader {
    fn list_interactions(
        &self,
        query: InteractionListQuery,
    ) -> RepositoryResult<(usize, Vec<LeadInteraction>)>;
}

pub trait InteractionWriter {
    fn create_interaction(
        &self,
        interaction: &NewLeadInteraction,
    ) -> RepositoryResult<LeadInteraction>;
}

pub trait FollowupLogReader {
    fn list_followup_logs(&self, lead_id: LeadId) -> RepositoryResult<Vec<FollowupLog>>;
}

pub trait FollowupLogWriter {
    fn create_followup_log(&self, log: &NewFollowupLog) -> RepositoryResult<FollowupLog>;
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn first_page_starts_at_zero() {
        let pagination = Pagination { page: 0, per_page: 20 };
        assert_eq!(pagination.offset(), 0);
        let pagination = Pagination { page: 3, per_page: 20 };
        assert_eq!(pagination.offset(), 40);
        assert_eq!(pagination.limit(), 20);
    }

    #[test]
    fn huge_page_numbers_saturate() {
        let pagination = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(pagination.offset(), i64::MAX);

        let pagination = Pagination {
            page: 2,
            per_page: usize::MAX,
        };
        assert_eq!(pagination.limit(), i64::MAX);
        assert_eq!(pagination.offset(), i64::MAX);
    }
}

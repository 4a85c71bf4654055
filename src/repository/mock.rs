//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::followup::{FollowupLog, NewFollowupLog, OutreachStep};
use crate::domain::interaction::{LeadInteraction, NewLeadInteraction};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::template::{
    EmailTemplate, EmailTemplateKind, NewEmailTemplate, NewSmsTemplate, SmsTemplate,
};
use crate::domain::types::{HubId, LeadId};
use crate::outreach::DueCutoffs;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    FollowupLogReader, FollowupLogWriter, InteractionListQuery, InteractionReader,
    InteractionWriter, LeadListQuery, LeadReader, LeadWriter, TemplateReader, TemplateWriter,
};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
        fn list_outreach_candidates(
            &self,
            due: DueCutoffs,
            limit: usize,
        ) -> RepositoryResult<Vec<Lead>>;
    }

    impl LeadWriter for Repository {
        fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
        fn update_lead(
            &self,
            id: LeadId,
            hub_id: HubId,
            updates: &UpdateLead,
        ) -> RepositoryResult<Lead>;
        fn update_lead_status(
            &self,
            id: LeadId,
            hub_id: HubId,
            status: LeadStatus,
        ) -> RepositoryResult<Lead>;
        fn delete_lead(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<()>;
        fn mark_step_sent(
            &self,
            id: LeadId,
            step: OutreachStep,
            at: NaiveDateTime,
        ) -> RepositoryResult<Lead>;
    }

    impl TemplateReader for Repository {
        fn list_email_templates(&self, hub_id: HubId) -> RepositoryResult<Vec<EmailTemplate>>;
        fn get_email_template(
            &self,
            hub_id: HubId,
            kind: EmailTemplateKind,
        ) -> RepositoryResult<Option<EmailTemplate>>;
        fn get_sms_template(&self, hub_id: HubId) -> RepositoryResult<Option<SmsTemplate>>;
    }

    impl TemplateWriter for Repository {
        fn upsert_email_template(
            &self,
            template: &NewEmailTemplate,
        ) -> RepositoryResult<EmailTemplate>;
        fn upsert_sms_template(&self, template: &NewSmsTemplate) -> RepositoryResult<SmsTemplate>;
    }

    impl InteractionReader for Repository {
        fn list_interactions(
            &self,
            query: InteractionListQuery,
        ) -> RepositoryResult<(usize, Vec<LeadInteraction>)>;
    }

    impl InteractionWriter for Repository {
        fn create_interaction(
            &self,
            interaction: &NewLeadInteraction,
        ) -> RepositoryResult<LeadInteraction>;
    }

    impl FollowupLogReader for Repository {
        fn list_followup_logs(&self, lead_id: LeadId) -> RepositoryResult<Vec<FollowupLog>>;
    }

    impl FollowupLogWriter for Repository {
        fn create_followup_log(&self, log: &NewFollowupLog) -> RepositoryResult<FollowupLog>;
    }
}

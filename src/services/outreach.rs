//! Manually triggered outreach: the cold email that starts the sequence.

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::followup::{NewFollowupLog, OutreachStep};
use crate::domain::lead::Lead;
use crate::domain::types::{HubId, LeadId};
use crate::outreach::Mailer;
use crate::outreach::processor::deliver_email;
use crate::repository::{
    FollowupLogWriter, InteractionWriter, LeadReader, LeadWriter, TemplateReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Sends the hub's cold email template to a lead. On success the lead's
/// `cold_email_sent_at` is set and a `New` lead becomes `Contacted`, which
/// hands it over to the follow-up processor.
pub fn send_cold_email<R, M>(
    repo: &R,
    mailer: &M,
    user: &AuthenticatedUser,
    lead_id: i32,
    now: NaiveDateTime,
) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + TemplateReader + InteractionWriter + FollowupLogWriter + ?Sized,
    M: Mailer + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(lead_id)?;

    let lead = repo
        .get_lead_by_id(lead_id, hub_id)
        .map_err(|err| {
            log::error!("Failed to get lead: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    if lead.outreach.cold_email_sent_at.is_some() {
        return Err(ServiceError::Form(
            "Cold email do tego leada został już wysłany.".to_string(),
        ));
    }
    if !lead.status.accepts_outreach() {
        return Err(ServiceError::Form(format!(
            "Lead ma status `{}`, wysyłka jest wstrzymana.",
            lead.status
        )));
    }

    let step = OutreachStep::ColdEmail;
    match deliver_email(repo, mailer, &user.name, &lead, step, now) {
        Ok(updated) => {
            log::info!("Cold email sent to lead {lead_id} by {}", user.email);
            Ok(updated)
        }
        Err(err) => {
            log::error!("Failed to send cold email to lead {lead_id}: {err}");
            let entry = NewFollowupLog::failed(hub_id, lead_id, step, err.to_string());
            if let Err(log_err) = repo.create_followup_log(&entry) {
                log::error!("Failed to write audit log for lead {lead_id}: {log_err}");
            }
            Err(err.into())
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::followup::FollowupLog;
    use crate::domain::interaction::LeadInteraction;
    use crate::domain::lead::LeadStatus;
    use crate::domain::template::{EmailTemplate, EmailTemplateKind};
    use crate::domain::types::{
        FollowupLogId, InteractionId, TemplateBody, TemplateId, TemplateSubject,
    };
    use crate::outreach::{DeliveryError, MockMailer};
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{fixed_now, member_user, outsider_user, sample_lead};

    fn cold_template() -> EmailTemplate {
        EmailTemplate {
            id: TemplateId::new(1).unwrap(),
            hub_id: HubId::new(42).unwrap(),
            kind: EmailTemplateKind::ColdEmail,
            subject: TemplateSubject::new("Nowi klienci w {{miasto}}").unwrap(),
            body: TemplateBody::new("<p>Dzień dobry {{imie}}!</p>").unwrap(),
            updated_at: fixed_now(),
        }
    }

    fn expect_audit(repo: &mut MockRepository, success: bool) {
        repo.expect_create_followup_log()
            .withf(move |entry| entry.success == success && entry.step == OutreachStep::ColdEmail)
            .times(1)
            .returning(|entry| {
                Ok(FollowupLog {
                    id: FollowupLogId::new(1).unwrap(),
                    hub_id: entry.hub_id,
                    lead_id: entry.lead_id,
                    step: entry.step,
                    success: entry.success,
                    error: entry.error.clone(),
                    created_at: fixed_now(),
                })
            });
    }

    #[test]
    fn requires_access_role() {
        let repo = MockRepository::new();
        let mailer = MockMailer::new();

        let result = send_cold_email(&repo, &mailer, &outsider_user(), 7, fixed_now());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn sends_personalized_email_and_marks_lead() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(sample_lead(7))));
        repo.expect_get_email_template()
            .returning(|_, _| Ok(Some(cold_template())));
        repo.expect_mark_step_sent()
            .withf(|id, step, at| {
                id.get() == 7 && *step == OutreachStep::ColdEmail && *at == fixed_now()
            })
            .times(1)
            .returning(|_, _, at| {
                let mut lead = sample_lead(7);
                lead.status = LeadStatus::Contacted;
                lead.outreach.cold_email_sent_at = Some(at);
                Ok(lead)
            });
        repo.expect_create_interaction()
            .withf(|interaction| interaction.author.as_str() == "Ola")
            .returning(|interaction| {
                Ok(LeadInteraction {
                    id: InteractionId::new(1).unwrap(),
                    lead_id: interaction.lead_id,
                    author: interaction.author.clone(),
                    kind: interaction.kind.clone(),
                    data: interaction.data.clone(),
                    created_at: fixed_now(),
                })
            });
        expect_audit(&mut repo, true);

        let mut mailer = MockMailer::new();
        mailer
            .expect_send_email()
            .withf(|email| {
                email.to == "bella@example.com"
                    && email.subject == "Nowi klienci w Gdańsku"
                    && email.html == "<p>Dzień dobry Anno!</p>"
            })
            .times(1)
            .returning(|_| Ok(()));

        let lead = send_cold_email(&repo, &mailer, &member_user(), 7, fixed_now()).unwrap();

        assert_eq!(lead.status, LeadStatus::Contacted);
        assert_eq!(lead.outreach.cold_email_sent_at, Some(fixed_now()));
    }

    #[test]
    fn refuses_to_send_twice() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id().returning(|_, _| {
            let mut lead = sample_lead(7);
            lead.outreach.cold_email_sent_at = Some(fixed_now());
            Ok(Some(lead))
        });
        let mut mailer = MockMailer::new();
        mailer.expect_send_email().times(0);

        let result = send_cold_email(&repo, &mailer, &member_user(), 7, fixed_now());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn delivery_failure_is_audited_and_lead_left_unsent() {
        let mut repo = MockRepository::new();
        repo.expect_get_lead_by_id()
            .returning(|_, _| Ok(Some(sample_lead(7))));
        repo.expect_get_email_template()
            .returning(|_, _| Ok(Some(cold_template())));
        repo.expect_mark_step_sent().times(0);
        expect_audit(&mut repo, false);

        let mut mailer = MockMailer::new();
        mailer.expect_send_email().returning(|_| {
            Err(DeliveryError::Rejected {
                status: 422,
                body: "invalid recipient".into(),
            })
        });

        let result = send_cold_email(&repo, &mailer, &member_user(), 7, fixed_now());

        assert!(matches!(result, Err(ServiceError::Delivery(_))));
    }
}

//! Batch job sending the SMS nudge and both follow-ups once they are due.
//!
//! One run loads a bounded list of leads with a step due and walks it in order.
//! A failure on one lead is logged, written to the audit table and counted;
//! the loop then moves on. There is no retry: a failed step stays unsent and
//! is picked up again by the next run.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;

use crate::domain::followup::{NewFollowupLog, OutreachStep};
use crate::domain::interaction::{InteractionKind, NewLeadInteraction};
use crate::domain::lead::Lead;
use crate::domain::types::AuthorName;
use crate::outreach::render::render_step;
use crate::outreach::schedule::{OutreachSchedule, next_due_step};
use crate::outreach::{
    AUTOMATION_AUTHOR, Mailer, OutgoingEmail, OutgoingSms, OutreachError, SmsGateway,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    FollowupLogWriter, InteractionWriter, LeadReader, LeadWriter, TemplateReader,
};

/// Counters describing one processor run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FollowupReport {
    /// Candidates examined.
    pub processed: usize,
    pub sent: usize,
    /// Candidates with no step due yet.
    pub skipped: usize,
    pub failed: usize,
}

/// Writes the timeline entry and success audit row for a delivered step.
///
/// The step is already marked as sent at this point, so failures here are
/// only logged.
fn record_delivery<R>(
    repo: &R,
    author: &str,
    lead: &Lead,
    step: OutreachStep,
    kind: InteractionKind,
    data: serde_json::Value,
) where
    R: InteractionWriter + FollowupLogWriter + ?Sized,
{
    match AuthorName::new(author) {
        Ok(author) => {
            let interaction = NewLeadInteraction::new(lead.id, author, kind, data);
            if let Err(err) = repo.create_interaction(&interaction) {
                log::warn!(
                    "Failed to record {step} interaction for lead {}: {err}",
                    lead.id
                );
            }
        }
        Err(err) => log::warn!("Invalid interaction author `{author}`: {err}"),
    }

    let entry = NewFollowupLog::sent(lead.hub_id, lead.id, step);
    if let Err(err) = repo.create_followup_log(&entry) {
        log::warn!("Failed to write {step} audit log for lead {}: {err}", lead.id);
    }
}

/// Renders and emails `step` to `lead`, then marks it as sent. `author` is
/// recorded on the timeline entry.
pub fn deliver_email<R, M>(
    repo: &R,
    mailer: &M,
    author: &str,
    lead: &Lead,
    step: OutreachStep,
    now: NaiveDateTime,
) -> Result<Lead, OutreachError>
where
    R: TemplateReader + LeadWriter + InteractionWriter + FollowupLogWriter + ?Sized,
    M: Mailer + ?Sized,
{
    let to = lead
        .email
        .as_ref()
        .ok_or(OutreachError::MissingRecipient(step))?;
    let message = render_step(repo, lead, step)?;
    let subject = message.subject.unwrap_or_default();

    mailer.send_email(&OutgoingEmail {
        to: to.as_str().to_string(),
        subject: subject.clone(),
        html: message.body,
    })?;

    let updated = repo.mark_step_sent(lead.id, step, now)?;

    record_delivery(
        repo,
        author,
        lead,
        step,
        InteractionKind::Email,
        json!({
            "text": subject,
            "step": step.as_str(),
        }),
    );

    Ok(updated)
}

/// Renders and texts the SMS nudge to `lead`, then marks it as sent.
pub fn deliver_sms<R, S>(
    repo: &R,
    gateway: &S,
    lead: &Lead,
    now: NaiveDateTime,
) -> Result<Lead, OutreachError>
where
    R: TemplateReader + LeadWriter + InteractionWriter + FollowupLogWriter + ?Sized,
    S: SmsGateway + ?Sized,
{
    let step = OutreachStep::Sms;
    let to = lead
        .phone
        .as_ref()
        .ok_or(OutreachError::MissingRecipient(step))?;
    let message = render_step(repo, lead, step)?;

    gateway.send_sms(&OutgoingSms {
        hub_id: lead.hub_id.get(),
        to: to.as_str().to_string(),
        text: message.body.clone(),
    })?;

    let updated = repo.mark_step_sent(lead.id, step, now)?;

    record_delivery(
        repo,
        AUTOMATION_AUTHOR,
        lead,
        step,
        InteractionKind::Sms,
        json!({
            "text": message.body,
            "step": step.as_str(),
        }),
    );

    Ok(updated)
}

pub struct FollowupProcessor<'a, R: ?Sized, M: ?Sized, S: ?Sized> {
    repo: &'a R,
    mailer: &'a M,
    sms: &'a S,
    schedule: OutreachSchedule,
    batch_limit: usize,
}

impl<'a, R, M, S> FollowupProcessor<'a, R, M, S>
where
    R: LeadReader
        + LeadWriter
        + TemplateReader
        + InteractionWriter
        + FollowupLogWriter
        + ?Sized,
    M: Mailer + ?Sized,
    S: SmsGateway + ?Sized,
{
    pub fn new(
        repo: &'a R,
        mailer: &'a M,
        sms: &'a S,
        schedule: OutreachSchedule,
        batch_limit: usize,
    ) -> Self {
        Self {
            repo,
            mailer,
            sms,
            schedule,
            batch_limit,
        }
    }

    fn deliver(
        &self,
        lead: &Lead,
        step: OutreachStep,
        now: NaiveDateTime,
    ) -> Result<(), OutreachError> {
        match step {
            OutreachStep::Sms => deliver_sms(self.repo, self.sms, lead, now)?,
            _ => deliver_email(self.repo, self.mailer, AUTOMATION_AUTHOR, lead, step, now)?,
        };
        Ok(())
    }

    /// Sends every step due at `now`. Only loading the candidate list can
    /// fail the run as a whole.
    pub fn run(&self, now: NaiveDateTime) -> RepositoryResult<FollowupReport> {
        let candidates = self
            .repo
            .list_outreach_candidates(self.schedule.cutoffs(now), self.batch_limit)?;
        let mut report = FollowupReport::default();

        for lead in candidates {
            report.processed += 1;

            let Some(step) = next_due_step(&lead, &self.schedule, now) else {
                report.skipped += 1;
                continue;
            };

            match self.deliver(&lead, step, now) {
                Ok(()) => {
                    report.sent += 1;
                    log::info!("Sent {step} to lead {} (hub {})", lead.id, lead.hub_id);
                }
                Err(err) => {
                    report.failed += 1;
                    log::error!("Failed to send {step} to lead {}: {err}", lead.id);
                    let entry =
                        NewFollowupLog::failed(lead.hub_id, lead.id, step, err.to_string());
                    if let Err(log_err) = self.repo.create_followup_log(&entry) {
                        log::error!("Failed to write audit log for lead {}: {log_err}", lead.id);
                    }
                }
            }
        }

        Ok(report)
    }
}

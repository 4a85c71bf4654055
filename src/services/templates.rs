//! Services behind the template editor and the per-lead preview.

use validator::Validate;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::ensure_role;

use crate::domain::followup::OutreachStep;
use crate::domain::template::EmailTemplateKind;
use crate::domain::types::{HubId, LeadId};
use crate::dto::template::{EmailTemplateSlot, StepPreview, TemplatePreviewData, TemplatesPageData};
use crate::forms::template::{EmailTemplateForm, SmsTemplateForm};
use crate::outreach::{OutreachError, render_step};
use crate::repository::{LeadReader, TemplateReader, TemplateWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads every template slot of the hub, saved or not.
pub fn load_templates_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<TemplatesPageData>
where
    R: TemplateReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;

    let mut saved = repo.list_email_templates(hub_id).map_err(|err| {
        log::error!("Failed to list email templates: {err}");
        err
    })?;
    let email_templates = EmailTemplateKind::ALL
        .into_iter()
        .map(|kind| EmailTemplateSlot {
            kind,
            template: saved
                .iter()
                .position(|t| t.kind == kind)
                .map(|index| saved.swap_remove(index)),
        })
        .collect();

    let sms_template = repo.get_sms_template(hub_id).map_err(|err| {
        log::error!("Failed to load SMS template: {err}");
        err
    })?;

    Ok(TemplatesPageData {
        email_templates,
        sms_template,
    })
}

pub fn save_email_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EmailTemplateForm,
) -> ServiceResult<EmailTemplateKind>
where
    R: TemplateWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Temat i treść szablonu są wymagane.".to_string(),
        ));
    }

    let hub_id = HubId::new(user.hub_id)?;
    let template = form.into_domain(hub_id).map_err(|err| {
        log::error!("Failed to build email template: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let saved = repo.upsert_email_template(&template).map_err(|err| {
        log::error!("Failed to save email template: {err}");
        err
    })?;

    Ok(saved.kind)
}

pub fn save_sms_template<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SmsTemplateForm,
) -> ServiceResult<()>
where
    R: TemplateWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Treść SMS jest wymagana i może mieć najwyżej 306 znaków.".to_string(),
        ));
    }

    let hub_id = HubId::new(user.hub_id)?;
    let template = form.into_domain(hub_id).map_err(|err| {
        log::error!("Failed to build SMS template: {err}");
        ServiceError::Form(err.to_string())
    })?;

    repo.upsert_sms_template(&template).map_err(|err| {
        log::error!("Failed to save SMS template: {err}");
        err
    })?;

    Ok(())
}

/// Renders every step of the sequence for one lead. Steps without a saved
/// template are returned with no message.
pub fn preview_templates<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
) -> ServiceResult<TemplatePreviewData>
where
    R: LeadReader + TemplateReader + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(lead_id)?;

    let lead = repo
        .get_lead_by_id(lead_id, hub_id)?
        .ok_or(ServiceError::NotFound)?;

    let mut steps = Vec::with_capacity(OutreachStep::ALL.len());
    for step in OutreachStep::ALL {
        let message = match render_step(repo, &lead, step) {
            Ok(message) => Some(message),
            Err(OutreachError::MissingTemplate(_)) => None,
            Err(err) => {
                log::error!("Failed to render {step} for lead {lead_id}: {err}");
                return Err(err.into());
            }
        };
        steps.push(StepPreview { step, message });
    }

    Ok(TemplatePreviewData { lead, steps })
}

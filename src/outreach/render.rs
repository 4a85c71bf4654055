use serde::Serialize;

use crate::domain::followup::OutreachStep;
use crate::domain::lead::Lead;
use crate::outreach::OutreachError;
use crate::personalization::personalize;
use crate::repository::TemplateReader;

/// A template filled in for one lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub step: OutreachStep,
    /// Email subject; `None` for the SMS step.
    pub subject: Option<String>,
    pub body: String,
}

/// Loads the hub template for `step` and personalizes it for `lead`.
pub fn render_step<R>(
    repo: &R,
    lead: &Lead,
    step: OutreachStep,
) -> Result<RenderedMessage, OutreachError>
where
    R: TemplateReader + ?Sized,
{
    let ctx = lead.personalization();

    match step.email_template() {
        Some(kind) => {
            let template = repo
                .get_email_template(lead.hub_id, kind)?
                .ok_or(OutreachError::MissingTemplate(step))?;
            Ok(RenderedMessage {
                step,
                subject: Some(personalize(template.subject.as_str(), &ctx)),
                body: personalize(template.body.as_str(), &ctx),
            })
        }
        None => {
            let template = repo
                .get_sms_template(lead.hub_id)?
                .ok_or(OutreachError::MissingTemplate(step))?;
            Ok(RenderedMessage {
                step,
                subject: None,
                body: personalize(template.body.as_str(), &ctx),
            })
        }
    }
}

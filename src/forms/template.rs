//! Forms for editing the hub's outreach templates.

use serde::Deserialize;
use validator::Validate;

use crate::domain::template::{EmailTemplateKind, NewEmailTemplate, NewSmsTemplate};
use crate::domain::types::{HubId, SmsText, TemplateBody, TemplateSubject};
use crate::forms::FormError;

/// Longest SMS body accepted, before personalization. Two concatenated
/// GSM-7 segments.
pub const SMS_MAX_CHARS: u64 = 306;

#[derive(Debug, Deserialize, Validate)]
pub struct EmailTemplateForm {
    /// `cold_email`, `followup_1` or `followup_2`.
    pub kind: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub body: String,
}

impl EmailTemplateForm {
    pub fn into_domain(self, hub_id: HubId) -> Result<NewEmailTemplate, FormError> {
        let kind = self
            .kind
            .parse::<EmailTemplateKind>()
            .map_err(|err| FormError::InvalidTemplate(err.to_string()))?;
        let subject = TemplateSubject::new(self.subject)
            .map_err(|err| FormError::InvalidTemplate(err.to_string()))?;
        let body =
            TemplateBody::new(self.body).map_err(|err| FormError::InvalidTemplate(err.to_string()))?;

        Ok(NewEmailTemplate {
            hub_id,
            kind,
            subject,
            body,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SmsTemplateForm {
    #[validate(length(min = 1, max = SMS_MAX_CHARS))]
    pub body: String,
}

impl SmsTemplateForm {
    pub fn into_domain(self, hub_id: HubId) -> Result<NewSmsTemplate, FormError> {
        let body =
            SmsText::new(self.body).map_err(|err| FormError::InvalidTemplate(err.to_string()))?;
        Ok(NewSmsTemplate { hub_id, body })
    }
}

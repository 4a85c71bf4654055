use serde::Serialize;

use crate::domain::followup::OutreachStep;
use crate::domain::lead::Lead;
use crate::domain::template::{EmailTemplate, EmailTemplateKind, SmsTemplate};
use crate::outreach::RenderedMessage;

/// One editor slot per email kind, filled when the hub has saved it.
#[derive(Debug, Serialize)]
pub struct EmailTemplateSlot {
    pub kind: EmailTemplateKind,
    pub template: Option<EmailTemplate>,
}

#[derive(Debug)]
pub struct TemplatesPageData {
    pub email_templates: Vec<EmailTemplateSlot>,
    pub sms_template: Option<SmsTemplate>,
}

#[derive(Debug, Serialize)]
pub struct StepPreview {
    pub step: OutreachStep,
    /// `None` when the hub has no template for this step yet.
    pub message: Option<RenderedMessage>,
}

/// Every step of the sequence rendered for one lead.
#[derive(Debug)]
pub struct TemplatePreviewData {
    pub lead: Lead,
    pub steps: Vec<StepPreview>,
}

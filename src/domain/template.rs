//! Email and SMS templates, one per hub and outreach step.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    HubId, SmsText, TemplateBody, TemplateId, TemplateSubject, TypeConstraintError,
};

/// Which email of the sequence a template is written for.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmailTemplateKind {
    ColdEmail,
    #[serde(rename = "followup_1")]
    FollowUp1,
    #[serde(rename = "followup_2")]
    FollowUp2,
}

impl EmailTemplateKind {
    pub const ALL: [EmailTemplateKind; 3] = [
        EmailTemplateKind::ColdEmail,
        EmailTemplateKind::FollowUp1,
        EmailTemplateKind::FollowUp2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EmailTemplateKind::ColdEmail => "cold_email",
            EmailTemplateKind::FollowUp1 => "followup_1",
            EmailTemplateKind::FollowUp2 => "followup_2",
        }
    }
}

impl Display for EmailTemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailTemplateKind {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailTemplateKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("template kind `{s}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailTemplate {
    pub id: TemplateId,
    pub hub_id: HubId,
    pub kind: EmailTemplateKind,
    pub subject: TemplateSubject,
    pub body: TemplateBody,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewEmailTemplate {
    pub hub_id: HubId,
    pub kind: EmailTemplateKind,
    pub subject: TemplateSubject,
    pub body: TemplateBody,
}

/// The SMS nudge sent between the cold email and the first follow-up.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SmsTemplate {
    pub id: TemplateId,
    pub hub_id: HubId,
    pub body: SmsText,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewSmsTemplate {
    pub hub_id: HubId,
    pub body: SmsText,
}

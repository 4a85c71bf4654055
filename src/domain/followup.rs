//! Outreach steps and the audit trail written by the follow-up processor.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::template::EmailTemplateKind;
use crate::domain::types::{FollowupLogId, HubId, LeadId, TypeConstraintError};

/// One message of the fixed outreach sequence, in sending order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum OutreachStep {
    ColdEmail,
    Sms,
    #[serde(rename = "followup_1")]
    FollowUp1,
    #[serde(rename = "followup_2")]
    FollowUp2,
}

impl OutreachStep {
    pub const ALL: [OutreachStep; 4] = [
        OutreachStep::ColdEmail,
        OutreachStep::Sms,
        OutreachStep::FollowUp1,
        OutreachStep::FollowUp2,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutreachStep::ColdEmail => "cold_email",
            OutreachStep::Sms => "sms",
            OutreachStep::FollowUp1 => "followup_1",
            OutreachStep::FollowUp2 => "followup_2",
        }
    }

    /// Email template used by this step; `None` for the SMS step.
    pub fn email_template(self) -> Option<EmailTemplateKind> {
        match self {
            OutreachStep::ColdEmail => Some(EmailTemplateKind::ColdEmail),
            OutreachStep::Sms => None,
            OutreachStep::FollowUp1 => Some(EmailTemplateKind::FollowUp1),
            OutreachStep::FollowUp2 => Some(EmailTemplateKind::FollowUp2),
        }
    }
}

impl Display for OutreachStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutreachStep {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutreachStep::ALL
            .into_iter()
            .find(|step| step.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("outreach step `{s}`")))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FollowupLog {
    pub id: FollowupLogId,
    pub hub_id: HubId,
    pub lead_id: LeadId,
    pub step: OutreachStep,
    pub success: bool,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewFollowupLog {
    pub hub_id: HubId,
    pub lead_id: LeadId,
    pub step: OutreachStep,
    pub success: bool,
    pub error: Option<String>,
}

impl NewFollowupLog {
    pub fn sent(hub_id: HubId, lead_id: LeadId, step: OutreachStep) -> Self {
        Self {
            hub_id,
            lead_id,
            step,
            success: true,
            error: None,
        }
    }

    pub fn failed(hub_id: HubId, lead_id: LeadId, step: OutreachStep, error: String) -> Self {
        Self {
            hub_id,
            lead_id,
            step,
            success: false,
            error: Some(error),
        }
    }
}

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::domain::types::{AuthorName, InteractionId, LeadId};

/// Timeline entry on a lead: notes, calls and every message we sent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadInteraction {
    pub id: InteractionId,
    pub lead_id: LeadId,
    pub author: AuthorName,
    pub kind: InteractionKind,
    pub data: Value,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum InteractionKind {
    Comment,
    Call,
    Email,
    Sms,
    Meeting,
    Other(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLeadInteraction {
    pub lead_id: LeadId,
    pub author: AuthorName,
    pub kind: InteractionKind,
    pub data: Value,
}

impl NewLeadInteraction {
    #[must_use]
    pub fn new(lead_id: LeadId, author: AuthorName, kind: InteractionKind, data: Value) -> Self {
        Self {
            lead_id,
            author,
            kind,
            data,
        }
    }
}

impl Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionKind::Comment => write!(f, "Comment"),
            InteractionKind::Call => write!(f, "Call"),
            InteractionKind::Email => write!(f, "Email"),
            InteractionKind::Sms => write!(f, "Sms"),
            InteractionKind::Meeting => write!(f, "Meeting"),
            InteractionKind::Other(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for InteractionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for InteractionKind {
    fn from(s: &str) -> Self {
        match s {
            "Comment" => InteractionKind::Comment,
            "Call" => InteractionKind::Call,
            "Email" => InteractionKind::Email,
            "Sms" => InteractionKind::Sms,
            "Meeting" => InteractionKind::Meeting,
            _ => InteractionKind::Other(s.to_string()),
        }
    }
}

impl From<String> for InteractionKind {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

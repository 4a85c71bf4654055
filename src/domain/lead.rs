//! Lead aggregate: a salon we are trying to sign, plus its outreach state.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CityName, ContactName, HubId, LeadEmail, LeadId, PhoneNumber, SalonName,
    TypeConstraintError,
};
use crate::personalization::Personalization;

/// Pipeline position of a lead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Replied,
    MeetingScheduled,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Replied,
        LeadStatus::MeetingScheduled,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    /// Whether the automated sequence may still message this lead.
    pub fn accepts_outreach(self) -> bool {
        matches!(self, LeadStatus::New | LeadStatus::Contacted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Replied => "replied",
            LeadStatus::MeetingScheduled => "meeting_scheduled",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("lead status `{s}`")))
    }
}

/// Timestamps and flags tracking which outreach steps already went out.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutreachState {
    pub cold_email_sent_at: Option<NaiveDateTime>,
    pub sms_sent: bool,
    pub sms_sent_at: Option<NaiveDateTime>,
    pub followup_1_sent: bool,
    pub followup_1_sent_at: Option<NaiveDateTime>,
    pub followup_2_sent: bool,
    pub followup_2_sent_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Lead {
    pub id: LeadId,
    pub hub_id: HubId,
    pub salon_name: SalonName,
    pub contact_name: Option<ContactName>,
    pub email: Option<LeadEmail>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<CityName>,
    pub status: LeadStatus,
    pub notes: Option<String>,
    pub outreach: OutreachState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Lead {
    /// Values used to fill `{{placeholders}}` in templates addressed to this lead.
    pub fn personalization(&self) -> Personalization {
        Personalization::new(
            self.contact_name.as_deref(),
            self.city.as_deref(),
            Some(self.salon_name.as_str()),
            self.phone.as_ref().map(PhoneNumber::as_str),
        )
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NewLead {
    pub hub_id: HubId,
    pub salon_name: SalonName,
    pub contact_name: Option<ContactName>,
    pub email: Option<LeadEmail>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<CityName>,
}

impl NewLead {
    #[must_use]
    pub fn new(
        hub_id: HubId,
        salon_name: SalonName,
        contact_name: Option<ContactName>,
        email: Option<LeadEmail>,
        phone: Option<PhoneNumber>,
        city: Option<CityName>,
    ) -> Self {
        Self {
            hub_id,
            salon_name,
            contact_name,
            email,
            phone,
            city,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UpdateLead {
    pub salon_name: SalonName,
    pub contact_name: Option<ContactName>,
    pub email: Option<LeadEmail>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<CityName>,
    pub status: LeadStatus,
    pub notes: Option<String>,
}

impl UpdateLead {
    #[must_use]
    pub fn new(
        salon_name: SalonName,
        contact_name: Option<ContactName>,
        email: Option<LeadEmail>,
        phone: Option<PhoneNumber>,
        city: Option<CityName>,
        status: LeadStatus,
        notes: Option<String>,
    ) -> Self {
        Self {
            salon_name,
            contact_name,
            email,
            phone,
            city,
            status,
            notes: notes
                .map(|s| ammonia::clean(s.trim()))
                .filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for status in LeadStatus::ALL {
            assert_eq!(status.as_str().parse::<LeadStatus>(), Ok(status));
        }
        assert!("archived".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn only_open_statuses_accept_outreach() {
        assert!(LeadStatus::New.accepts_outreach());
        assert!(LeadStatus::Contacted.accepts_outreach());
        assert!(!LeadStatus::Replied.accepts_outreach());
        assert!(!LeadStatus::Lost.accepts_outreach());
    }

    #[test]
    fn update_lead_drops_blank_notes() {
        let update = UpdateLead::new(
            SalonName::new("Bella").unwrap(),
            None,
            None,
            None,
            None,
            LeadStatus::Contacted,
            Some("   ".to_string()),
        );
        assert!(update.notes.is_none());
    }
}

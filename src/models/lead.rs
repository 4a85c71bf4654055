//! Diesel models for leads.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{
    Lead as DomainLead, NewLead as DomainNewLead, OutreachState, UpdateLead as DomainUpdateLead,
};
use crate::domain::types::{
    CityName, ContactName, HubId, LeadEmail, LeadId, PhoneNumber, SalonName, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub hub_id: i32,
    pub salon_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub cold_email_sent_at: Option<NaiveDateTime>,
    pub sms_sent: bool,
    pub sms_sent_at: Option<NaiveDateTime>,
    pub followup_1_sent: bool,
    pub followup_1_sent_at: Option<NaiveDateTime>,
    pub followup_2_sent: bool,
    pub followup_2_sent_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub hub_id: i32,
    pub salon_name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub city: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::leads)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Lead`] record.
pub struct UpdateLead<'a> {
    pub salon_name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub city: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

fn optional<T, F>(value: Option<String>, build: F) -> Result<Option<T>, TypeConstraintError>
where
    F: FnOnce(String) -> Result<T, TypeConstraintError>,
{
    value.map(build).transpose()
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::new(lead.id)?,
            hub_id: HubId::new(lead.hub_id)?,
            salon_name: SalonName::new(lead.salon_name)?,
            contact_name: optional(lead.contact_name, ContactName::new)?,
            email: optional(lead.email, LeadEmail::new)?,
            phone: optional(lead.phone, PhoneNumber::new)?,
            city: optional(lead.city, CityName::new)?,
            status: lead.status.parse()?,
            notes: lead.notes,
            outreach: OutreachState {
                cold_email_sent_at: lead.cold_email_sent_at,
                sms_sent: lead.sms_sent,
                sms_sent_at: lead.sms_sent_at,
                followup_1_sent: lead.followup_1_sent,
                followup_1_sent_at: lead.followup_1_sent_at,
                followup_2_sent: lead.followup_2_sent,
                followup_2_sent_at: lead.followup_2_sent_at,
            },
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            hub_id: lead.hub_id.get(),
            salon_name: lead.salon_name.as_str(),
            contact_name: lead.contact_name.as_deref(),
            email: lead.email.as_ref().map(LeadEmail::as_str),
            phone: lead.phone.as_ref().map(PhoneNumber::as_str),
            city: lead.city.as_deref(),
        }
    }
}

impl<'a> UpdateLead<'a> {
    pub fn from_domain(lead: &'a DomainUpdateLead, now: NaiveDateTime) -> Self {
        Self {
            salon_name: lead.salon_name.as_str(),
            contact_name: lead.contact_name.as_deref(),
            email: lead.email.as_ref().map(LeadEmail::as_str),
            phone: lead.phone.as_ref().map(PhoneNumber::as_str),
            city: lead.city.as_deref(),
            status: lead.status.as_str(),
            notes: lead.notes.as_deref(),
            updated_at: now,
        }
    }
}

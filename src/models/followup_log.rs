use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::followup::{
    FollowupLog as DomainFollowupLog, NewFollowupLog as DomainNewFollowupLog,
};
use crate::domain::types::{FollowupLogId, HubId, LeadId, TypeConstraintError};
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(table_name = crate::schema::auto_followup_logs)]
pub struct FollowupLog {
    pub id: i32,
    pub hub_id: i32,
    pub lead_id: i32,
    pub step: String,
    pub success: bool,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::auto_followup_logs)]
pub struct NewFollowupLog<'a> {
    pub hub_id: i32,
    pub lead_id: i32,
    pub step: &'a str,
    pub success: bool,
    pub error: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<FollowupLog> for DomainFollowupLog {
    type Error = TypeConstraintError;

    fn try_from(log: FollowupLog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: FollowupLogId::new(log.id)?,
            hub_id: HubId::new(log.hub_id)?,
            lead_id: LeadId::new(log.lead_id)?,
            step: log.step.parse()?,
            success: log.success,
            error: log.error,
            created_at: log.created_at,
        })
    }
}

impl<'a> NewFollowupLog<'a> {
    pub fn from_domain(log: &'a DomainNewFollowupLog, now: NaiveDateTime) -> Self {
        Self {
            hub_id: log.hub_id.get(),
            lead_id: log.lead_id.get(),
            step: log.step.as_str(),
            success: log.success,
            error: log.error.as_deref(),
            created_at: now,
        }
    }
}

//! Diesel models for the lead interaction timeline.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::interaction::{
    LeadInteraction as DomainLeadInteraction, NewLeadInteraction as DomainNewLeadInteraction,
};
use crate::domain::types::{AuthorName, InteractionId, LeadId, TypeConstraintError};
use crate::models::lead::Lead;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Lead, foreign_key = lead_id))]
#[diesel(table_name = crate::schema::lead_interactions)]
pub struct LeadInteraction {
    pub id: i32,
    pub lead_id: i32,
    pub author: String,
    pub kind: String,
    pub data: String, // JSON text
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::lead_interactions)]
pub struct NewLeadInteraction {
    pub lead_id: i32,
    pub author: String,
    pub kind: String,
    pub data: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<LeadInteraction> for DomainLeadInteraction {
    type Error = TypeConstraintError;

    fn try_from(interaction: LeadInteraction) -> Result<Self, Self::Error> {
        let data = serde_json::from_str(&interaction.data).unwrap_or_default();

        Ok(Self {
            id: InteractionId::new(interaction.id)?,
            lead_id: LeadId::new(interaction.lead_id)?,
            author: AuthorName::new(interaction.author)?,
            kind: interaction.kind.into(),
            data,
            created_at: interaction.created_at,
        })
    }
}

impl NewLeadInteraction {
    pub fn from_domain(interaction: &DomainNewLeadInteraction, now: NaiveDateTime) -> Self {
        Self {
            lead_id: interaction.lead_id.get(),
            author: interaction.author.to_string(),
            kind: interaction.kind.to_string(),
            data: interaction.data.to_string(),
            created_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interaction::InteractionKind;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn broken_json_becomes_null() {
        let db = LeadInteraction {
            id: 1,
            lead_id: 2,
            author: "Auto follow-up".into(),
            kind: "Sms".into(),
            data: "{not json".into(),
            created_at: Utc::now().naive_utc(),
        };
        let domain = DomainLeadInteraction::try_from(db).expect("valid interaction");
        assert_eq!(domain.kind, InteractionKind::Sms);
        assert!(domain.data.is_null());
    }

    #[test]
    fn new_interaction_serializes_payload() {
        let domain = DomainNewLeadInteraction::new(
            LeadId::new(5).unwrap(),
            AuthorName::new("Ola").unwrap(),
            InteractionKind::Comment,
            json!({"text": "Oddzwonić w piątek"}),
        );
        let db = NewLeadInteraction::from_domain(&domain, Utc::now().naive_utc());
        assert_eq!(db.lead_id, 5);
        assert_eq!(db.kind, "Comment");
        assert_eq!(db.data, r#"{"text":"Oddzwonić w piątek"}"#);
    }
}

//! Diesel models for email and SMS templates.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::template::{
    EmailTemplate as DomainEmailTemplate, NewEmailTemplate as DomainNewEmailTemplate,
    NewSmsTemplate as DomainNewSmsTemplate, SmsTemplate as DomainSmsTemplate,
};
use crate::domain::types::{
    HubId, SmsText, TemplateBody, TemplateId, TemplateSubject, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::email_templates)]
pub struct EmailTemplate {
    pub id: i32,
    pub hub_id: i32,
    pub kind: String,
    pub subject: String,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::email_templates)]
pub struct NewEmailTemplate<'a> {
    pub hub_id: i32,
    pub kind: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::sms_templates)]
pub struct SmsTemplate {
    pub id: i32,
    pub hub_id: i32,
    pub body: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::sms_templates)]
pub struct NewSmsTemplate<'a> {
    pub hub_id: i32,
    pub body: &'a str,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<EmailTemplate> for DomainEmailTemplate {
    type Error = TypeConstraintError;

    fn try_from(template: EmailTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TemplateId::new(template.id)?,
            hub_id: HubId::new(template.hub_id)?,
            kind: template.kind.parse()?,
            subject: TemplateSubject::new(template.subject)?,
            body: TemplateBody::new(template.body)?,
            updated_at: template.updated_at,
        })
    }
}

impl TryFrom<SmsTemplate> for DomainSmsTemplate {
    type Error = TypeConstraintError;

    fn try_from(template: SmsTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TemplateId::new(template.id)?,
            hub_id: HubId::new(template.hub_id)?,
            body: SmsText::new(template.body)?,
            updated_at: template.updated_at,
        })
    }
}

impl<'a> NewEmailTemplate<'a> {
    pub fn from_domain(template: &'a DomainNewEmailTemplate, now: NaiveDateTime) -> Self {
        Self {
            hub_id: template.hub_id.get(),
            kind: template.kind.as_str(),
            subject: template.subject.as_str(),
            body: template.body.as_str(),
            updated_at: now,
        }
    }
}

impl<'a> NewSmsTemplate<'a> {
    pub fn from_domain(template: &'a DomainNewSmsTemplate, now: NaiveDateTime) -> Self {
        Self {
            hub_id: template.hub_id.get(),
            body: template.body.as_str(),
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::EmailTemplateKind;
    use chrono::Utc;

    #[test]
    fn email_template_into_domain() {
        let db = EmailTemplate {
            id: 3,
            hub_id: 1,
            kind: "followup_1".into(),
            subject: "Pamiętasz nas?".into(),
            body: "<p>Dzień dobry {{imie}}</p>".into(),
            updated_at: Utc::now().naive_utc(),
        };
        let domain = DomainEmailTemplate::try_from(db).expect("valid template");
        assert_eq!(domain.kind, EmailTemplateKind::FollowUp1);
        assert_eq!(domain.body.as_str(), "<p>Dzień dobry {{imie}}</p>");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let db = EmailTemplate {
            id: 3,
            hub_id: 1,
            kind: "followup_9".into(),
            subject: "x".into(),
            body: "y".into(),
            updated_at: Utc::now().naive_utc(),
        };
        assert!(DomainEmailTemplate::try_from(db).is_err());
    }

    #[test]
    fn sms_body_is_kept_verbatim() {
        let db = SmsTemplate {
            id: 1,
            hub_id: 1,
            body: "Hej {{imie}}, <3 z {{salon}}".into(),
            updated_at: Utc::now().naive_utc(),
        };
        let domain = DomainSmsTemplate::try_from(db).expect("valid template");
        assert_eq!(domain.body.as_str(), "Hej {{imie}}, <3 z {{salon}}");
    }
}

use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::{
    domain::{
        template::{
            EmailTemplate, EmailTemplateKind, NewEmailTemplate, NewSmsTemplate, SmsTemplate,
        },
        types::HubId,
    },
    models::template::{
        EmailTemplate as DbEmailTemplate, NewEmailTemplate as DbNewEmailTemplate,
        NewSmsTemplate as DbNewSmsTemplate, SmsTemplate as DbSmsTemplate,
    },
    repository::{
        DieselRepository, TemplateReader, TemplateWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl TemplateReader for DieselRepository {
    fn list_email_templates(&self, hub_id: HubId) -> RepositoryResult<Vec<EmailTemplate>> {
        use crate::schema::email_templates;

        let mut conn = self.conn()?;

        email_templates::table
            .filter(email_templates::hub_id.eq(hub_id.get()))
            .order(email_templates::kind.asc())
            .load::<DbEmailTemplate>(&mut conn)?
            .into_iter()
            .map(|template| EmailTemplate::try_from(template).map_err(RepositoryError::from))
            .collect()
    }

    fn get_email_template(
        &self,
        hub_id: HubId,
        kind: EmailTemplateKind,
    ) -> RepositoryResult<Option<EmailTemplate>> {
        use crate::schema::email_templates;

        let mut conn = self.conn()?;
        let template = email_templates::table
            .filter(email_templates::hub_id.eq(hub_id.get()))
            .filter(email_templates::kind.eq(kind.as_str()))
            .first::<DbEmailTemplate>(&mut conn)
            .optional()?;

        match template {
            Some(template) => Ok(Some(
                EmailTemplate::try_from(template).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_sms_template(&self, hub_id: HubId) -> RepositoryResult<Option<SmsTemplate>> {
        use crate::schema::sms_templates;

        let mut conn = self.conn()?;
        let template = sms_templates::table
            .filter(sms_templates::hub_id.eq(hub_id.get()))
            .first::<DbSmsTemplate>(&mut conn)
            .optional()?;

        match template {
            Some(template) => Ok(Some(
                SmsTemplate::try_from(template).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }
}

impl TemplateWriter for DieselRepository {
    fn upsert_email_template(
        &self,
        template: &NewEmailTemplate,
    ) -> RepositoryResult<EmailTemplate> {
        use crate::schema::email_templates;

        let mut conn = self.conn()?;
        let db_template = DbNewEmailTemplate::from_domain(template, Utc::now().naive_utc());

        let saved = diesel::insert_into(email_templates::table)
            .values(&db_template)
            .on_conflict((email_templates::hub_id, email_templates::kind))
            .do_update()
            .set((
                email_templates::subject.eq(excluded(email_templates::subject)),
                email_templates::body.eq(excluded(email_templates::body)),
                email_templates::updated_at.eq(excluded(email_templates::updated_at)),
            ))
            .get_result::<DbEmailTemplate>(&mut conn)?;

        EmailTemplate::try_from(saved).map_err(RepositoryError::from)
    }

    fn upsert_sms_template(&self, template: &NewSmsTemplate) -> RepositoryResult<SmsTemplate> {
        use crate::schema::sms_templates;

        let mut conn = self.conn()?;
        let db_template = DbNewSmsTemplate::from_domain(template, Utc::now().naive_utc());

        let saved = diesel::insert_into(sms_templates::table)
            .values(&db_template)
            .on_conflict(sms_templates::hub_id)
            .do_update()
            .set((
                sms_templates::body.eq(excluded(sms_templates::body)),
                sms_templates::updated_at.eq(excluded(sms_templates::updated_at)),
            ))
            .get_result::<DbSmsTemplate>(&mut conn)?;

        SmsTemplate::try_from(saved).map_err(RepositoryError::from)
    }
}

//! Repository implementation for leads.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::{
        followup::OutreachStep,
        lead::{Lead, LeadStatus, NewLead, UpdateLead},
        types::{HubId, LeadId},
    },
    models::lead::{Lead as DbLead, NewLead as DbNewLead, UpdateLead as DbUpdateLead},
    outreach::DueCutoffs,
    repository::{
        DieselRepository, LeadListQuery, LeadReader, LeadWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn into_domain(db_lead: DbLead) -> RepositoryResult<Lead> {
    Lead::try_from(db_lead).map_err(RepositoryError::from)
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<Option<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_lead = leads::table
            .filter(leads::id.eq(id.get()))
            .filter(leads::hub_id.eq(hub_id.get()))
            .first::<DbLead>(&mut conn)
            .optional()?;

        db_lead.map(into_domain).transpose()
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let pattern = query.search.as_ref().map(|term| format!("%{term}%"));

        let query_builder = || {
            let mut items = leads::table
                .filter(leads::hub_id.eq(query.hub_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(pattern) = &pattern {
                items = items.filter(
                    leads::salon_name
                        .like(pattern)
                        .or(leads::contact_name.like(pattern))
                        .or(leads::email.like(pattern))
                        .or(leads::phone.like(pattern))
                        .or(leads::city.like(pattern)),
                );
            }

            if let Some(status) = query.status {
                items = items.filter(leads::status.eq(status.as_str()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let leads = items
            .order((leads::created_at.desc(), leads::id.desc()))
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, leads))
    }

    fn list_outreach_candidates(
        &self,
        due: DueCutoffs,
        limit: usize,
    ) -> RepositoryResult<Vec<Lead>> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let open_statuses = LeadStatus::ALL
            .into_iter()
            .filter(|status| status.accepts_outreach())
            .map(LeadStatus::as_str)
            .collect::<Vec<_>>();

        let sms_due = leads::sms_sent
            .eq(false)
            .and(leads::phone.is_not_null())
            .and(leads::cold_email_sent_at.assume_not_null().le(due.sms));

        // Follow-up 1 is anchored to the SMS when one went out, else to the cold email.
        let first_followup_due = leads::followup_1_sent.eq(false).and(
            leads::sms_sent
                .eq(true)
                .and(leads::sms_sent_at.is_not_null())
                .and(leads::sms_sent_at.assume_not_null().le(due.first_followup))
                .or(leads::sms_sent
                    .eq(false)
                    .or(leads::sms_sent_at.is_null())
                    .and(leads::cold_email_sent_at.assume_not_null().le(due.first_followup))),
        );

        let second_followup_due = leads::followup_1_sent.eq(true).and(
            leads::followup_1_sent_at
                .is_not_null()
                .and(leads::followup_1_sent_at.assume_not_null().le(due.second_followup))
                .or(leads::followup_1_sent_at
                    .is_null()
                    .and(leads::cold_email_sent_at.assume_not_null().le(due.second_followup))),
        );

        let sms_settled = leads::sms_sent.eq(true).or(leads::phone.is_null());

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        leads::table
            .filter(leads::status.eq_any(open_statuses))
            .filter(leads::cold_email_sent_at.is_not_null())
            .filter(leads::email.is_not_null())
            .filter(leads::followup_2_sent.eq(false))
            .filter(sms_due.or(sms_settled.and(first_followup_due.or(second_followup_due))))
            .order((leads::cold_email_sent_at.asc(), leads::id.asc()))
            .limit(limit)
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(into_domain)
            .collect()
    }
}

impl LeadWriter for DieselRepository {
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let insertables = new_leads.iter().map(DbNewLead::from).collect::<Vec<_>>();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut inserted = 0;
            for lead in &insertables {
                inserted += diesel::insert_or_ignore_into(leads::table)
                    .values(lead)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
        .map_err(RepositoryError::from)
    }

    fn update_lead(
        &self,
        id: LeadId,
        hub_id: HubId,
        updates: &UpdateLead,
    ) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateLead::from_domain(updates, Utc::now().naive_utc());

        let updated = diesel::update(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::hub_id.eq(hub_id.get())),
        )
        .set(&db_updates)
        .get_result::<DbLead>(&mut conn)?;

        into_domain(updated)
    }

    fn update_lead_status(
        &self,
        id: LeadId,
        hub_id: HubId,
        status: LeadStatus,
    ) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let updated = diesel::update(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::hub_id.eq(hub_id.get())),
        )
        .set((
            leads::status.eq(status.as_str()),
            leads::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbLead>(&mut conn)?;

        into_domain(updated)
    }

    fn delete_lead(&self, id: LeadId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    fn mark_step_sent(
        &self,
        id: LeadId,
        step: OutreachStep,
        at: NaiveDateTime,
    ) -> RepositoryResult<Lead> {
        use crate::schema::leads;

        let mut conn = self.conn()?;

        let updated = conn.transaction::<DbLead, diesel::result::Error, _>(|conn| {
            match step {
                OutreachStep::ColdEmail => {
                    diesel::update(
                        leads::table
                            .find(id.get())
                            .filter(leads::status.eq(LeadStatus::New.as_str())),
                    )
                    .set(leads::status.eq(LeadStatus::Contacted.as_str()))
                    .execute(conn)?;
                    diesel::update(leads::table.find(id.get()))
                        .set((leads::cold_email_sent_at.eq(at), leads::updated_at.eq(at)))
                        .get_result::<DbLead>(conn)
                }
                OutreachStep::Sms => diesel::update(leads::table.find(id.get()))
                    .set((
                        leads::sms_sent.eq(true),
                        leads::sms_sent_at.eq(at),
                        leads::updated_at.eq(at),
                    ))
                    .get_result::<DbLead>(conn),
                OutreachStep::FollowUp1 => diesel::update(leads::table.find(id.get()))
                    .set((
                        leads::followup_1_sent.eq(true),
                        leads::followup_1_sent_at.eq(at),
                        leads::updated_at.eq(at),
                    ))
                    .get_result::<DbLead>(conn),
                OutreachStep::FollowUp2 => diesel::update(leads::table.find(id.get()))
                    .set((
                        leads::followup_2_sent.eq(true),
                        leads::followup_2_sent_at.eq(at),
                        leads::updated_at.eq(at),
                    ))
                    .get_result::<DbLead>(conn),
            }
        })?;

        into_domain(updated)
    }
}

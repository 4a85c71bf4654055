use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        followup::{FollowupLog, NewFollowupLog},
        types::LeadId,
    },
    models::followup_log::{FollowupLog as DbFollowupLog, NewFollowupLog as DbNewFollowupLog},
    repository::{
        DieselRepository, FollowupLogReader, FollowupLogWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl FollowupLogReader for DieselRepository {
    fn list_followup_logs(&self, lead_id: LeadId) -> RepositoryResult<Vec<FollowupLog>> {
        use crate::schema::auto_followup_logs;

        let mut conn = self.conn()?;

        auto_followup_logs::table
            .filter(auto_followup_logs::lead_id.eq(lead_id.get()))
            .order((
                auto_followup_logs::created_at.desc(),
                auto_followup_logs::id.desc(),
            ))
            .load::<DbFollowupLog>(&mut conn)?
            .into_iter()
            .map(|log| FollowupLog::try_from(log).map_err(RepositoryError::from))
            .collect()
    }
}

impl FollowupLogWriter for DieselRepository {
    fn create_followup_log(&self, log: &NewFollowupLog) -> RepositoryResult<FollowupLog> {
        use crate::schema::auto_followup_logs;

        let mut conn = self.conn()?;
        let new_log = DbNewFollowupLog::from_domain(log, Utc::now().naive_utc());

        let created = diesel::insert_into(auto_followup_logs::table)
            .values(&new_log)
            .get_result::<DbFollowupLog>(&mut conn)?;

        FollowupLog::try_from(created).map_err(RepositoryError::from)
    }
}

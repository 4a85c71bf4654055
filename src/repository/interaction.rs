use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::interaction::{LeadInteraction, NewLeadInteraction},
    models::interaction::{
        LeadInteraction as DbLeadInteraction, NewLeadInteraction as DbNewLeadInteraction,
    },
    repository::{
        DieselRepository, InteractionListQuery, InteractionReader, InteractionWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl InteractionReader for DieselRepository {
    fn list_interactions(
        &self,
        query: InteractionListQuery,
    ) -> RepositoryResult<(usize, Vec<LeadInteraction>)> {
        use crate::schema::lead_interactions;

        let mut conn = self.conn()?;

        let kind = query.kind.as_ref().map(ToString::to_string);

        let query_builder = || {
            let mut items = lead_interactions::table
                .filter(lead_interactions::lead_id.eq(query.lead_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(kind) = &kind {
                items = items.filter(lead_interactions::kind.eq(kind));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let interactions = items
            .order((
                lead_interactions::created_at.desc(),
                lead_interactions::id.desc(),
            ))
            .load::<DbLeadInteraction>(&mut conn)?
            .into_iter()
            .map(|item| LeadInteraction::try_from(item).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, interactions))
    }
}

impl InteractionWriter for DieselRepository {
    fn create_interaction(
        &self,
        interaction: &NewLeadInteraction,
    ) -> RepositoryResult<LeadInteraction> {
        use crate::schema::lead_interactions;

        let mut conn = self.conn()?;

        let new_interaction = DbNewLeadInteraction::from_domain(interaction, Utc::now().naive_utc());

        let created = diesel::insert_into(lead_interactions::table)
            .values(&new_interaction)
            .get_result::<DbLeadInteraction>(&mut conn)?;

        LeadInteraction::try_from(created).map_err(RepositoryError::from)
    }
}

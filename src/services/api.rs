use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::DEFAULT_ITEMS_PER_PAGE;
use pushkind_common::routes::ensure_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::HubId;
use crate::dto::api::{LeadsQuery, LeadsResponse, PersonalizeQuery, PersonalizeResponse};
use crate::personalization::{
    decline_city_to_locative, decline_name_to_vocative, format_phone_number,
};
use crate::repository::{LeadListQuery, LeadReader};
use crate::services::ServiceResult;

/// Returns the filtered list of leads of the user's hub.
pub fn list_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: LeadsQuery,
) -> ServiceResult<LeadsResponse>
where
    R: LeadReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let mut query = LeadListQuery::new(HubId::new(user.hub_id)?);

    if let Some(page) = params.page {
        query = query.paginate(page, DEFAULT_ITEMS_PER_PAGE);
    }

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }

    let (total, leads) = repo.list_leads(query).map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;

    Ok(LeadsResponse { total, leads })
}

/// Runs the raw values through the declension and phone helpers so the
/// template editor can show what a placeholder will become.
pub fn personalize(
    user: &AuthenticatedUser,
    params: PersonalizeQuery,
) -> ServiceResult<PersonalizeResponse> {
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    Ok(PersonalizeResponse {
        city_locative: params.city.as_deref().map(decline_city_to_locative),
        name_vocative: params.name.as_deref().map(decline_name_to_vocative),
        phone_display: params.phone.as_deref().map(format_phone_number),
    })
}

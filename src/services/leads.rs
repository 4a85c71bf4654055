//! Lead list, lead page and lead mutations.

use chrono::NaiveDateTime;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use pushkind_common::routes::ensure_role;
use serde_json::json;
use validator::Validate;

use crate::domain::interaction::NewLeadInteraction;
use crate::domain::lead::{LeadStatus, UpdateLead};
use crate::domain::types::{AuthorName, HubId, LeadId};
use crate::dto::lead::{LeadOperationOutcome, LeadPageData, LeadPageQuery};
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::forms::lead::{AddCommentForm, AddLeadForm, SaveLeadForm, UploadLeadsForm};
use crate::outreach::{OutreachSchedule, next_due_step};
use crate::repository::{
    FollowupLogReader, InteractionListQuery, InteractionReader, InteractionWriter,
    LeadListQuery, LeadReader, LeadWriter,
};
use crate::services::{ServiceError, ServiceResult};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

const VALIDATION_FAILED: &str = "Błąd walidacji formularza.";

/// Wraps one page of rows, clamping the requested page into the existing range.
fn paginate<T>(items: Vec<T>, page: usize, total: usize) -> Paginated<T> {
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);
    Paginated::new(items, page.clamp(1, total_pages.max(1)), total_pages)
}

/// Loads the leads list for the main index page.
pub fn load_index_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: IndexQuery,
) -> ServiceResult<IndexPageData>
where
    R: LeadReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let page = query.page.unwrap_or(1);
    let mut list_query = LeadListQuery::new(hub_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    // Unknown values from a hand-edited URL just disable the filter.
    let status_filter = query
        .status
        .as_deref()
        .and_then(|s| s.parse::<LeadStatus>().ok());
    if let Some(status) = status_filter {
        list_query = list_query.status(status);
    }

    let (total, leads) = repo.list_leads(list_query).map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;

    Ok(IndexPageData {
        leads: paginate(leads, page, total),
        total,
        search_query,
        status_filter,
    })
}

/// Validates the add-lead form and persists a new lead.
pub fn add_lead<R>(repo: &R, user: &AuthenticatedUser, form: AddLeadForm) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(VALIDATION_FAILED.to_string()));
    }

    let hub_id = HubId::new(user.hub_id)?;
    let new_lead = form.to_new_lead(hub_id).map_err(|err| {
        log::error!("Failed to build lead: {err}");
        ServiceError::Form(format!("Nieprawidłowe dane leada: {err}"))
    })?;

    let inserted = repo.create_leads(&[new_lead]).map_err(|err| {
        log::error!("Failed to add a lead: {err}");
        err
    })?;

    if inserted == 0 {
        return Err(ServiceError::Form(
            "Lead z tym adresem email już istnieje.".to_string(),
        ));
    }

    Ok(())
}

/// Parses the uploaded CSV file and creates leads in bulk. Returns how many
/// rows were inserted; duplicates of existing emails are skipped.
pub fn upload_leads<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &UploadLeadsForm,
) -> ServiceResult<usize>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let leads = form.parse(hub_id).map_err(|err| {
        log::error!("Failed to parse leads: {err}");
        ServiceError::Form(format!("Błąd podczas wczytywania pliku CSV: {err}"))
    })?;

    let inserted = repo.create_leads(&leads).map_err(|err| {
        log::error!("Failed to add leads: {err}");
        err
    })?;

    log::info!(
        "Imported {inserted} of {} leads into hub {hub_id}",
        leads.len()
    );

    Ok(inserted)
}

/// Loads the lead, its timeline page, the audit trail and the next due step.
pub fn load_lead_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    lead_id: i32,
    query: LeadPageQuery,
    schedule: &OutreachSchedule,
    now: NaiveDateTime,
) -> ServiceResult<LeadPageData>
where
    R: LeadReader + InteractionReader + FollowupLogReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(lead_id)?;

    let lead = repo
        .get_lead_by_id(lead_id, hub_id)
        .map_err(|err| {
            log::error!("Failed to get lead: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let page = query.page.unwrap_or(1);
    let (total, interactions) = repo
        .list_interactions(
            InteractionListQuery::new(lead_id).paginate(page, DEFAULT_ITEMS_PER_PAGE),
        )
        .map_err(|err| {
            log::error!("Failed to list interactions: {err}");
            err
        })?;

    let followup_logs = repo.list_followup_logs(lead_id).map_err(|err| {
        log::error!("Failed to list follow-up logs: {err}");
        err
    })?;

    let next_step = next_due_step(&lead, schedule, now);

    Ok(LeadPageData {
        lead,
        interactions: paginate(interactions, page, total),
        followup_logs,
        next_step,
    })
}

/// Applies the edit form to a lead of the user's hub.
pub fn save_lead<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: SaveLeadForm,
) -> ServiceResult<LeadOperationOutcome>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(VALIDATION_FAILED.to_string()));
    }

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(form.id)?;
    let updates = UpdateLead::try_from(&form).map_err(|err| {
        log::error!("Failed to build lead update: {err}");
        ServiceError::Form(format!("Nieprawidłowe dane leada: {err}"))
    })?;

    repo.update_lead(lead_id, hub_id, &updates).map_err(|err| {
        log::error!("Failed to update lead: {err}");
        err
    })?;

    Ok(LeadOperationOutcome { lead_id })
}

/// Records a manual timeline entry authored by the current user.
pub fn add_comment<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCommentForm,
) -> ServiceResult<LeadOperationOutcome>
where
    R: LeadReader + InteractionWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(VALIDATION_FAILED.to_string()));
    }

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(form.id)?;

    // The interactions table is not hub-scoped; check ownership first.
    if repo.get_lead_by_id(lead_id, hub_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let author = if user.name.trim().is_empty() {
        AuthorName::new(user.email.as_str())?
    } else {
        AuthorName::new(user.name.as_str())?
    };
    let text = form
        .text()
        .map_err(|_| ServiceError::Form(VALIDATION_FAILED.to_string()))?;

    let interaction =
        NewLeadInteraction::new(lead_id, author, form.kind(), json!({ "text": text.as_str() }));

    repo.create_interaction(&interaction).map_err(|err| {
        log::error!("Failed to add interaction: {err}");
        err
    })?;

    Ok(LeadOperationOutcome { lead_id })
}

/// Removes a lead together with its timeline and audit rows.
pub fn delete_lead<R>(repo: &R, user: &AuthenticatedUser, lead_id: i32) -> ServiceResult<()>
where
    R: LeadWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let hub_id = HubId::new(user.hub_id)?;
    let lead_id = LeadId::new(lead_id)?;

    repo.delete_lead(lead_id, hub_id).map_err(|err| {
        log::error!("Failed to delete lead {lead_id}: {err}");
        err
    })?;

    Ok(())
}

use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::domain::lead::LeadStatus;
use crate::dto::main::IndexQuery;
use crate::forms::lead::{AddLeadForm, UploadLeadsForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, leads as leads_service};

/// Status options for the filter and edit selects.
pub(crate) fn status_options() -> Vec<&'static str> {
    LeadStatus::ALL.iter().map(|status| status.as_str()).collect()
}

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match leads_service::load_index_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("leads", &data.leads);
            context.insert("total_leads", &data.total);
            context.insert("statuses", &status_options());
            if let Some(query) = data.search_query {
                context.insert("search_query", &query);
            }
            if let Some(status) = data.status_filter {
                context.insert("status_filter", status.as_str());
            }

            render_template(&tera, "main/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to load leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/lead/add")]
pub async fn add_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddLeadForm>,
) -> impl Responder {
    match leads_service::add_lead(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Lead dodany.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add a lead: {err}");
            FlashMessage::error("Błąd podczas dodawania leada.").send();
        }
    }
    redirect("/")
}

#[post("/leads/upload")]
pub async fn leads_upload(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadLeadsForm>,
) -> impl Responder {
    match leads_service::upload_leads(repo.get_ref(), &user, &form) {
        Ok(inserted) => {
            FlashMessage::success(format!("Zaimportowano leady: {inserted}.")).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to upload leads: {err}");
            FlashMessage::error("Błąd podczas importu leadów.").send();
        }
    }
    redirect("/")
}

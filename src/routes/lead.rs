use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Utc;
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::{base_context, redirect, render_template};
use tera::Tera;

use crate::dto::lead::LeadPageQuery;
use crate::forms::lead::{AddCommentForm, SaveLeadForm};
use crate::models::config::ServerConfig;
use crate::outreach::mailer::HttpMailer;
use crate::repository::DieselRepository;
use crate::routes::main::status_options;
use crate::services::{ServiceError, ServiceResult};
use crate::services::{leads as leads_service, outreach as outreach_service};

#[get("/lead/{lead_id}")]
pub async fn show_lead(
    lead_id: web::Path<i32>,
    params: web::Query<LeadPageQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let result = leads_service::load_lead_page(
        repo.get_ref(),
        &user,
        lead_id.into_inner(),
        params.into_inner(),
        &server_config.outreach.schedule,
        Utc::now().naive_utc(),
    );

    match result {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "index",
                &server_config.auth_service_url,
            );
            context.insert("lead", &data.lead);
            context.insert("interactions", &data.interactions);
            context.insert("followup_logs", &data.followup_logs);
            context.insert("next_step", &data.next_step.map(|step| step.as_str()));
            context.insert("statuses", &status_options());

            render_template(&tera, "lead/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(ServiceError::NotFound) | Err(ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load lead: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/lead/save")]
pub async fn save_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveLeadForm>,
) -> impl Responder {
    let lead_id = form.id;
    match leads_service::save_lead(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Lead zaktualizowany.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            return redirect("/");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update lead: {err}");
            FlashMessage::error("Błąd podczas aktualizacji leada.").send();
        }
    }
    redirect(&format!("/lead/{lead_id}"))
}

#[post("/lead/comment")]
pub async fn comment_lead(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCommentForm>,
) -> impl Responder {
    let lead_id = form.id;
    match leads_service::add_comment(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Wpis dodany.").send();
        }
        Err(ServiceError::Unauthorized) => return redirect("/na"),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            return redirect("/");
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add interaction: {err}");
            FlashMessage::error("Błąd podczas dodawania wpisu.").send();
        }
    }
    redirect(&format!("/lead/{lead_id}"))
}

#[post("/lead/{lead_id}/cold-email")]
pub async fn send_cold_email(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    let repo = repo.get_ref().clone();
    let mail_config = server_config.mail.clone();

    // The mail client and the database are both blocking.
    let result = web::block(move || -> ServiceResult<()> {
        let mailer = HttpMailer::new(&mail_config)?;
        outreach_service::send_cold_email(
            &repo,
            &mailer,
            &user,
            lead_id,
            Utc::now().naive_utc(),
        )?;
        Ok(())
    })
    .await;

    match result {
        Ok(Ok(())) => {
            FlashMessage::success("Cold email wysłany.").send();
        }
        Ok(Err(ServiceError::Unauthorized)) => return redirect("/na"),
        Ok(Err(ServiceError::NotFound)) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            return redirect("/");
        }
        Ok(Err(ServiceError::Form(message))) => {
            FlashMessage::error(message).send();
        }
        Ok(Err(ServiceError::Delivery(err))) => {
            FlashMessage::error(format!("Nie udało się wysłać wiadomości: {err}")).send();
        }
        Ok(Err(err)) => {
            log::error!("Failed to send cold email: {err}");
            FlashMessage::error("Błąd podczas wysyłki.").send();
        }
        Err(err) => {
            log::error!("Cold email task failed: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    }
    redirect(&format!("/lead/{lead_id}"))
}

#[post("/lead/{lead_id}/delete")]
pub async fn delete_lead(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let lead_id = lead_id.into_inner();
    match leads_service::delete_lead(repo.get_ref(), &user, lead_id) {
        Ok(()) => {
            FlashMessage::success("Lead usunięty.").send();
            redirect("/")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
            redirect(&format!("/lead/{lead_id}"))
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to delete lead: {err}");
            FlashMessage::error("Błąd podczas usuwania leada.").send();
            redirect(&format!("/lead/{lead_id}"))
        }
    }
}

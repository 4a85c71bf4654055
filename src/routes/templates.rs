//! Routes for the outreach template editor.

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::routes::{base_context, check_role, redirect, render_template};
use tera::Tera;

use crate::SERVICE_ADMIN_ROLE;
use crate::forms::template::{EmailTemplateForm, SMS_MAX_CHARS, SmsTemplateForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, templates as templates_service};

#[get("/templates")]
/// Show the hub's email and SMS templates.
pub async fn show_templates(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match templates_service::load_templates_page(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "templates",
                &server_config.auth_service_url,
            );
            context.insert("email_templates", &data.email_templates);
            context.insert("sms_template", &data.sms_template);
            context.insert("sms_max_chars", &SMS_MAX_CHARS);
            context.insert("can_edit", &check_role(SERVICE_ADMIN_ROLE, &user.roles));

            render_template(&tera, "templates/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => redirect("/na"),
        Err(err) => {
            log::error!("Failed to load templates: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/templates/email")]
pub async fn save_email_template(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EmailTemplateForm>,
) -> impl Responder {
    match templates_service::save_email_template(repo.get_ref(), &user, form) {
        Ok(kind) => {
            FlashMessage::success(format!("Szablon {kind} zapisany.")).send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save email template: {err}");
            FlashMessage::error("Nie udało się zapisać szablonu.").send();
        }
    }
    redirect("/templates")
}

#[post("/templates/sms")]
pub async fn save_sms_template(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SmsTemplateForm>,
) -> impl Responder {
    match templates_service::save_sms_template(repo.get_ref(), &user, form) {
        Ok(()) => {
            FlashMessage::success("Szablon SMS zapisany.").send();
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save SMS template: {err}");
            FlashMessage::error("Nie udało się zapisać szablonu.").send();
        }
    }
    redirect("/templates")
}

#[get("/templates/preview/{lead_id}")]
/// Render every step of the sequence as the given lead would receive it.
pub async fn preview_templates(
    lead_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match templates_service::preview_templates(repo.get_ref(), &user, lead_id.into_inner()) {
        Ok(data) => {
            let mut context = base_context(
                &flash_messages,
                &user,
                "templates",
                &server_config.auth_service_url,
            );
            context.insert("lead", &data.lead);
            context.insert("steps", &data.steps);

            render_template(&tera, "templates/preview.html", &context)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Brak uprawnień.").send();
            redirect("/templates")
        }
        Err(ServiceError::NotFound) | Err(ServiceError::TypeConstraint(_)) => {
            FlashMessage::error("Lead nie został znaleziony.").send();
            redirect("/templates")
        }
        Err(err) => {
            log::error!("Failed to preview templates: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

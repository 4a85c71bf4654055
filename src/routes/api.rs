use actix_web::{HttpResponse, Responder, get, web};
use pushkind_common::domain::auth::AuthenticatedUser;

use crate::dto::api::{LeadsQuery, PersonalizeQuery};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, api as api_service};

#[get("/v1/leads")]
pub async fn api_v1_leads(
    params: web::Query<LeadsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match api_service::list_leads(repo.get_ref(), &user, params.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to list leads: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/v1/personalize")]
pub async fn api_v1_personalize(
    params: web::Query<PersonalizeQuery>,
    user: AuthenticatedUser,
) -> impl Responder {
    match api_service::personalize(&user, params.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized().finish(),
        Err(err) => {
            log::error!("Failed to personalize: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use pushkind_common::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use pushkind_common::models::config::CommonServerConfig;
#[cfg(feature = "server")]
use pushkind_common::routes::{logout, not_assigned};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::routes::api::{api_v1_leads, api_v1_personalize};
#[cfg(feature = "server")]
use crate::routes::lead::{comment_lead, delete_lead, save_lead, send_cold_email, show_lead};
#[cfg(feature = "server")]
use crate::routes::main::{add_lead, leads_upload, show_index};
#[cfg(feature = "server")]
use crate::routes::templates::{
    preview_templates, save_email_template, save_sms_template, show_templates,
};

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod outreach;
pub mod personalization;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;

pub const SERVICE_ACCESS_ROLE: &str = "crm";
pub const SERVICE_ADMIN_ROLE: &str = "crm_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let common_config = CommonServerConfig {
        auth_service_url: server_config.auth_service_url.clone(),
        secret: server_config.secret.clone(),
    };

    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting beauty-crm on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(not_assigned)
            .service(
                web::scope("/api")
                    .service(api_v1_leads)
                    .service(api_v1_personalize),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_index)
                    .service(add_lead)
                    .service(leads_upload)
                    .service(show_lead)
                    .service(save_lead)
                    .service(comment_lead)
                    .service(send_cold_email)
                    .service(delete_lead)
                    .service(show_templates)
                    .service(save_email_template)
                    .service(save_sms_template)
                    .service(preview_templates)
                    .service(logout),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}

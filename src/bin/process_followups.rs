//! Scheduled job sending the SMS nudge and follow-up emails that are due.
//!
//! Meant to run from cron (e.g. hourly). Each run handles at most
//! `outreach.batch_limit` leads and exits; failures on single leads are
//! logged and audited without stopping the run.

use std::env;

use chrono::Utc;
use dotenvy::dotenv;

use beauty_crm::db::establish_connection_pool;
use beauty_crm::models::config::ServerConfig;
use beauty_crm::outreach::FollowupProcessor;
use beauty_crm::outreach::mailer::HttpMailer;
use beauty_crm::outreach::sms::ZmqSmsGateway;
use beauty_crm::repository::DieselRepository;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let server_config = match ServerConfig::load(&app_env) {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let mailer = match HttpMailer::new(&server_config.mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            log::error!("Failed to create mail client: {e}");
            std::process::exit(1);
        }
    };

    let sms = match ZmqSmsGateway::connect(&server_config.zmq_sms_pub) {
        Ok(sms) => sms,
        Err(e) => {
            log::error!("Failed to connect to SMS relay: {e}");
            std::process::exit(1);
        }
    };

    let outreach = &server_config.outreach;
    let processor =
        FollowupProcessor::new(&repo, &mailer, &sms, outreach.schedule, outreach.batch_limit);

    log::info!(
        "Processing follow-ups (batch limit {}, schedule {:?})",
        outreach.batch_limit,
        outreach.schedule
    );

    match processor.run(Utc::now().naive_utc()) {
        Ok(report) => {
            log::info!(
                "Follow-ups done: {} processed, {} sent, {} skipped, {} failed",
                report.processed,
                report.sent,
                report.skipped,
                report.failed
            );
        }
        Err(e) => {
            log::error!("Failed to load follow-up candidates: {e}");
            std::process::exit(1);
        }
    }
}

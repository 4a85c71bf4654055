//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::outreach::schedule::OutreachSchedule;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers and the follow-up worker.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// ZeroMQ endpoint the SMS relay subscribes to.
    pub zmq_sms_pub: String,
    pub mail: MailConfig,
    #[serde(default)]
    pub outreach: OutreachConfig,
}

#[derive(Clone, Debug, Deserialize)]
/// Transactional mail API used for every outreach email.
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    /// Sender address, e.g. `Studio <hello@example.com>`.
    pub from: String,
    #[serde(default = "default_mail_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
/// Timing of the automated sequence and the size of one processor run.
pub struct OutreachConfig {
    #[serde(default)]
    pub schedule: OutreachSchedule,
    #[serde(default = "default_batch_limit")]
    pub batch_limit: usize,
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            schedule: OutreachSchedule::default(),
            batch_limit: default_batch_limit(),
        }
    }
}

fn default_batch_limit() -> usize {
    200
}

fn default_mail_timeout_secs() -> u64 {
    30
}

#[cfg(feature = "server")]
impl ServerConfig {
    /// Layers `config/default.yaml`, the optional `config/{app_env}.yaml` and
    /// `APP_`-prefixed environment variables, in that order. Nested keys use
    /// `__`, e.g. `APP_MAIL__API_KEY`.
    pub fn load(app_env: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

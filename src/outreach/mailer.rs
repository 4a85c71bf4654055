//! Transactional mail API client.
//!
//! The client is blocking. Web handlers must call it from `web::block`.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;

use crate::models::config::MailConfig;
use crate::outreach::{DeliveryError, Mailer, OutgoingEmail};

#[derive(Serialize)]
struct SendEmailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeliveryError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from: config.from.clone(),
        })
    }

    fn payload<'a>(&'a self, email: &'a OutgoingEmail) -> SendEmailPayload<'a> {
        SendEmailPayload {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
        }
    }
}

impl Mailer for HttpMailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(email))
            .send()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        log::debug!("Mail API accepted message to {}", email.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_mail_api_shape() {
        let mailer = HttpMailer::new(&MailConfig {
            api_url: "http://127.0.0.1:9/emails".into(),
            api_key: "key".into(),
            from: "Studio <hello@example.com>".into(),
            timeout_secs: 1,
        })
        .expect("client builds");
        let email = OutgoingEmail {
            to: "salon@example.com".into(),
            subject: "Dzień dobry".into(),
            html: "<p>Hej</p>".into(),
        };

        let value = serde_json::to_value(mailer.payload(&email)).expect("serializes");

        assert_eq!(
            value,
            serde_json::json!({
                "from": "Studio <hello@example.com>",
                "to": ["salon@example.com"],
                "subject": "Dzień dobry",
                "html": "<p>Hej</p>",
            })
        );
    }

    #[test]
    fn unreachable_api_is_a_transport_error() {
        let mailer = HttpMailer::new(&MailConfig {
            api_url: "http://127.0.0.1:9/emails".into(),
            api_key: "key".into(),
            from: "hello@example.com".into(),
            timeout_secs: 1,
        })
        .expect("client builds");
        let email = OutgoingEmail {
            to: "salon@example.com".into(),
            subject: "s".into(),
            html: "b".into(),
        };

        assert!(matches!(
            mailer.send_email(&email),
            Err(DeliveryError::Transport(_))
        ));
    }
}

//! Automated outreach: the step schedule, message rendering, delivery
//! adapters and the batch processor that ties them together.

use serde::Serialize;
use thiserror::Error;

use crate::domain::followup::OutreachStep;
use crate::repository::errors::RepositoryError;

#[cfg(feature = "server")]
pub mod mailer;
pub mod processor;
pub mod render;
pub mod schedule;
#[cfg(feature = "server")]
pub mod sms;

pub use processor::{FollowupProcessor, FollowupReport};
pub use render::{RenderedMessage, render_step};
pub use schedule::{DueCutoffs, OutreachSchedule, next_due_step};

/// Author recorded on timeline entries written by the automated sequence.
pub const AUTOMATION_AUTHOR: &str = "Auto follow-up";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingSms {
    pub hub_id: i32,
    /// Recipient in E.164 format.
    pub to: String,
    pub text: String,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Sends transactional email.
#[cfg_attr(feature = "test-mocks", mockall::automock)]
pub trait Mailer {
    fn send_email(&self, email: &OutgoingEmail) -> Result<(), DeliveryError>;
}

/// Hands text messages to the SMS relay.
#[cfg_attr(feature = "test-mocks", mockall::automock)]
pub trait SmsGateway {
    fn send_sms(&self, sms: &OutgoingSms) -> Result<(), DeliveryError>;
}

/// Reasons a single step could not be delivered to a lead.
#[derive(Debug, Error)]
pub enum OutreachError {
    #[error("no template configured for step {0}")]
    MissingTemplate(OutreachStep),

    #[error("lead has no recipient address for step {0}")]
    MissingRecipient(OutreachStep),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

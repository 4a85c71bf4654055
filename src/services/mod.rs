//! Business operations behind the HTTP handlers.
//!
//! Services are plain functions generic over the repository traits so they
//! can be exercised against [`crate::repository::mock::MockRepository`].

use pushkind_common::services::errors::ServiceError as CommonServiceError;
use thiserror::Error;

use crate::outreach::{DeliveryError, OutreachError};
use crate::repository::errors::RepositoryError;

pub mod api;
pub mod leads;
pub mod outreach;
pub mod templates;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(RepositoryError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<OutreachError> for ServiceError {
    fn from(err: OutreachError) -> Self {
        match err {
            OutreachError::Delivery(err) => ServiceError::Delivery(err),
            OutreachError::Repository(err) => err.into(),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<CommonServiceError> for ServiceError {
    fn from(err: CommonServiceError) -> Self {
        match err {
            CommonServiceError::Unauthorized => ServiceError::Unauthorized,
            CommonServiceError::NotFound => ServiceError::NotFound,
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::lead::{Lead, LeadStatus, OutreachState};
    use crate::domain::types::{
        CityName, ContactName, HubId, LeadEmail, LeadId, PhoneNumber, SalonName,
    };
    use pushkind_common::domain::auth::AuthenticatedUser;

    use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

    pub fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 20)
            .and_then(|date| date.and_hms_opt(9, 0, 0))
            .expect("valid date")
    }

    pub fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "admin@example.com".to_string(),
            hub_id: 42,
            name: "Admin".to_string(),
            roles: vec![
                SERVICE_ACCESS_ROLE.to_string(),
                SERVICE_ADMIN_ROLE.to_string(),
            ],
            exp: 0,
        }
    }

    pub fn member_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "2".to_string(),
            email: "ola@example.com".to_string(),
            hub_id: 42,
            name: "Ola".to_string(),
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: 0,
        }
    }

    pub fn outsider_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "3".to_string(),
            email: "guest@example.com".to_string(),
            hub_id: 42,
            name: "Guest".to_string(),
            roles: vec![],
            exp: 0,
        }
    }

    pub fn sample_lead(id: i32) -> Lead {
        Lead {
            id: LeadId::new(id).expect("valid id"),
            hub_id: HubId::new(42).expect("valid hub"),
            salon_name: SalonName::new("Salon Bella").expect("valid name"),
            contact_name: Some(ContactName::new("Anna Kowalska").expect("valid name")),
            email: Some(LeadEmail::new("bella@example.com").expect("valid email")),
            phone: Some(PhoneNumber::new("600700800").expect("valid phone")),
            city: Some(CityName::new("Gdańsk").expect("valid city")),
            status: LeadStatus::New,
            notes: None,
            outreach: OutreachState::default(),
            created_at: fixed_now(),
            updated_at: fixed_now(),
        }
    }
}

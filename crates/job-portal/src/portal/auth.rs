//! Caller identity taken from the `x-user-id` / `x-user-role` headers.
//!
//! The headers are trusted as sent; nothing here verifies them.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use super::service::PortalError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Company,
    Admin,
}

impl Role {
    /// Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "company" => Some(Self::Company),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Account kinds that can register and log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Student,
    Company,
}

impl AccountType {
    pub fn parse(raw: &str) -> Option<Self> {
        match Role::parse(raw)? {
            Role::Student => Some(Self::Student),
            Role::Company => Some(Self::Company),
            Role::Admin => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub role: Role,
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = PortalError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = header_value(parts, USER_ID_HEADER).ok_or(PortalError::Unauthenticated)?;
        let role = header_value(parts, USER_ROLE_HEADER)
            .and_then(Role::parse)
            .ok_or(PortalError::Unauthenticated)?;

        Ok(Identity {
            id: id.to_string(),
            role,
        })
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

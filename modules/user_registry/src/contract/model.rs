use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A registered user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

/// Data for creating a new user; the id and timestamps are assigned on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: String,
}

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update data; `None` (or a blank value) leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
}

/// The unique attribute a lookup is performed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SearchType {
    UserId,
    EmailAddress,
    PhoneNumber,
}

impl SearchType {
    pub const ALL: [SearchType; 3] = [
        SearchType::UserId,
        SearchType::EmailAddress,
        SearchType::PhoneNumber,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::UserId => "UserId",
            SearchType::EmailAddress => "EmailAddress",
            SearchType::PhoneNumber => "PhoneNumber",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string names none of the [`SearchType`] variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search type '{0}'")]
pub struct UnknownSearchType(pub String);

impl FromStr for SearchType {
    type Err = UnknownSearchType;

    /// Variant names match case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SearchType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSearchType(s.to_string()))
    }
}

/// Current time at whole-second precision, matching what the store keeps.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

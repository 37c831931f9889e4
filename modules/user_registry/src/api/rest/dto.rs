use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use problem_details::FieldErrors;

use crate::contract::model::{CreatedUser, NewUser, SearchType, User, UserPatch};
use crate::validation::rules::{self, Rule};
use crate::validation::{Validate, Violations};

pub const NO_UPDATE_FIELDS: &str = "At least one field must be provided for update.";

/// REST DTO for a stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

/// REST DTO returned by a successful registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserDto {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// REST DTO for registering a user. Absent and `null` fields are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserReq {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
}

/// Query parameters of a lookup
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct GetUserQuery {
    /// One of `UserId`, `EmailAddress`, `PhoneNumber`.
    #[serde(alias = "SearchType")]
    pub search_type: String,
    /// Value matched against the selected attribute.
    #[serde(alias = "Value")]
    pub value: String,
}

/// Route parameter naming a user
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Path)]
pub struct UserIdPath {
    pub user_id: String,
}

fn text(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or_default()
}

/// Present and not blank.
fn supplied(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

impl Validate for CreateUserReq {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Violations::new();
        v.check("firstName", text(&self.first_name), rules::NAME_RULES)
            .check("lastName", text(&self.last_name), rules::NAME_RULES)
            .check("phoneNumber", text(&self.phone_number), rules::PHONE_RULES)
            .check("emailAddress", text(&self.email_address), rules::EMAIL_RULES);
        v.into_result()
    }
}

impl Validate for UpdateUserReq {
    fn validate(&self) -> Result<(), FieldErrors> {
        let fields = [
            ("firstName", &self.first_name, rules::NAME_RULES),
            ("lastName", &self.last_name, rules::NAME_RULES),
            ("phoneNumber", &self.phone_number, rules::PHONE_RULES),
            ("emailAddress", &self.email_address, rules::EMAIL_RULES),
        ];

        let mut v = Violations::new();
        let mut any = false;
        for (name, value, field_rules) in fields {
            if let Some(value) = supplied(value) {
                any = true;
                v.check(name, value, field_rules);
            }
        }
        if !any {
            v.add("request", NO_UPDATE_FIELDS);
        }
        v.into_result()
    }
}

impl Validate for GetUserQuery {
    fn validate(&self) -> Result<(), FieldErrors> {
        let per_type: &[Rule] = match self.search_type.parse::<SearchType>() {
            Ok(_) if self.value.is_empty() => &[],
            Ok(SearchType::UserId) => &[Rule::MustNotExceed(50), Rule::UserIdCharacters],
            Ok(SearchType::PhoneNumber) => &[Rule::MustNotExceed(20), Rule::PhoneNumberCharacters],
            Ok(SearchType::EmailAddress) => &[Rule::MustNotExceed(200), Rule::ValidEmailAddress],
            Err(_) => &[],
        };
        let value_rules: Vec<Rule> = std::iter::once(Rule::IsRequired)
            .chain(per_type.iter().copied())
            .collect();

        let mut v = Violations::new();
        v.check("searchType", &self.search_type, &[Rule::ValidSearchType])
            .check("value", &self.value, &value_rules);
        v.into_result()
    }
}

impl Validate for UserIdPath {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut v = Violations::new();
        v.check("userId", &self.user_id, rules::USER_ID_RULES);
        v.into_result()
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email_address: user.email_address,
            created_at: user.created_at,
            last_updated_at: user.last_updated_at,
        }
    }
}

impl From<CreatedUser> for CreatedUserDto {
    fn from(created: CreatedUser) -> Self {
        Self {
            user_id: created.user_id,
            created_at: created.created_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            first_name: req.first_name.unwrap_or_default(),
            last_name: req.last_name.unwrap_or_default(),
            email_address: req.email_address.unwrap_or_default(),
            phone_number: req.phone_number.unwrap_or_default(),
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            email_address: req.email_address,
        }
    }
}

use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use crate::contract::model::SearchType;

pub const NOT_PROVIDED: &str = "Is not provided.";
pub const UNALLOWED_CHARACTERS: &str = "Contains unallowed characters.";
pub const INVALID_EMAIL: &str = "Is not a valid email address.";
pub const INVALID_SEARCH_TYPE: &str = "Must be 'UserId' or 'EmailAddress' or 'PhoneNumber'";

/// Separator between several failures on one field.
pub const MESSAGE_SEPARATOR: &str = " | ";

static NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_ ]+$").expect("valid regex"));
static USER_ID_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid regex"));
static EMAIL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9\-_ .@]+$").expect("valid regex"));
static PHONE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+0-9]+$").expect("valid regex"));

/// A single field predicate with its failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    IsRequired,
    MustNotExceed(usize),
    NameCharacters,
    UserIdCharacters,
    EmailAddressCharacters,
    PhoneNumberCharacters,
    ValidEmailAddress,
    ValidSearchType,
}

impl Rule {
    /// `Err` carries the failure message.
    pub fn check(self, value: &str) -> Result<(), String> {
        let ok = match self {
            Rule::IsRequired => !value.trim().is_empty(),
            Rule::MustNotExceed(max) => value.chars().count() <= max,
            Rule::NameCharacters => NAME_CHARS.is_match(value),
            Rule::UserIdCharacters => USER_ID_CHARS.is_match(value),
            Rule::EmailAddressCharacters => EMAIL_CHARS.is_match(value),
            Rule::PhoneNumberCharacters => PHONE_CHARS.is_match(value),
            Rule::ValidEmailAddress => value.validate_email(),
            Rule::ValidSearchType => value.parse::<SearchType>().is_ok(),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    pub fn message(self) -> String {
        match self {
            Rule::IsRequired => NOT_PROVIDED.to_string(),
            Rule::MustNotExceed(max) => format!("Exceeds {max} characters."),
            Rule::NameCharacters
            | Rule::UserIdCharacters
            | Rule::EmailAddressCharacters
            | Rule::PhoneNumberCharacters => UNALLOWED_CHARACTERS.to_string(),
            Rule::ValidEmailAddress => INVALID_EMAIL.to_string(),
            Rule::ValidSearchType => INVALID_SEARCH_TYPE.to_string(),
        }
    }
}

/// Run `rules` in order and join every failure, or `None` when all pass.
/// A failing rule never short-circuits the ones after it.
pub fn apply(value: &str, rules: &[Rule]) -> Option<String> {
    let failures: Vec<String> = rules.iter().filter_map(|r| r.check(value).err()).collect();
    if failures.is_empty() {
        None
    } else {
        Some(failures.join(MESSAGE_SEPARATOR))
    }
}

/// Field rule sets shared by the request models.
pub const NAME_RULES: &[Rule] = &[Rule::IsRequired, Rule::MustNotExceed(100), Rule::NameCharacters];
pub const PHONE_RULES: &[Rule] = &[
    Rule::IsRequired,
    Rule::MustNotExceed(20),
    Rule::PhoneNumberCharacters,
];
pub const EMAIL_RULES: &[Rule] = &[
    Rule::IsRequired,
    Rule::MustNotExceed(200),
    Rule::ValidEmailAddress,
    Rule::EmailAddressCharacters,
];
pub const USER_ID_RULES: &[Rule] = &[
    Rule::IsRequired,
    Rule::MustNotExceed(50),
    Rule::UserIdCharacters,
];

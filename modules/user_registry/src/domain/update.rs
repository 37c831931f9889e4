use crate::contract::model::UserPatch;
use crate::domain::error::DomainError;

/// Columns a user may change after registration, in the order an UPDATE sets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    FirstName,
    LastName,
    PhoneNumber,
    EmailAddress,
}

impl UserField {
    pub const ORDERED: [UserField; 4] = [
        UserField::FirstName,
        UserField::LastName,
        UserField::PhoneNumber,
        UserField::EmailAddress,
    ];

    /// Column name in the `users` table.
    pub fn column(self) -> &'static str {
        match self {
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::PhoneNumber => "phone_number",
            UserField::EmailAddress => "email_address",
        }
    }

    fn pick(self, patch: &UserPatch) -> Option<&str> {
        let value = match self {
            UserField::FirstName => patch.first_name.as_deref(),
            UserField::LastName => patch.last_name.as_deref(),
            UserField::PhoneNumber => patch.phone_number.as_deref(),
            UserField::EmailAddress => patch.email_address.as_deref(),
        };
        value.filter(|v| !v.trim().is_empty())
    }
}

/// Non-empty, ordered set of column changes for one update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUpdate {
    changes: Vec<(UserField, String)>,
}

impl PartialUpdate {
    /// Keep only the supplied (non-blank) fields of `patch`.
    ///
    /// Fails with `InvalidInput` when nothing would change.
    pub fn from_patch(patch: &UserPatch) -> Result<Self, DomainError> {
        let changes: Vec<_> = UserField::ORDERED
            .into_iter()
            .filter_map(|f| f.pick(patch).map(|v| (f, v.to_string())))
            .collect();

        if changes.is_empty() {
            return Err(DomainError::invalid_input(
                "At least one field must be provided for update.",
            ));
        }
        Ok(Self { changes })
    }

    pub fn changes(&self) -> &[(UserField, String)] {
        &self.changes
    }

    pub fn fields(&self) -> impl Iterator<Item = UserField> + '_ {
        self.changes.iter().map(|(f, _)| *f)
    }

    pub fn get(&self, field: UserField) -> Option<&str> {
        self.changes
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }
}

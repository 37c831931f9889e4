use async_trait::async_trait;

use crate::contract::model::{SearchType, User};
use crate::domain::error::DomainError;
use crate::domain::update::PartialUpdate;

/// Port for the domain layer: persistence operations the service needs.
///
/// Store failures never escape as anything but a [`DomainError`]:
/// row-count surprises are `DatabaseError`, unique collisions are
/// `RecordAlreadyExists`, missing rows are `UserNotFound` and everything
/// else is `Exception` carrying the driver message.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a fully-formed user.
    async fn save_user(&self, user: &User) -> Result<(), DomainError>;
    /// Physically remove a user by id.
    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError>;
    /// Load the single user whose `search_type` column equals `value`.
    async fn get_user(&self, value: &str, search_type: SearchType) -> Result<User, DomainError>;
    /// Apply the supplied columns and refresh `last_updated_at`.
    async fn update_user(&self, user_id: &str, update: &PartialUpdate) -> Result<(), DomainError>;
}

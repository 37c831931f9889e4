use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use ulid::Ulid;

use crate::contract::model::{now_utc, CreatedUser, NewUser, SearchType, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::domain::update::PartialUpdate;

/// Orchestrates registry operations on top of the repository port.
/// Every repository failure is terminal for the request; nothing is retried.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    #[instrument(name = "user_registry.service.create_user", skip_all)]
    pub async fn create_user(&self, new_user: NewUser) -> Result<CreatedUser, DomainError> {
        info!("Creating new user");

        let now = now_utc();
        let user = User {
            user_id: Ulid::new().to_string(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email_address: new_user.email_address,
            phone_number: new_user.phone_number,
            created_at: now,
            last_updated_at: now,
        };

        self.repo.save_user(&user).await.inspect_err(log_failure)?;

        info!(user_id = %user.user_id, "Successfully created user");
        Ok(CreatedUser {
            user_id: user.user_id,
            created_at: user.created_at,
        })
    }

    #[instrument(
        name = "user_registry.service.get_user",
        skip(self, value),
        fields(search_type = %search_type)
    )]
    pub async fn get_user(&self, value: &str, search_type: SearchType) -> Result<User, DomainError> {
        debug!("Looking up user");

        let user = self
            .repo
            .get_user(value, search_type)
            .await
            .inspect_err(log_failure)?;

        debug!(user_id = %user.user_id, "Successfully retrieved user");
        Ok(user)
    }

    /// Lookup by the raw search-type name as it arrived on the wire.
    pub async fn find_user(&self, value: &str, search_type: &str) -> Result<User, DomainError> {
        let search_type: SearchType = search_type.parse()?;
        self.get_user(value, search_type).await
    }

    #[instrument(
        name = "user_registry.service.update_user",
        skip(self, patch),
        fields(user_id = %user_id)
    )]
    pub async fn update_user(&self, user_id: &str, patch: UserPatch) -> Result<(), DomainError> {
        info!("Updating user");

        let update = PartialUpdate::from_patch(&patch).inspect_err(log_failure)?;
        debug!(
            columns = ?update.fields().map(|f| f.column()).collect::<Vec<_>>(),
            "Applying partial update"
        );

        self.repo
            .update_user(user_id, &update)
            .await
            .inspect_err(log_failure)?;

        info!("Successfully updated user");
        Ok(())
    }

    #[instrument(
        name = "user_registry.service.delete_user",
        skip(self),
        fields(user_id = %user_id)
    )]
    pub async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        info!("Deleting user");

        self.repo
            .delete_user(user_id)
            .await
            .inspect_err(log_failure)?;

        info!("Successfully deleted user");
        Ok(())
    }
}

fn log_failure(e: &DomainError) {
    warn!(kind = %e.kind, message = %e.message, "Operation failed");
}

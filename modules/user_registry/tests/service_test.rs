//! Service behavior against a scripted repository: error propagation and
//! what reaches the store.

use std::sync::{Arc, Mutex};

use user_registry::contract::model::{NewUser, SearchType, User, UserPatch};
use user_registry::domain::error::{DomainError, ErrorKind};
use user_registry::domain::repo::UsersRepository;
use user_registry::domain::service::Service;
use user_registry::domain::update::{PartialUpdate, UserField};
use user_registry::errors::domain_problem;

/// Repository that fails every call with a fixed error and records updates.
struct FailingRepository {
    error: DomainError,
    updates: Mutex<Vec<PartialUpdate>>,
}

impl FailingRepository {
    fn new(error: DomainError) -> Self {
        Self {
            error,
            updates: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl UsersRepository for FailingRepository {
    async fn save_user(&self, _user: &User) -> Result<(), DomainError> {
        Err(self.error.clone())
    }

    async fn delete_user(&self, _user_id: &str) -> Result<(), DomainError> {
        Err(self.error.clone())
    }

    async fn get_user(&self, _value: &str, _search_type: SearchType) -> Result<User, DomainError> {
        Err(self.error.clone())
    }

    async fn update_user(&self, _user_id: &str, update: &PartialUpdate) -> Result<(), DomainError> {
        self.updates.lock().unwrap().push(update.clone());
        Err(self.error.clone())
    }
}

fn new_user() -> NewUser {
    NewUser {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email_address: "ada@example.com".to_string(),
        phone_number: "+2348012345678".to_string(),
    }
}

#[tokio::test]
async fn repository_errors_pass_through_unchanged() {
    let error = DomainError::already_exists("Phone number already exists.");
    let svc = Service::new(Arc::new(FailingRepository::new(error.clone())));

    let err = svc.create_user(new_user()).await.unwrap_err();

    assert_eq!(err, error);
    let problem = domain_problem(&err, "/users");
    assert_eq!(problem.status, 409);
    assert_eq!(problem.detail, "Phone number already exists.");
}

#[tokio::test]
async fn infrastructure_errors_become_500_problems() {
    for kind in [ErrorKind::DatabaseError, ErrorKind::Exception] {
        let svc = Service::new(Arc::new(FailingRepository::new(DomainError::new(
            kind,
            "2 rows affected",
        ))));

        let err = svc.delete_user("ABC").await.unwrap_err();

        assert_eq!(err.kind, kind);
        assert_eq!(domain_problem(&err, "/users/ABC").status, 500);
    }
}

#[tokio::test]
async fn empty_patch_never_reaches_the_store() {
    let repo = Arc::new(FailingRepository::new(DomainError::database("unreachable")));
    let svc = Service::new(repo.clone());

    let err = svc
        .update_user(
            "ABC",
            UserPatch {
                first_name: Some(" ".to_string()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidInput);
    assert!(repo.updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn supplied_fields_are_forwarded_in_column_order() {
    let repo = Arc::new(FailingRepository::new(DomainError::user_not_found("gone")));
    let svc = Service::new(repo.clone());

    let err = svc
        .update_user(
            "ABC",
            UserPatch {
                email_address: Some("new@example.com".to_string()),
                first_name: Some("Augusta".to_string()),
                ..UserPatch::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::UserNotFound);
    let updates = repo.updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(
        updates[0].fields().collect::<Vec<_>>(),
        vec![UserField::FirstName, UserField::EmailAddress]
    );
}

#[tokio::test]
async fn unknown_search_type_is_rejected_before_the_store() {
    let svc = Service::new(Arc::new(FailingRepository::new(DomainError::database(
        "unreachable",
    ))));

    let err = svc.find_user("ada", "Nickname").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidSearchType);
}

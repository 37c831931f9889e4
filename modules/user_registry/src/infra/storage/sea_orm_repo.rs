//! SeaORM-backed implementation of the repository port.
//!
//! Generic over `C: ConnectionTrait`, so it runs on a pooled
//! `DatabaseConnection` (one checkout per statement) or inside a transaction.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect, SqlErr};
use tracing::debug;

use crate::contract::model::{now_utc, SearchType, User};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use crate::domain::update::{PartialUpdate, UserField};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

pub const EMAIL_EXISTS: &str = "Email address already exists.";
pub const PHONE_EXISTS: &str = "Phone number already exists.";
pub const USER_ID_EXISTS: &str = "User ID already exists.";
pub const RECORD_EXISTS: &str = "Record already exists.";

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn save_user(&self, user: &User) -> Result<(), DomainError> {
        let rows = UserEntity::insert(UserAM::from(user))
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    "save the user data to",
                    Some(&user.email_address),
                    Some(&user.phone_number),
                )
            })?;

        match rows {
            1 => Ok(()),
            n => Err(DomainError::database(format!(
                "An error occurred while trying to insert the user data into the database: {n} rows affected."
            ))),
        }
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        let res = UserEntity::delete_by_id(user_id.to_owned())
            .exec(&self.conn)
            .await
            .map_err(|e| write_error(e, "delete the user data from", None, None))?;

        single_row_by_id(res.rows_affected, user_id, "delete")
    }

    async fn get_user(&self, value: &str, search_type: SearchType) -> Result<User, DomainError> {
        let mut rows = UserEntity::find()
            .filter(search_column(search_type).eq(value))
            .limit(2)
            .all(&self.conn)
            .await
            .map_err(|e| {
                DomainError::exception(format!(
                    "An exception occurred while trying to retrieve the user data from the database: {e}."
                ))
            })?;

        match rows.len() {
            0 => Err(DomainError::user_not_found(format!(
                "No user was found with {search_type} '{value}'."
            ))),
            1 => Ok(rows.remove(0).into()),
            n => Err(DomainError::database(format!(
                "Expected a single user with {search_type} '{value}' but found {n}."
            ))),
        }
    }

    async fn update_user(&self, user_id: &str, update: &PartialUpdate) -> Result<(), DomainError> {
        let mut stmt = UserEntity::update_many();
        for (field, value) in update.changes() {
            stmt = stmt.col_expr(Column::from(*field), Expr::value(value.clone()));
        }
        let res = stmt
            .col_expr(Column::LastUpdatedAt, Expr::value(now_utc()))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .map_err(|e| {
                write_error(
                    e,
                    "update the user data in",
                    update.get(UserField::EmailAddress),
                    update.get(UserField::PhoneNumber),
                )
            })?;

        single_row_by_id(res.rows_affected, user_id, "update")
    }
}

fn search_column(search_type: SearchType) -> Column {
    match search_type {
        SearchType::UserId => Column::UserId,
        SearchType::EmailAddress => Column::EmailAddress,
        SearchType::PhoneNumber => Column::PhoneNumber,
    }
}

/// Row-count semantics shared by statements keyed on the primary key.
fn single_row_by_id(rows: u64, user_id: &str, verb: &str) -> Result<(), DomainError> {
    match rows {
        1 => Ok(()),
        0 => Err(DomainError::user_not_found(format!(
            "No user with ID '{user_id}' was found."
        ))),
        n => Err(DomainError::database(format!(
            "An error occurred while trying to {verb} the user data: {n} rows affected."
        ))),
    }
}

/// Unique violations become `RecordAlreadyExists`; anything else is an
/// `Exception` carrying the driver message.
fn write_error(err: DbErr, action: &str, email: Option<&str>, phone: Option<&str>) -> DomainError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => {
            debug!(driver_message = %msg, "Unique constraint violated");
            DomainError::already_exists(conflict_message(&msg, email, phone))
        }
        _ => DomainError::exception(format!(
            "An exception occurred while trying to {action} the database: {err}."
        )),
    }
}

/// Name the colliding field from the driver's text.
///
/// MySQL quotes the duplicate value ("Duplicate entry 'x' for key ..."),
/// SQLite names the column ("UNIQUE constraint failed: users.email_address"),
/// so the value is checked first and the column/index name second.
pub fn conflict_message(driver_message: &str, email: Option<&str>, phone: Option<&str>) -> &'static str {
    let mentions = |v: Option<&str>| v.is_some_and(|v| !v.is_empty() && driver_message.contains(v));

    if mentions(email) {
        EMAIL_EXISTS
    } else if mentions(phone) {
        PHONE_EXISTS
    } else if driver_message.contains("email_address") {
        EMAIL_EXISTS
    } else if driver_message.contains("phone_number") {
        PHONE_EXISTS
    } else if driver_message.contains("user_id") || driver_message.contains("PRIMARY") {
        USER_ID_EXISTS
    } else {
        RECORD_EXISTS
    }
}

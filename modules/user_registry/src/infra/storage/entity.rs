use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::update::UserField;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email_address: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<UserField> for Column {
    fn from(field: UserField) -> Self {
        match field {
            UserField::FirstName => Column::FirstName,
            UserField::LastName => Column::LastName,
            UserField::PhoneNumber => Column::PhoneNumber,
            UserField::EmailAddress => Column::EmailAddress,
        }
    }
}

use sea_orm::Set;

use crate::contract::model::User;
use crate::infra::storage::entity::{ActiveModel, Model};

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            user_id: m.user_id,
            first_name: m.first_name,
            last_name: m.last_name,
            email_address: m.email_address,
            phone_number: m.phone_number,
            created_at: m.created_at,
            last_updated_at: m.last_updated_at,
        }
    }
}

impl From<&User> for ActiveModel {
    fn from(u: &User) -> Self {
        Self {
            user_id: Set(u.user_id.clone()),
            first_name: Set(u.first_name.clone()),
            last_name: Set(u.last_name.clone()),
            email_address: Set(u.email_address.clone()),
            phone_number: Set(u.phone_number.clone()),
            created_at: Set(u.created_at),
            last_updated_at: Set(u.last_updated_at),
        }
    }
}

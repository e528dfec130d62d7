//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Profile, User, UserId};
use crate::infra::repositories::paginator::FilterableEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub cpf: String,
    pub age: String,
    pub activation_status: bool,
    pub profile: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl FilterableEntity for Entity {
    fn filter_column(field: &str) -> Option<Column> {
        match field {
            "name" => Some(Column::Name),
            "cpf" => Some(Column::Cpf),
            "age" => Some(Column::Age),
            _ => None,
        }
    }
}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: UserId::new(model.id),
            name: model.name,
            cpf: model.cpf,
            age: model.age,
            activation_status: model.activation_status,
            profile: Profile::from(model.profile.as_str()),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

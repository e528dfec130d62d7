//! Error record entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ErrorRecord;
use crate::infra::repositories::paginator::FilterableEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "errors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub api_code: String,
    pub code: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeUtc,
    /// Time of the last occurrence
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl FilterableEntity for Entity {
    fn filter_column(field: &str) -> Option<Column> {
        match field {
            "api_code" => Some(Column::ApiCode),
            "code" => Some(Column::Code),
            "name" => Some(Column::Name),
            _ => None,
        }
    }
}

impl From<Model> for ErrorRecord {
    fn from(model: Model) -> Self {
        ErrorRecord {
            code: u16::try_from(model.code).unwrap_or(500),
            api_code: model.api_code,
            name: model.name,
            description: model.description,
            info: None,
        }
    }
}

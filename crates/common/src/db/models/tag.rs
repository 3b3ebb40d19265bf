//! Tag entity
//!
//! Tag titles are globally unique; assignment reuses existing rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text", unique)]
    pub title: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::resource_tag::Entity")]
    ResourceTags,

    #[sea_orm(has_many = "super::bounty_tag::Entity")]
    BountyTags,
}

impl ActiveModelBehavior for ActiveModel {}

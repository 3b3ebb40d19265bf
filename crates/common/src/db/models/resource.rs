//! Resource entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub author: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    pub category_id: i64,

    #[sea_orm(column_type = "Text")]
    pub resource_url: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,

    /// Wallet address of the curator who submitted the resource
    #[sea_orm(column_type = "Text", nullable)]
    pub curator_address: Option<String>,

    /// Derived from title + id after the row exists; unique once set
    #[sea_orm(column_type = "Text", nullable, unique)]
    pub slug: Option<String>,

    pub published_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    #[sea_orm(has_many = "super::resource_tag::Entity")]
    ResourceTags,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::resource_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResourceTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! User review entity
//!
//! A completed engagement produces two reviews: the bounty owner reviewing
//! the worker (tied to the application) and the worker reviewing the owner.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub reviewer_id: i64,

    /// The user being reviewed
    pub user_id: i64,

    pub application_id: Option<i64>,

    /// 1-5
    pub rating: i16,

    #[sea_orm(column_type = "Text")]
    pub comment: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReviewerId",
        to = "super::user::Column::Id"
    )]
    Reviewer,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Subject,

    #[sea_orm(
        belongs_to = "super::bounty_application::Entity",
        from = "Column::ApplicationId",
        to = "super::bounty_application::Column::Id"
    )]
    Application,
}

impl ActiveModelBehavior for ActiveModel {}

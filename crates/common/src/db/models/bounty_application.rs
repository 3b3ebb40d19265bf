//! Bounty application entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bounty_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub bounty_id: i64,

    pub applicant_id: i64,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bounty::Entity",
        from = "Column::BountyId",
        to = "super::bounty::Column::Id"
    )]
    Bounty,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ApplicantId",
        to = "super::user::Column::Id"
    )]
    Applicant,
}

impl Related<super::bounty::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bounty.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! SeaORM entity models
//!
//! Database entities for the Talentboard content and bounty marketplace

mod bounty;
mod bounty_application;
mod bounty_tag;
mod category;
mod resource;
mod resource_tag;
mod social_link;
mod tag;
mod user;
mod user_review;

pub use bounty::{
    ActiveModel as BountyActiveModel, Column as BountyColumn, Entity as BountyEntity,
    Model as Bounty,
};

pub use bounty_application::{
    ActiveModel as BountyApplicationActiveModel, Column as BountyApplicationColumn,
    Entity as BountyApplicationEntity, Model as BountyApplication,
};

pub use bounty_tag::{
    ActiveModel as BountyTagActiveModel, Column as BountyTagColumn, Entity as BountyTagEntity,
    Model as BountyTag,
};

pub use category::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as CategoryEntity,
    Model as Category,
};

pub use resource::{
    ActiveModel as ResourceActiveModel, Column as ResourceColumn, Entity as ResourceEntity,
    Model as Resource,
};

pub use resource_tag::{
    ActiveModel as ResourceTagActiveModel, Column as ResourceTagColumn,
    Entity as ResourceTagEntity, Model as ResourceTag,
};

pub use social_link::{
    ActiveModel as SocialLinkActiveModel, Column as SocialLinkColumn, Entity as SocialLinkEntity,
    Model as SocialLink,
};

pub use tag::{ActiveModel as TagActiveModel, Column as TagColumn, Entity as TagEntity, Model as Tag};

pub use user::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as User,
};

pub use user_review::{
    ActiveModel as UserReviewActiveModel, Column as UserReviewColumn, Entity as UserReviewEntity,
    Model as UserReview,
};

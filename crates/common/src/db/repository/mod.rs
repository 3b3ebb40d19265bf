//! Repository pattern for database operations
//!
//! A generic repository wraps one table and provides typed CRUD and
//! pagination; specialized repositories compose it with tag assignment,
//! slug persistence, and review shaping.

mod base;
mod bounties;
mod categories;
mod resources;
mod reviews;
mod social_links;
mod tags;
mod users;

pub use base::{page_range, BaseRepository, PageRange, PageRequest};
pub use bounties::{BountiesRepository, BountyListing, BountyOwner};
pub use categories::CategoriesRepository;
pub use resources::{NewResource, ResourceQuery, ResourceWithTags, ResourcesRepository};
pub use reviews::{
    display_handle, Review, ReviewFilter, ReviewKind, ReviewerProfile, ReviewsRepository,
};
pub use social_links::SocialLinksRepository;
pub use tags::{normalize_titles, TagsRepository};
pub use users::UsersRepository;

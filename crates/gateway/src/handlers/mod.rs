//! Request handlers
//!
//! Each handler validates its inbound request, dispatches to the
//! repositories, and returns a typed response. Thrown errors cross the
//! handler boundary as `AppError` and are mapped to HTTP responses in one
//! place by its `IntoResponse` implementation.

pub mod bounties;
pub mod categories;
pub mod chain;
pub mod health;
pub mod resources;
pub mod reviews;
pub mod users;

use talentboard_common::errors::{AppError, Result};

/// Largest allowed listing page
pub const MAX_PAGE_SIZE: u64 = 50;

/// Reject a requested page size outside `1..=50`
pub fn check_page_size(page_size: Option<u64>) -> Result<()> {
    match page_size {
        Some(size) if !(1..=MAX_PAGE_SIZE).contains(&size) => Err(AppError::invalid_field(
            "page_size",
            "page_size must be between 1 and 50",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_bounds() {
        assert!(check_page_size(None).is_ok());
        assert!(check_page_size(Some(1)).is_ok());
        assert!(check_page_size(Some(50)).is_ok());
        assert!(check_page_size(Some(0)).is_err());
        assert!(check_page_size(Some(51)).is_err());
    }
}

//! URL slug generation for content items
//!
//! Slugs are derived from the item title plus its persisted identifier, so
//! they are only computed after the row exists. Appending the numeric id
//! makes the result unique without any collision retry.

/// Build a URL-safe slug from a title and a persisted row id
pub fn make_slug(title: &str, id: i64) -> String {
    format!("{}-{}", slug::slugify(title), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_is_deterministic() {
        let a = make_slug("My Great Post", 42);
        let b = make_slug("My Great Post", 42);
        assert_eq!(a, b);
        assert_eq!(a, "my-great-post-42");
    }

    #[test]
    fn test_same_title_different_ids_differ() {
        let a = make_slug("My Great Post", 42);
        let b = make_slug("My Great Post", 43);
        assert_ne!(a, b);
    }

    #[test]
    fn test_slug_is_url_safe() {
        let s = make_slug("Épic   DeFi — Guide!", 7);
        assert!(s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!s.contains(' '));
    }
}

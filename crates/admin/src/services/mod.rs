//! Domain service facades.
//!
//! The only components the presentation layer talks to. Each facade decides
//! per call whether an entity comes from the external source of truth or
//! from the fallback store, and exposes uniform CRUD plus the order-line
//! sub-operations and date-range filtering.

pub mod orders;
pub mod users;

pub use orders::OrderService;
pub use users::{UserProfile, UserService};

/// Next locally synthesized id: `max(existing) + 1`, starting at 1.
pub(crate) fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().map_or(1, |max| max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id_starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), 1);
    }

    #[test]
    fn test_next_id_is_max_plus_one() {
        assert_eq!(next_id([3, 7, 2].into_iter()), 8);
    }
}

//! Conversions between demo store API wire shapes and domain entities.
//!
//! Mapping is bidirectional for users - lossy outward, because role,
//! department, and the boolean flags have no external representation - and
//! one-directional outward for orders: only the user, date, and
//! `{product, quantity}` projection are ever written back.

mod orders;
mod users;

pub use orders::{cart_input, convert_cart, convert_product, order_from_parts};
pub use users::{DEFAULT_DEPARTMENT, DEFAULT_ROLE, convert_user, patch_to_input, user_to_input};

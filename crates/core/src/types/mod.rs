//! Domain types for Storekeep.
//!
//! # Modules
//!
//! - [`id`] - Newtype wrappers for type-safe entity IDs
//! - [`user`] - Dashboard users and partial-update inputs
//! - [`product`] - Read-only catalog products
//! - [`order`] - Orders, order lines, and total arithmetic

pub mod id;
pub mod order;
pub mod product;
pub mod user;

pub use id::{LineId, OrderId, ProductId, UserId};
pub use order::{LinePatch, NewLine, NewOrder, Order, OrderLine, OrderPatch};
pub use product::Product;
pub use user::{Address, NewUser, User, UserPatch};

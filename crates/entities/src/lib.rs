//! Core entity definitions for the CRUD API.
//!
//! This crate defines the [`Entity`] abstraction and the concrete record
//! types served by the API: users, products, and tasks.

mod entity;
mod product;
mod task;
mod user;

pub use entity::Entity;
pub use product::*;
pub use task::*;
pub use user::*;

//! Resource storage for the CRUD API
//!
//! This crate provides a generic repository over entity collections. Records
//! are persisted either in memory (an ordered sequence per collection) or in
//! SQLite (one table per collection).

mod allocator;
mod backend;
mod error;
mod memory;
mod repository;
mod sqlite;

pub use allocator::*;
pub use backend::*;
pub use error::*;
pub use memory::*;
pub use repository::*;
pub use sqlite::*;

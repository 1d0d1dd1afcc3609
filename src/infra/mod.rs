//! Infrastructure layer - database access and persistence.

pub mod db;
pub mod repositories;
pub mod store;

pub use db::Database;
pub use store::{Persistence, Store};

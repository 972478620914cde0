//! # storage-adapters
//!
//! Implementations of the repository ports from `domains`.
//! `MemoryForumStore` is always compiled; `PgForumStore` needs `db-postgres`.

pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryForumStore;
#[cfg(feature = "db-postgres")]
pub use postgres::PgForumStore;

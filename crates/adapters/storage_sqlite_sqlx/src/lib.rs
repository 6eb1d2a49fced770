//! # hospital-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hospital-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain records and database rows
//! - Enforce room exclusivity through the `room_claims` table
//!
//! ## Dependency rule
//! Depends on `hospital-app` (for port traits) and `hospital-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
mod records;
mod store;
pub mod table;

pub use store::SqliteStore;

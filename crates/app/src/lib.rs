//! # hospital-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `Repository<T>` — CRUD for any [`Record`](hospital_domain::record::Record)
//!   - `ChildRepository<T, P>` — records of `T` belonging to a parent `P`
//!   - `OccupancyRepository` — which occupant holds a room
//!   - `UserRepository` — user lookup by username
//!   - `PasswordHasher`, `TokenCodec` — credential hashing and access tokens
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RecordService` — generic create, get, list, update, delete
//!   - `RoomAllocator` — room availability and claim checks
//!   - `AuthService` — register, login, authorize, user administration
//! - Define per-record **lifecycle rules** (reference and removal checks)
//!
//! ## Dependency rule
//! Depends on `hospital-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod lifecycle;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod memory;

//! # hospital-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** of the back office: CRUD for every record
//!   (`/api/buildings`, `/api/rooms`, `/api/pharmacies`, …), relationship
//!   queries, room availability, registration, login and user administration
//! - Wrap every response, success or failure, in the JSON envelope
//!   `{ data, message, status, success }`
//! - Check bearer tokens and `<resource>.<read|write>` permissions before any
//!   protected handler runs
//! - Map HTTP requests into application service calls (driving adapter)
//!
//! ## Dependency rule
//! Depends on `hospital-app` (for port traits and services) and
//! `hospital-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod envelope;
pub mod error;
pub mod permission;
pub mod router;
pub mod state;

//! # hospital-domain
//!
//! Pure domain model for the hospital back office.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **records** kept by the back office (buildings, floors, rooms,
//!   staff, doctors, patients, pharmacies, clinics, warehouses, suppliers,
//!   medicines, reservations, prescriptions, users)
//! - Define **occupancy**: which pharmacy, clinic or warehouse holds a room
//! - Define **permissions** and how a granted permission matches a required one
//! - Contain all invariant enforcement (`validate`)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;
pub mod time;

pub mod building;
pub mod facility;
pub mod medicine;
pub mod occupancy;
pub mod patient;
pub mod permission;
pub mod prescription;
pub mod reservation;
pub mod room;
pub mod staff;
pub mod user;

//! Domain types and pure business rules for the Atelier rental platform.
//!
//! This crate has zero internal dependencies so the rules it defines
//! (availability, reconciliation, rental lifecycle) can be used by the
//! repository layer, the API, and any future CLI tooling alike.

pub mod availability;
pub mod error;
pub mod naming;
pub mod product;
pub mod rental;
pub mod roles;
pub mod types;

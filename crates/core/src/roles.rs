//! Well-known role name constants.
//!
//! These must match the seed data in `db/migrations`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

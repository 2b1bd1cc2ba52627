//! Well-known role name constants.
//!
//! These must match the default in `20261019000001_create_users_table.sql`.

pub const ROLE_ADMIN: &str = "admin";

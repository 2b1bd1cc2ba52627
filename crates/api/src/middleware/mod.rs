//! Request extractors.
//!
//! - [`auth::AuthUser`] -- resolves the acting administrator via the session
//!   guard, rejecting with 401 when there is none.

pub mod auth;

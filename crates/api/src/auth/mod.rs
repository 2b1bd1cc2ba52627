//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- session token generation, validation, and cookie helpers.
//! - [`session`] -- the [`session::SessionGuard`] seam that resolves an actor
//!   from request headers.

pub mod jwt;
pub mod password;
pub mod session;

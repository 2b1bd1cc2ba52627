//! Domain types and pure helpers for the listing moderation back-office.
//!
//! This crate performs no I/O so it can be shared by the repository layer,
//! the HTTP API, and any future CLI tooling.

pub mod actor;
pub mod audit;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod roles;
pub mod types;

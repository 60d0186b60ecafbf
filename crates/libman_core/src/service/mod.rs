//! Service layer: per-call unit-of-work facade over the repositories.
//!
//! # Responsibility
//! - Own the database location and first-run initialization/seeding.
//! - Open one connection per logical operation; no session state survives
//!   a call.

pub mod library_service;

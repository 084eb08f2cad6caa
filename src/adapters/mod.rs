//! Adapters - Implementations of the port traits.
//!
//! - `auth` - Session validation (JWT, mock)
//! - `http` - Axum REST API
//! - `memory` - Process-local storage for development and tests
//! - `notify` - Invite email delivery
//! - `postgres` - PostgreSQL storage

pub mod auth;
pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;

//! HTTP adapter for vault plan, seat and invite endpoints.
//!
//! Mounted under `/api`; see [`routes::vault_routes`] for the full list.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{VaultApiError, VaultAppState};
pub use routes::vault_routes;

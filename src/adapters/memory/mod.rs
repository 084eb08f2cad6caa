//! In-memory adapters.
//!
//! Used when no database is configured and by the HTTP integration tests.

mod invite_store;
mod vault_store;

pub use invite_store::InMemoryInviteRepository;
pub use vault_store::InMemoryVaultStore;

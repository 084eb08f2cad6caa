//! HTTP adapters - REST API implementations.
//!
//! [`build_router`] composes the vault API, the health check and the
//! authentication layer. Transport layers (tracing, CORS, timeouts) are
//! added by the binary.

pub mod health;
pub mod middleware;
pub mod vault;

use axum::{middleware::from_fn_with_state, routing::get, Router};

pub use health::StorageBackend;
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use vault::{vault_routes, VaultApiError, VaultAppState};

/// Builds the application router.
///
/// Vault routes live under `/api`; `/health` sits at the root and does not
/// require a token.
pub fn build_router(state: VaultAppState, auth: AuthState, storage: StorageBackend) -> Router {
    let api = Router::new()
        .nest("/api", vault_routes())
        .layer(from_fn_with_state(auth, auth_middleware))
        .with_state(state);

    Router::new()
        .route("/health", get(health::health))
        .with_state(storage)
        .merge(api)
}

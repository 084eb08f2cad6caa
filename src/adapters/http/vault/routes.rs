//! Axum router configuration for vault endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    accept_invite, change_vault_plan, check_can_invite, create_invite, create_vault,
    get_vault_plan, list_invites, list_plans, remove_member, resend_invite, VaultAppState,
};

/// Create the vault API router.
///
/// # Routes
///
/// ## Public
/// - `GET /plans` - Plan catalog
///
/// ## Member endpoints (any role)
/// - `GET /vaults/:vault_id/plan` - Plan and seat usage
/// - `GET /vaults/:vault_id/members/can-invite` - Seat availability
///
/// ## Owner/Admin endpoints
/// - `PATCH /vaults/:vault_id/plan` - Change plan tier
/// - `DELETE /vaults/:vault_id/members/:user_id` - Remove a member
/// - `GET /vaults/:vault_id/invites` - List invites
/// - `POST /vaults/:vault_id/invites` - Create invite
/// - `POST /vaults/:vault_id/invites/:invite_id/resend` - Resend invite email
///
/// ## Any authenticated caller
/// - `POST /vaults` - Create a vault
/// - `POST /invites/:token/accept` - Accept an invite
pub fn vault_routes() -> Router<VaultAppState> {
    Router::new()
        .route("/plans", get(list_plans))
        .route("/vaults", post(create_vault))
        .route(
            "/vaults/:vault_id/plan",
            get(get_vault_plan).patch(change_vault_plan),
        )
        .route("/vaults/:vault_id/members/can-invite", get(check_can_invite))
        .route("/vaults/:vault_id/members/:user_id", delete(remove_member))
        .route(
            "/vaults/:vault_id/invites",
            get(list_invites).post(create_invite),
        )
        .route(
            "/vaults/:vault_id/invites/:invite_id/resend",
            post(resend_invite),
        )
        .route("/invites/:token/accept", post(accept_invite))
}

//! HTTP handlers for vault plan, seat and invite endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::{
    AcceptInviteCommand, AcceptInviteHandler, ChangeVaultPlanCommand, ChangeVaultPlanHandler,
    CheckCanInviteHandler, CheckCanInviteQuery, CreateInviteCommand, CreateInviteHandler,
    CreateVaultCommand, CreateVaultHandler, GetVaultPlanHandler, GetVaultPlanQuery,
    InviteSettings, ListInvitesHandler, ListInvitesQuery, ListPlansHandler, ListPlansQuery,
    RemoveMemberCommand, RemoveMemberHandler, ResendInviteCommand, ResendInviteHandler,
};
use crate::domain::foundation::{InviteId, UserId, VaultId};
use crate::domain::vault::{InviteError, SeatGuardError, VaultError, VaultRole};
use crate::ports::{
    InviteNotifier, InviteRepository, MembershipReader, MembershipRepository, VaultReader,
    VaultRepository,
};

use super::super::middleware::RequireAuth;
use super::dto::{
    AcceptInviteResponse, ChangePlanRequest, CreateInviteRequest, CreateInviteResponse,
    CreateVaultRequest, ErrorResponse, InviteListResponse, InviteResponse, PlanCatalogResponse,
    RemoveMemberResponse, ResendInviteResponse, VaultPlanResponse, VaultResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the vault API.
///
/// Cloned per request; handlers are built on demand from the ports.
#[derive(Clone)]
pub struct VaultAppState {
    pub vault_reader: Arc<dyn VaultReader>,
    pub vault_repository: Arc<dyn VaultRepository>,
    pub membership_reader: Arc<dyn MembershipReader>,
    pub membership_repository: Arc<dyn MembershipRepository>,
    pub invite_repository: Arc<dyn InviteRepository>,
    pub invite_notifier: Arc<dyn InviteNotifier>,
    pub invite_settings: InviteSettings,
}

impl VaultAppState {
    pub fn get_vault_plan_handler(&self) -> GetVaultPlanHandler {
        GetVaultPlanHandler::new(self.vault_reader.clone(), self.membership_reader.clone())
    }

    pub fn change_vault_plan_handler(&self) -> ChangeVaultPlanHandler {
        ChangeVaultPlanHandler::new(
            self.vault_reader.clone(),
            self.vault_repository.clone(),
            self.membership_reader.clone(),
        )
    }

    pub fn check_can_invite_handler(&self) -> CheckCanInviteHandler {
        CheckCanInviteHandler::new(self.vault_reader.clone(), self.membership_reader.clone())
    }

    pub fn create_vault_handler(&self) -> CreateVaultHandler {
        CreateVaultHandler::new(self.vault_reader.clone(), self.vault_repository.clone())
    }

    pub fn remove_member_handler(&self) -> RemoveMemberHandler {
        RemoveMemberHandler::new(
            self.vault_reader.clone(),
            self.membership_reader.clone(),
            self.membership_repository.clone(),
        )
    }

    pub fn create_invite_handler(&self) -> CreateInviteHandler {
        CreateInviteHandler::new(
            self.vault_reader.clone(),
            self.membership_reader.clone(),
            self.invite_repository.clone(),
            self.invite_notifier.clone(),
            self.invite_settings.clone(),
        )
    }

    pub fn list_invites_handler(&self) -> ListInvitesHandler {
        ListInvitesHandler::new(self.membership_reader.clone(), self.invite_repository.clone())
    }

    pub fn resend_invite_handler(&self) -> ResendInviteHandler {
        ResendInviteHandler::new(
            self.vault_reader.clone(),
            self.membership_reader.clone(),
            self.invite_repository.clone(),
            self.invite_notifier.clone(),
            self.invite_settings.clone(),
        )
    }

    pub fn accept_invite_handler(&self) -> AcceptInviteHandler {
        AcceptInviteHandler::new(
            self.vault_reader.clone(),
            self.membership_reader.clone(),
            self.membership_repository.clone(),
            self.invite_repository.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Path parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_vault_id(raw: &str) -> Result<VaultId, VaultApiError> {
    raw.parse::<VaultId>()
        .map_err(|_| VaultApiError(VaultError::validation("vault_id", "must be a UUID")))
}

fn parse_invite_id(raw: &str) -> Result<InviteId, VaultApiError> {
    raw.parse::<InviteId>()
        .map_err(|_| VaultApiError(VaultError::validation("invite_id", "must be a UUID")))
}

fn parse_user_id(raw: &str) -> Result<UserId, VaultApiError> {
    UserId::new(raw).map_err(|e| VaultApiError(e.into()))
}

/// Malformed bodies get the API's JSON error shape instead of axum's 422 text.
fn body_rejection(rejection: JsonRejection) -> VaultApiError {
    VaultApiError(VaultError::validation("body", rejection.body_text()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Plan endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/plans - Plan catalog
pub async fn list_plans() -> impl IntoResponse {
    let result = ListPlansHandler::new().handle(ListPlansQuery);
    Json(PlanCatalogResponse {
        plans: result.plans,
    })
}

/// POST /api/vaults - Create a vault owned by the caller
pub async fn create_vault(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<CreateVaultRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VaultApiError> {
    let Json(request) = body.map_err(body_rejection)?;
    let result = state
        .create_vault_handler()
        .handle(CreateVaultCommand {
            name: request.name,
            owner_id: user.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(VaultResponse::from(&result.vault))))
}

/// GET /api/vaults/:vault_id/plan - Current plan and seat usage
pub async fn get_vault_plan(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(vault_id): Path<String>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let result = state
        .get_vault_plan_handler()
        .handle(GetVaultPlanQuery {
            vault_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(VaultPlanResponse::from(&result.usage)))
}

/// PATCH /api/vaults/:vault_id/plan - Switch plan tier
pub async fn change_vault_plan(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(vault_id): Path<String>,
    body: Result<Json<ChangePlanRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let Json(request) = body.map_err(body_rejection)?;
    let new_tier = request.parse_tier().map_err(|e| VaultApiError(e.into()))?;

    let result = state
        .change_vault_plan_handler()
        .handle(ChangeVaultPlanCommand {
            vault_id,
            user_id: user.id,
            new_tier,
        })
        .await?;

    Ok(Json(VaultPlanResponse::from(&result.usage)))
}

/// GET /api/vaults/:vault_id/members/can-invite - Seat availability
pub async fn check_can_invite(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(vault_id): Path<String>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let result = state
        .check_can_invite_handler()
        .handle(CheckCanInviteQuery {
            vault_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(result.usage))
}

/// DELETE /api/vaults/:vault_id/members/:user_id - Remove a member
pub async fn remove_member(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path((vault_id, member_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let member_id = parse_user_id(&member_id)?;

    let result = state
        .remove_member_handler()
        .handle(RemoveMemberCommand {
            vault_id,
            user_id: user.id,
            member_id,
        })
        .await?;

    Ok(Json(RemoveMemberResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Invite endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/vaults/:vault_id/invites - All invites, newest first
pub async fn list_invites(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(vault_id): Path<String>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let result = state
        .list_invites_handler()
        .handle(ListInvitesQuery {
            vault_id,
            user_id: user.id,
        })
        .await?;

    Ok(Json(InviteListResponse {
        invites: result.invites.iter().map(InviteResponse::from).collect(),
    }))
}

/// POST /api/vaults/:vault_id/invites - Invite someone by email
pub async fn create_invite(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(vault_id): Path<String>,
    body: Result<Json<CreateInviteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let Json(request) = body.map_err(body_rejection)?;
    let role = request
        .role
        .as_deref()
        .map(str::parse::<VaultRole>)
        .transpose()
        .map_err(|e| VaultApiError(e.into()))?;

    let result = state
        .create_invite_handler()
        .handle(CreateInviteCommand {
            vault_id,
            inviter: user,
            invitee_email: request.invitee_email.unwrap_or_default(),
            role,
            expiry_hours: request.expiry_hours,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInviteResponse {
            invite: InviteResponse::from(&result.invite),
            invite_url: result.invite_url,
        }),
    ))
}

/// POST /api/vaults/:vault_id/invites/:invite_id/resend - Re-send invite email
pub async fn resend_invite(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path((vault_id, invite_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, VaultApiError> {
    let vault_id = parse_vault_id(&vault_id)?;
    let invite_id = parse_invite_id(&invite_id)?;

    let result = state
        .resend_invite_handler()
        .handle(ResendInviteCommand {
            vault_id,
            invite_id,
            actor: user,
        })
        .await?;

    Ok(Json(ResendInviteResponse {
        success: true,
        invite: InviteResponse::from(&result.invite),
    }))
}

/// POST /api/invites/:token/accept - Join the vault behind an invite link
pub async fn accept_invite(
    State(state): State<VaultAppState>,
    RequireAuth(user): RequireAuth,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, VaultApiError> {
    let result = state
        .accept_invite_handler()
        .handle(AcceptInviteCommand { token, user })
        .await?;

    Ok(Json(AcceptInviteResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts `VaultError` into HTTP responses.
#[derive(Debug)]
pub struct VaultApiError(pub VaultError);

impl From<VaultError> for VaultApiError {
    fn from(err: VaultError) -> Self {
        Self(err)
    }
}

impl VaultApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            VaultError::Unauthenticated => StatusCode::UNAUTHORIZED,
            VaultError::Forbidden(_) => StatusCode::FORBIDDEN,
            VaultError::VaultNotFound | VaultError::InviteNotFound | VaultError::MemberNotFound => {
                StatusCode::NOT_FOUND
            }
            VaultError::InvalidTier(_) | VaultError::ValidationFailed { .. } => {
                StatusCode::BAD_REQUEST
            }
            VaultError::SeatGuard(_) => StatusCode::CONFLICT,
            VaultError::Invite(InviteError::ResendTooSoon { .. }) => StatusCode::TOO_MANY_REQUESTS,
            VaultError::Invite(InviteError::EmailNotVerified | InviteError::EmailMismatch { .. }) => {
                StatusCode::FORBIDDEN
            }
            VaultError::Invite(_) => StatusCode::BAD_REQUEST,
            VaultError::Notification(_) | VaultError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for VaultApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = %self.0.code(), "Vault request failed");
        }

        let mut body = ErrorResponse::new(self.0.code().to_string(), self.0.message());
        if let VaultError::SeatGuard(guard) = &self.0 {
            body.current_members = Some(guard.current_members());
            if let SeatGuardError::PlanChangeExceedsSeats { requested_tier, .. } = guard {
                body.requested_tier = Some(*requested_tier);
            }
        }

        (status, Json(body)).into_response()
    }
}

//! Request and response types for the vault API.
//!
//! All bodies are camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::application::{AcceptOutcome, AcceptInviteResult, RemoveMemberResult};
use crate::domain::vault::{
    Invite, PlanEntry, PlanTier, SeatUsage, UnknownPlanTier, Vault, VaultRole,
};

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `PATCH /vaults/:vault_id/plan`.
///
/// The tier is kept as raw JSON so a missing, null or non-string value
/// becomes a 400 with the API's own message rather than a JSON rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePlanRequest {
    #[serde(default)]
    pub tier: Option<serde_json::Value>,
}

impl ChangePlanRequest {
    pub fn parse_tier(&self) -> Result<PlanTier, UnknownPlanTier> {
        match &self.tier {
            Some(serde_json::Value::String(name)) => name.parse(),
            Some(other) => Err(UnknownPlanTier(other.to_string())),
            None => Err(UnknownPlanTier(String::new())),
        }
    }
}

/// Body of `POST /vaults`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVaultRequest {
    pub name: String,
}

/// Body of `POST /vaults/:vault_id/invites`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    #[serde(default)]
    pub invitee_email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub expiry_hours: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// `GET /plans`.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCatalogResponse {
    pub plans: Vec<PlanEntry>,
}

/// Plan and seat summary of one vault.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPlanResponse {
    pub tier: PlanTier,
    pub seats_limit: u32,
    pub members_count: u32,
    pub seats_remaining: u32,
}

impl From<&SeatUsage> for VaultPlanResponse {
    fn from(usage: &SeatUsage) -> Self {
        Self {
            tier: usage.plan_tier,
            seats_limit: usage.seats_limit,
            members_count: usage.members_count,
            seats_remaining: usage.seats_remaining,
        }
    }
}

/// `POST /vaults`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultResponse {
    pub id: String,
    pub name: String,
    pub plan_tier: PlanTier,
    pub seats_limit: u32,
    pub members_count: u32,
    pub created_at: String,
}

impl From<&Vault> for VaultResponse {
    fn from(vault: &Vault) -> Self {
        Self {
            id: vault.id.to_string(),
            name: vault.name.clone(),
            plan_tier: vault.plan_tier,
            seats_limit: vault.seats_limit,
            members_count: vault.members_count,
            created_at: vault.created_at.to_rfc3339(),
        }
    }
}

/// Invite as returned by the API. The token only appears inside `inviteUrl`
/// on creation and is never listed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub id: String,
    pub vault_id: String,
    pub inviter_id: String,
    pub invitee_email: String,
    pub role: VaultRole,
    pub status: String,
    pub expires_at: String,
    pub last_sent_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_at: Option<String>,
    pub created_at: String,
}

impl From<&Invite> for InviteResponse {
    fn from(invite: &Invite) -> Self {
        Self {
            id: invite.id.to_string(),
            vault_id: invite.vault_id.to_string(),
            inviter_id: invite.inviter_id.to_string(),
            invitee_email: invite.invitee_email.clone(),
            role: invite.role,
            status: invite.status.as_str().to_string(),
            expires_at: invite.expires_at.to_rfc3339(),
            last_sent_at: invite.last_sent_at.to_rfc3339(),
            accepted_at: invite.accepted_at.map(|t| t.to_rfc3339()),
            created_at: invite.created_at.to_rfc3339(),
        }
    }
}

/// `POST /vaults/:vault_id/invites`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteResponse {
    pub invite: InviteResponse,
    pub invite_url: String,
}

/// `GET /vaults/:vault_id/invites`.
#[derive(Debug, Clone, Serialize)]
pub struct InviteListResponse {
    pub invites: Vec<InviteResponse>,
}

/// `POST /vaults/:vault_id/invites/:invite_id/resend`.
#[derive(Debug, Clone, Serialize)]
pub struct ResendInviteResponse {
    pub success: bool,
    pub invite: InviteResponse,
}

/// `POST /invites/:token/accept`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInviteResponse {
    pub success: bool,
    pub vault_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_name: Option<String>,
    pub already_member: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members_count: Option<u32>,
}

impl From<AcceptInviteResult> for AcceptInviteResponse {
    fn from(result: AcceptInviteResult) -> Self {
        let (already_member, members_count) = match result.outcome {
            AcceptOutcome::Joined { members_count } => (false, Some(members_count)),
            AcceptOutcome::AlreadyAccepted | AcceptOutcome::AlreadyMember => (true, None),
        };
        Self {
            success: true,
            vault_id: result.vault_id.to_string(),
            vault_name: result.vault_name,
            already_member,
            members_count,
        }
    }
}

/// `DELETE /vaults/:vault_id/members/:user_id`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberResponse {
    pub success: bool,
    pub members_count: u32,
    pub seats_remaining: u32,
}

impl From<RemoveMemberResult> for RemoveMemberResponse {
    fn from(result: RemoveMemberResult) -> Self {
        Self {
            success: true,
            members_count: result.usage.members_count,
            seats_remaining: result.usage.seats_remaining,
        }
    }
}

/// Error body. Seat guard conflicts carry the member count and requested
/// tier alongside the message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_members: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_tier: Option<PlanTier>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            current_members: None,
            requested_tier: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId, VaultId};

    #[test]
    fn plan_response_uses_camel_case() {
        let usage = SeatUsage::compute(15, PlanTier::Small);

        let json = serde_json::to_value(VaultPlanResponse::from(&usage)).unwrap();

        assert_eq!(json["tier"], "Small");
        assert_eq!(json["seatsLimit"], 10);
        assert_eq!(json["membersCount"], 15);
        assert_eq!(json["seatsRemaining"], 0);
    }

    #[test]
    fn create_invite_request_accepts_partial_body() {
        let req: CreateInviteRequest =
            serde_json::from_str(r#"{"inviteeEmail":"guest@example.com"}"#).unwrap();

        assert_eq!(req.invitee_email.as_deref(), Some("guest@example.com"));
        assert_eq!(req.role, None);
        assert_eq!(req.expiry_hours, None);
    }

    #[test]
    fn invite_response_omits_token() {
        let invite = Invite::issue(
            VaultId::new(),
            UserId::new("admin-1").unwrap(),
            "guest@example.com",
            VaultRole::Editor,
            72,
            Timestamp::now(),
        )
        .unwrap();

        let json = serde_json::to_value(InviteResponse::from(&invite)).unwrap();

        assert_eq!(json["role"], "EDITOR");
        assert_eq!(json["status"], "pending");
        assert!(json.get("token").is_none());
        assert!(json.get("acceptedAt").is_none());
    }

    #[test]
    fn error_response_skips_empty_extras() {
        let json = serde_json::to_value(ErrorResponse::new("FORBIDDEN", "nope")).unwrap();

        assert_eq!(json["error"], "nope");
        assert!(json.get("currentMembers").is_none());
        assert!(json.get("requestedTier").is_none());
    }

    #[test]
    fn already_member_accept_has_no_count() {
        let json = serde_json::to_value(AcceptInviteResponse::from(AcceptInviteResult {
            vault_id: VaultId::new(),
            vault_name: None,
            outcome: AcceptOutcome::AlreadyMember,
        }))
        .unwrap();

        assert_eq!(json["alreadyMember"], true);
        assert!(json.get("membersCount").is_none());
    }
}

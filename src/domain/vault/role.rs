//! Vault roles and the permissions attached to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Role a member holds inside a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VaultRole {
    Owner,
    Admin,
    Editor,
    Viewer,
}

/// Something a member may try to do inside a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultAction {
    Create,
    Edit,
    Delete,
    ManageSettings,
    ManageMembers,
    View,
}

impl VaultAction {
    /// Roles allowed to perform this action, highest first.
    pub fn required_roles(&self) -> &'static [VaultRole] {
        use VaultRole::*;
        match self {
            VaultAction::Delete | VaultAction::ManageSettings | VaultAction::ManageMembers => {
                &[Owner, Admin]
            }
            VaultAction::Create | VaultAction::Edit => &[Owner, Admin, Editor],
            VaultAction::View => &[Owner, Admin, Editor, Viewer],
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            VaultAction::Create => "create",
            VaultAction::Edit => "edit",
            VaultAction::Delete => "delete",
            VaultAction::ManageSettings | VaultAction::ManageMembers => "manage",
            VaultAction::View => "view",
        }
    }
}

impl VaultRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultRole::Owner => "OWNER",
            VaultRole::Admin => "ADMIN",
            VaultRole::Editor => "EDITOR",
            VaultRole::Viewer => "VIEWER",
        }
    }

    pub fn permits(&self, action: VaultAction) -> bool {
        action.required_roles().contains(self)
    }

    pub fn can_manage_settings(&self) -> bool {
        self.permits(VaultAction::ManageSettings)
    }

    pub fn can_manage_members(&self) -> bool {
        self.permits(VaultAction::ManageMembers)
    }

    pub fn can_delete_any(&self) -> bool {
        self.permits(VaultAction::Delete)
    }

    pub fn can_create(&self) -> bool {
        self.permits(VaultAction::Create)
    }

    pub fn can_edit(&self) -> bool {
        self.permits(VaultAction::Edit)
    }

    pub fn can_view(&self) -> bool {
        self.permits(VaultAction::View)
    }
}

impl Default for VaultRole {
    fn default() -> Self {
        VaultRole::Viewer
    }
}

impl fmt::Display for VaultRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VaultRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(VaultRole::Owner),
            "ADMIN" => Ok(VaultRole::Admin),
            "EDITOR" => Ok(VaultRole::Editor),
            "VIEWER" => Ok(VaultRole::Viewer),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Message shown when `current_role` may not perform `action` on `resource`.
pub fn permission_denied_message(
    action: VaultAction,
    resource: &str,
    current_role: Option<VaultRole>,
) -> String {
    let required = action
        .required_roles()
        .iter()
        .map(VaultRole::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let current = current_role.map(|r| r.as_str()).unwrap_or("None");

    format!(
        "Permission denied: You need {} role to {} {}. Your current role is: {}. \
         Please contact an Admin or Owner to request the necessary permissions.",
        required,
        action.verb(),
        resource,
        current
    )
}

//! CreateVaultHandler - Command handler for opening a new vault.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::UserId;
use crate::domain::vault::{Vault, VaultError};
use crate::ports::{VaultReader, VaultRepository};

#[derive(Debug, Clone)]
pub struct CreateVaultCommand {
    pub name: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CreateVaultResult {
    pub vault: Vault,
}

/// Creates a vault on the default tier with the caller as its `OWNER`.
pub struct CreateVaultHandler {
    reader: Arc<dyn VaultReader>,
    repository: Arc<dyn VaultRepository>,
}

impl CreateVaultHandler {
    pub fn new(reader: Arc<dyn VaultReader>, repository: Arc<dyn VaultRepository>) -> Self {
        Self { reader, repository }
    }

    pub async fn handle(&self, cmd: CreateVaultCommand) -> Result<CreateVaultResult, VaultError> {
        let vault = Vault::create(cmd.name)?;
        self.repository.create(&vault, &cmd.owner_id).await?;

        // Re-read so members_count reflects the owner's seat.
        let vault = self
            .reader
            .get_vault(&vault.id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;

        info!(
            vault_id = %vault.id,
            tier = %vault.plan_tier,
            owner = %cmd.owner_id,
            "vault created"
        );

        Ok(CreateVaultResult { vault })
    }
}

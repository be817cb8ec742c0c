//! Vault resolution flows: one credential by search key, or every credential
//! in a safe.
//!
//! Both flows hold exactly one session for their lifetime. After a successful
//! logon the flow body runs inside an inner block so that logoff is attempted
//! on every exit path; a logoff failure is logged and never replaces the flow
//! result (the vault's idle timeout is the backstop).

use dynfolder_core::{CredentialDocument, ObjectsDocument, SafeCredential};

use crate::config::VaultConfig;

use super::client::{CyberArkClient, VaultError};

/// Resolve a single credential: find the account whose name starts with
/// `search_key`, fetch its secret, and emit `{Username, Password}` with the
/// secret canonicalized (enclosing quotes stripped).
pub async fn resolve_credential(
    config: &VaultConfig,
    search_key: &str,
) -> Result<CredentialDocument, VaultError> {
    let client = CyberArkClient::new(&config.endpoint);
    let token = client.logon(&config.credentials).await?;

    let outcome = async {
        let account = client.find_account(&token, search_key).await?;
        let secret = client.retrieve_password(&token, &account.id).await?;
        Ok(CredentialDocument::new(
            account.user_name,
            secret.canonical().to_owned(),
        ))
    }
    .await;

    close_session(&client, &token).await;
    outcome
}

/// Resolve every account in a safe: enumerate the safe, fetch each secret in
/// the vault's return order, and emit the sentinel-headed `{Objects: [...]}`
/// document. Secret bodies are forwarded raw, without canonicalization.
///
/// A failure at account K aborts the whole invocation; the K-1 secrets
/// already fetched are discarded, never partially emitted.
pub async fn resolve_safe(
    config: &VaultConfig,
    safe_name: &str,
) -> Result<ObjectsDocument, VaultError> {
    let client = CyberArkClient::new(&config.endpoint);
    let token = client.logon(&config.credentials).await?;

    let outcome = async {
        let accounts = client.list_safe_accounts(&token, safe_name).await?;
        let mut credentials = Vec::with_capacity(accounts.len());
        for account in accounts {
            let secret = client.retrieve_password(&token, &account.id).await?;
            credentials.push(SafeCredential {
                username: account.user_name,
                password: secret.as_str().to_owned(),
            });
        }
        Ok(ObjectsDocument::safe_credentials(credentials))
    }
    .await;

    close_session(&client, &token).await;
    outcome
}

/// Best-effort session teardown. The outcome never affects the invocation.
async fn close_session(client: &CyberArkClient, token: &str) {
    if let Err(err) = client.logoff(token).await {
        tracing::warn!(error = %err, "vault logoff failed; leaving session to idle timeout");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

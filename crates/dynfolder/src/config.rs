//! Explicit per-backend configuration, built from CLI flags (or their env
//! fallbacks) and passed into each resolver entry point. Nothing reads
//! process-wide state after startup.

use std::fmt;

/// Username/password pair used only to open the vault session. Never
/// persisted; never printed.
#[derive(Clone)]
pub struct CredentialPair {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialPair")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Everything the vault flows need: the PVWA base URL and the credential
/// pair that opens the session.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub endpoint: String,
    pub credentials: CredentialPair,
}

/// Everything the device flow needs: the LibreNMS base URL and a read-access
/// API key.
#[derive(Clone)]
pub struct MonitoringConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl fmt::Debug for MonitoringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoringConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

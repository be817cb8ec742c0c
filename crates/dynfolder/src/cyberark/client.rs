//! CyberArk PVWA REST API client.
//!
//! Wraps the four endpoints the resolvers need: LDAP logon/logoff, account
//! search, and password retrieval. The session token is never stored on the
//! client; every call takes it explicitly.

use serde::{Deserialize, Serialize};

use dynfolder_core::SecretValue;

use crate::config::CredentialPair;

/// Reason string attached to every password retrieval for the vault's audit
/// trail.
pub const RETRIEVAL_REASON: &str = "RoyalTS Dynamic Credential";

/// CyberArk API error types. Variants carry the upstream status and body so
/// the operator can see why the vault rejected a call.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("network error communicating with the vault")]
    Transport(#[source] reqwest::Error),

    #[error("vault logon rejected: status {status}: {body}")]
    Authentication { status: u16, body: String },

    #[error("vault account query rejected: status {status}: {body}")]
    Query { status: u16, body: String },

    #[error("no vault account matching '{0}'")]
    NotFound(String),

    #[error("vault password retrieval rejected: status {status}: {body}")]
    Retrieval { status: u16, body: String },

    /// Logoff rejection. Never propagated past the resolve layer; flows log
    /// it and keep their result.
    #[error("vault logoff rejected: status {status}: {body}")]
    Logoff { status: u16, body: String },
}

/// A vault account entry as returned by the accounts endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    pub id: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(default, rename = "secretType")]
    pub secret_type: String,
}

/// Page shape of the accounts endpoints: `{"value": [...]}`.
#[derive(Debug, Deserialize)]
struct AccountPage {
    value: Vec<AccountRecord>,
}

#[derive(Debug, Serialize)]
struct LogonRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RetrieveRequest<'a> {
    reason: &'a str,
    #[serde(rename = "ActionType")]
    action_type: &'a str,
}

/// CyberArk PVWA REST API client.
#[derive(Debug, Clone)]
pub struct CyberArkClient {
    http: reqwest::Client,
    base_url: String,
}

impl CyberArkClient {
    /// Build the user-agent string from the crate version.
    fn user_agent() -> String {
        format!("dynfolder/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Create a new client pointing at the given PVWA base URL.
    pub fn new(base_url: &str) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(Self::user_agent())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Authenticate via LDAP and return the session token.
    ///
    /// The vault returns the token as a JSON-encoded string body. Any
    /// non-success status is fatal to the invocation; there is no retry.
    pub async fn logon(&self, credentials: &CredentialPair) -> Result<String, VaultError> {
        let url = format!("{}/PasswordVault/API/auth/LDAP/Logon", self.base_url);
        let payload = LogonRequest {
            username: &credentials.username,
            password: &credentials.password,
        };

        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(VaultError::Transport)?;

        match resp.status().as_u16() {
            200..=299 => resp.json::<String>().await.map_err(VaultError::Transport),
            status => Err(VaultError::Authentication {
                status,
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Close the session associated with the given token. Best-effort; the
    /// resolve layer ignores the outcome beyond logging it.
    pub async fn logoff(&self, token: &str) -> Result<String, VaultError> {
        let url = format!("{}/PasswordVault/API/Auth/Logoff", self.base_url);

        let resp = self
            .http
            .post(&url)
            .header("Authorization", token)
            .send()
            .await
            .map_err(VaultError::Transport)?;

        match resp.status().as_u16() {
            200..=299 => resp.text().await.map_err(VaultError::Transport),
            status => Err(VaultError::Logoff {
                status,
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Find the account whose name starts with the given search key.
    ///
    /// The query is limited to one result upstream. If duplicates exist the
    /// vault's own ordering decides which record comes back, so the result is
    /// non-deterministic under ambiguous keys. Zero matches is `NotFound`,
    /// checked explicitly rather than indexing into an empty page.
    pub async fn find_account(
        &self,
        token: &str,
        search_key: &str,
    ) -> Result<AccountRecord, VaultError> {
        let url = format!("{}/PasswordVault/API/accounts", self.base_url);

        let resp = self
            .http
            .get(&url)
            .header("Authorization", token)
            .query(&[
                ("searchtype", "startswith"),
                ("search", search_key),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(VaultError::Transport)?;

        let page = match resp.status().as_u16() {
            200..=299 => resp
                .json::<AccountPage>()
                .await
                .map_err(VaultError::Transport)?,
            status => {
                return Err(VaultError::Query {
                    status,
                    body: resp.text().await.unwrap_or_default(),
                });
            }
        };

        page.value
            .into_iter()
            .next()
            .ok_or_else(|| VaultError::NotFound(search_key.to_owned()))
    }

    /// List every account in the named safe, in the vault's return order.
    /// An empty safe yields an empty vec, not an error.
    pub async fn list_safe_accounts(
        &self,
        token: &str,
        safe_name: &str,
    ) -> Result<Vec<AccountRecord>, VaultError> {
        let url = format!("{}/PasswordVault/API/accounts", self.base_url);
        let filter = format!("SafeName eq {safe_name}");

        let resp = self
            .http
            .get(&url)
            .header("Authorization", token)
            .query(&[("filter", filter.as_str())])
            .send()
            .await
            .map_err(VaultError::Transport)?;

        match resp.status().as_u16() {
            200..=299 => resp
                .json::<AccountPage>()
                .await
                .map(|page| page.value)
                .map_err(VaultError::Transport),
            status => Err(VaultError::Query {
                status,
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Retrieve the current password for an account id obtained from one of
    /// the query calls above, tagging the request with [`RETRIEVAL_REASON`].
    ///
    /// The body is returned verbatim; the vault may enclose it in literal
    /// quote characters and canonicalization is the caller's decision.
    pub async fn retrieve_password(
        &self,
        token: &str,
        account_id: &str,
    ) -> Result<SecretValue, VaultError> {
        let url = format!(
            "{}/PasswordVault/API/accounts/{}/Password/Retrieve",
            self.base_url, account_id
        );
        let payload = RetrieveRequest {
            reason: RETRIEVAL_REASON,
            action_type: "show",
        };

        let resp = self
            .http
            .post(&url)
            .header("Authorization", token)
            .json(&payload)
            .send()
            .await
            .map_err(VaultError::Transport)?;

        match resp.status().as_u16() {
            200..=299 => resp
                .text()
                .await
                .map(SecretValue::new)
                .map_err(VaultError::Transport),
            status => Err(VaultError::Retrieval {
                status,
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! LibreNMS REST API client.
//!
//! Only one endpoint is needed: the device inventory, authenticated with an
//! `X-Auth-Token` API key.

use serde::Deserialize;

/// LibreNMS API error types.
#[derive(Debug, thiserror::Error)]
pub enum NmsError {
    #[error("network error communicating with the monitoring platform")]
    Transport(#[source] reqwest::Error),

    #[error("device listing rejected: status {status}: {body}")]
    Query { status: u16, body: String },
}

/// A monitored device as returned by the devices endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub hostname: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub ip: String,
}

/// Page shape of the devices endpoint: `{"devices": [...]}`.
#[derive(Debug, Deserialize)]
struct DevicePage {
    devices: Vec<Device>,
}

/// LibreNMS REST API client.
#[derive(Debug, Clone)]
pub struct LibreNmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl LibreNmsClient {
    fn user_agent() -> String {
        format!("dynfolder/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Create a new client pointing at the given LibreNMS base URL.
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

    /// List every device known to the server, in its return order.
    pub async fn list_devices(&self, api_key: &str) -> Result<Vec<Device>, NmsError> {
        let url = format!("{}/api/v0/devices", self.base_url);

        let resp = self
            .http
            .get(&url)
            .header("X-Auth-Token", api_key)
            .send()
            .await
            .map_err(NmsError::Transport)?;

        match resp.status().as_u16() {
            200..=299 => resp
                .json::<DevicePage>()
                .await
                .map(|page| page.devices)
                .map_err(NmsError::Transport),
            status => Err(NmsError::Query {
                status,
                body: resp.text().await.unwrap_or_default(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Device-listing flow: fetch the inventory, drop excluded platforms, and
//! reshape what remains into SSH connection entries.

use dynfolder_core::{ConnectionTarget, ObjectsDocument};

use crate::config::MonitoringConfig;

use super::client::{Device, LibreNmsClient, NmsError};

/// OS labels containing any of these substrings are dropped from the listing.
/// Matching is case-sensitive and position-independent ("linux-debian" and
/// "panos-7" are both excluded).
const EXCLUDED_OS_SUBSTRINGS: [&str; 2] = ["nux", "pan"];

/// List all monitored devices as SSH connection entries. An empty inventory
/// (or one filtered down to nothing) yields `{"Objects": []}`.
pub async fn resolve_devices(config: &MonitoringConfig) -> Result<ObjectsDocument, NmsError> {
    let client = LibreNmsClient::new(&config.endpoint);
    let devices = client.list_devices(&config.api_key).await?;
    Ok(ObjectsDocument::terminal_connections(connection_targets(
        devices,
    )))
}

/// Apply the OS exclusion filter and project surviving devices to the fields
/// the host tool needs. Input order is preserved.
fn connection_targets(devices: Vec<Device>) -> Vec<ConnectionTarget> {
    devices
        .into_iter()
        .filter(|device| {
            !EXCLUDED_OS_SUBSTRINGS
                .iter()
                .any(|excluded| device.os.contains(excluded))
        })
        .map(|device| ConnectionTarget {
            name: device.hostname,
            ip: device.ip,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn device(hostname: &str, os: &str, ip: &str) -> Device {
        Device {
            hostname: hostname.into(),
            os: os.into(),
            ip: ip.into(),
        }
    }

    #[test]
    fn filter_drops_linux_and_panos_devices() {
        let targets = connection_targets(vec![
            device("deb01", "linux-debian", "10.0.0.1"),
            device("fw01", "panos-7", "10.0.0.2"),
            device("win01", "windows-2019", "10.0.0.3"),
        ]);
        assert_eq!(
            targets,
            vec![ConnectionTarget {
                name: "win01".into(),
                ip: "10.0.0.3".into(),
            }]
        );
    }

    #[test]
    fn filter_matches_substring_anywhere_in_label() {
        let targets = connection_targets(vec![
            device("a", "oraclelinux", "10.0.0.1"),
            device("b", "expanse", "10.0.0.2"),
            device("c", "ios", "10.0.0.3"),
        ]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "c");
    }

    #[test]
    fn filter_is_case_sensitive() {
        // Uppercase labels never match the lowercase filter substrings.
        let targets = connection_targets(vec![
            device("a", "LINUX", "10.0.0.1"),
            device("b", "Linux", "10.0.0.2"),
        ]);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "a");
    }

    #[test]
    fn filter_preserves_input_order() {
        let targets = connection_targets(vec![
            device("z", "windows", "10.0.0.9"),
            device("a", "ios", "10.0.0.1"),
        ]);
        assert_eq!(targets[0].name, "z");
        assert_eq!(targets[1].name, "a");
    }

    #[tokio::test]
    async fn device_flow_end_to_end() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v0/devices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "devices": [
                    {"hostname": "deb01", "os": "linux-debian", "ip": "10.0.0.1"},
                    {"hostname": "fw01", "os": "panos-7", "ip": "10.0.0.2"},
                    {"hostname": "win01", "os": "windows-2019", "ip": "10.0.0.3"},
                ]
            })))
            .mount(&server)
            .await;

        let config = MonitoringConfig {
            endpoint: server.uri(),
            api_key: "key-123".into(),
        };
        let doc = resolve_devices(&config).await.unwrap();
        let value = serde_json::to_value(&doc).unwrap();
        let objects = value["Objects"].as_array().unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0]["Type"], "TerminalConnection");
        assert_eq!(objects[0]["Name"], "win01");
        assert_eq!(objects[0]["ComputerName"], "10.0.0.3");
        assert_eq!(objects[0]["CredentialsFromParent"], true);
    }

    #[tokio::test]
    async fn device_flow_empty_inventory_is_empty_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v0/devices"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"devices": []})),
            )
            .mount(&server)
            .await;

        let config = MonitoringConfig {
            endpoint: server.uri(),
            api_key: "key-123".into(),
        };
        let doc = resolve_devices(&config).await.unwrap();
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"Objects":[]}"#);
    }
}

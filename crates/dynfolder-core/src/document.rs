//! Output documents consumed by the host connection manager.
//!
//! Field names and casing are a fixed external contract: the host tool parses
//! these documents structurally and any rename breaks it. Every shape here is
//! serialize-only; nothing reads these documents back.

use serde::Serialize;

/// Name of the sentinel object that precedes credential entries in a
/// safe-enumeration document.
pub const DYNAMIC_CREDENTIAL_LABEL: &str = "CA local account";

/// Connection type assigned to every device entry.
pub const TERMINAL_CONNECTION_TYPE: &str = "SSH";

/// Single-credential document: `{"Username": ..., "Password": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialDocument {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// One entry of an `Objects` document, discriminated by its `Type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Type")]
pub enum RoyalObject {
    /// Sentinel emitted exactly once at the head of a safe-enumeration
    /// document, before any credential entries.
    DynamicCredential {
        #[serde(rename = "Name")]
        name: String,
    },
    Credential {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Username")]
        username: String,
        #[serde(rename = "Password")]
        password: String,
    },
    TerminalConnection {
        #[serde(rename = "TerminalConnectionType")]
        terminal_connection_type: String,
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "ComputerName")]
        computer_name: String,
        #[serde(rename = "CredentialsFromParent")]
        credentials_from_parent: bool,
    },
}

/// Collection document: `{"Objects": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ObjectsDocument {
    #[serde(rename = "Objects")]
    pub objects: Vec<RoyalObject>,
}

/// A resolved safe entry: the account's username plus its secret body as the
/// vault returned it (no quote canonicalization in the bulk flow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeCredential {
    pub username: String,
    pub password: String,
}

/// A device that survived filtering, projected to what the host needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub name: String,
    pub ip: String,
}

impl CredentialDocument {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl ObjectsDocument {
    /// Safe-enumeration document: the sentinel first, then one `Credential`
    /// entry per resolved account, in the order given.
    pub fn safe_credentials(credentials: Vec<SafeCredential>) -> Self {
        let mut objects = Vec::with_capacity(credentials.len() + 1);
        objects.push(RoyalObject::DynamicCredential {
            name: DYNAMIC_CREDENTIAL_LABEL.to_owned(),
        });
        for credential in credentials {
            objects.push(RoyalObject::Credential {
                name: credential.username.clone(),
                username: credential.username,
                password: credential.password,
            });
        }
        Self { objects }
    }

    /// Device-listing document: one SSH `TerminalConnection` per target, with
    /// `ComputerName` set to the device's static IP. No sentinel; an empty
    /// target list yields `{"Objects": []}`.
    pub fn terminal_connections(targets: Vec<ConnectionTarget>) -> Self {
        let objects = targets
            .into_iter()
            .map(|target| RoyalObject::TerminalConnection {
                terminal_connection_type: TERMINAL_CONNECTION_TYPE.to_owned(),
                name: target.name,
                computer_name: target.ip,
                credentials_from_parent: true,
            })
            .collect();
        Self { objects }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn credential_document_field_names() {
        let doc = CredentialDocument::new("svc_web01".into(), "s3cr3t".into());
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"Username": "svc_web01", "Password": "s3cr3t"})
        );
    }

    #[test]
    fn safe_document_sentinel_comes_first() {
        let doc = ObjectsDocument::safe_credentials(vec![
            SafeCredential {
                username: "alice".into(),
                password: "p1".into(),
            },
            SafeCredential {
                username: "bob".into(),
                password: "p2".into(),
            },
        ]);
        assert_eq!(doc.objects.len(), 3);
        assert_eq!(
            doc.objects[0],
            RoyalObject::DynamicCredential {
                name: DYNAMIC_CREDENTIAL_LABEL.to_owned(),
            }
        );
    }

    #[test]
    fn safe_document_preserves_entry_order() {
        let doc = ObjectsDocument::safe_credentials(vec![
            SafeCredential {
                username: "alice".into(),
                password: "p1".into(),
            },
            SafeCredential {
                username: "bob".into(),
                password: "p2".into(),
            },
        ]);
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["Objects"][1]["Name"], "alice");
        assert_eq!(value["Objects"][2]["Name"], "bob");
    }

    #[test]
    fn empty_safe_document_is_sentinel_only() {
        let doc = ObjectsDocument::safe_credentials(vec![]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"Objects": [{"Type": "DynamicCredential", "Name": "CA local account"}]})
        );
    }

    #[test]
    fn credential_entry_shape() {
        let doc = ObjectsDocument::safe_credentials(vec![SafeCredential {
            username: "alice".into(),
            password: "\"raw\"".into(),
        }]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap()["Objects"][1],
            json!({
                "Type": "Credential",
                "Name": "alice",
                "Username": "alice",
                "Password": "\"raw\"",
            })
        );
    }

    #[test]
    fn terminal_connection_shape() {
        let doc = ObjectsDocument::terminal_connections(vec![ConnectionTarget {
            name: "web01".into(),
            ip: "10.0.0.5".into(),
        }]);
        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({"Objects": [{
                "Type": "TerminalConnection",
                "TerminalConnectionType": "SSH",
                "Name": "web01",
                "ComputerName": "10.0.0.5",
                "CredentialsFromParent": true,
            }]})
        );
    }

    #[test]
    fn empty_device_document_serializes_to_empty_objects() {
        let doc = ObjectsDocument::terminal_connections(vec![]);
        assert_eq!(serde_json::to_string(&doc).unwrap(), r#"{"Objects":[]}"#);
    }
}

//! Shared contract types for the dynfolder resolvers.
//!
//! Everything the host tool observes lives here: the JSON output documents
//! (`document`) and the secret-value wrapper with its canonicalization rules
//! (`secret`). Backend HTTP clients live in the `dynfolder` binary crate.

pub mod document;
pub mod secret;

pub use document::{ConnectionTarget, CredentialDocument, ObjectsDocument, RoyalObject, SafeCredential};
pub use secret::SecretValue;

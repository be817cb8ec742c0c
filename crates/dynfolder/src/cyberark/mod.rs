//! CyberArk PVWA backend: session management, account search, and password
//! retrieval.

pub mod client;
pub mod resolve;

pub use client::{AccountRecord, CyberArkClient, VaultError};
pub use resolve::{resolve_credential, resolve_safe};

//! LibreNMS backend: device listing reshaped into SSH connection entries.

pub mod client;
pub mod resolve;

pub use client::{Device, LibreNmsClient, NmsError};
pub use resolve::resolve_devices;

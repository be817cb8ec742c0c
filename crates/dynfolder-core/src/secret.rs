//! Secret value wrapper with automatic zeroing on drop.
//!
//! `SecretValue` holds the raw secret body exactly as the vault returned it,
//! backed by a `Zeroizing<String>` cleared on drop. Debug and Display always
//! show `[REDACTED]`.

use std::fmt;

use zeroize::Zeroizing;

/// A secret value that is zeroed from memory on drop.
///
/// The vault's wire format may enclose the secret in literal quote
/// characters (`"MyPassword"`). [`SecretValue::as_str`] returns the body
/// untouched; [`SecretValue::canonical`] strips one enclosing quote per side.
/// Which accessor applies depends on the flow: the single-credential flow
/// canonicalizes, the safe-enumeration flow forwards the raw body. Both
/// shapes are relied on downstream, so neither is folded into the other.
pub struct SecretValue(Zeroizing<String>);

impl SecretValue {
    /// Wrap a raw response body, consuming the String.
    pub fn new(raw: String) -> Self {
        Self(Zeroizing::new(raw))
    }

    /// The secret exactly as received from the vault.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The secret with at most one leading and one trailing quote removed.
    pub fn canonical(&self) -> &str {
        let s = self.0.as_str();
        let s = s.strip_prefix('"').unwrap_or(s);
        s.strip_suffix('"').unwrap_or(s)
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

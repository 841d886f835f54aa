//! Where the store gets its encryption secret from.
//!
//! The store asks its `SecretSource` on every operation instead of caching a
//! key, so pointing `JSON_ENCRYPTION_KEY` at a new value takes effect on the
//! next read or write without a restart.

use tracing::warn;
use zeroize::Zeroizing;

use crate::error::{AacError, Result};

/// Supplies the secret that document keys are derived from.
pub trait SecretSource: Send + Sync {
    /// Current secret. Called once per store operation.
    fn secret(&self) -> Result<Zeroizing<String>>;
}

/// A secret fixed at construction time.
pub struct StaticSecret {
    secret: Zeroizing<String>,
}

impl StaticSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl SecretSource for StaticSecret {
    fn secret(&self) -> Result<Zeroizing<String>> {
        Ok(self.secret.clone())
    }
}

impl std::fmt::Debug for StaticSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// A secret read from an environment variable on every call.
///
/// Unset and empty values are treated alike. Without a fallback that is a
/// `MissingSecret` error; with one, the fallback is used and a warning is
/// logged.
pub struct EnvSecret {
    var: String,
    fallback: Option<Zeroizing<String>>,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(var: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            fallback: Some(Zeroizing::new(fallback.into())),
        }
    }

    /// Name of the variable consulted.
    pub fn var(&self) -> &str {
        &self.var
    }
}

impl SecretSource for EnvSecret {
    fn secret(&self) -> Result<Zeroizing<String>> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => Ok(Zeroizing::new(value)),
            _ => match &self.fallback {
                Some(fallback) => {
                    warn!(
                        var = %self.var,
                        "encryption secret not set, using built-in development secret"
                    );
                    Ok(fallback.clone())
                }
                None => Err(AacError::MissingSecret(self.var.clone())),
            },
        }
    }
}

impl std::fmt::Debug for EnvSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSecret")
            .field("var", &self.var)
            .field("has_fallback", &self.fallback.is_some())
            .finish()
    }
}

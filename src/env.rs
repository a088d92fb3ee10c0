//! Passphrase source.
//!
//! Reads [`ENCRYPTION_KEY_VAR`]; when it is unset or empty the fixed
//! [`DEFAULT_PASSPHRASE`] is used and a warning is logged.

use crate::aliases::PasswordString;
use crate::consts::{DEFAULT_PASSPHRASE, ENCRYPTION_KEY_VAR};

/// Passphrase from the process environment.
pub fn passphrase_from_env() -> PasswordString {
    resolve_passphrase(std::env::var(ENCRYPTION_KEY_VAR).ok())
}

/// Apply the fallback policy to an optional raw value.
pub fn resolve_passphrase(raw: Option<String>) -> PasswordString {
    match raw {
        Some(value) if !value.is_empty() => PasswordString::new(value),
        _ => {
            log::warn!(
                "{ENCRYPTION_KEY_VAR} is not set; using the built-in default passphrase. \
                 Files encrypted this way are readable by anyone with this binary."
            );
            PasswordString::new(DEFAULT_PASSPHRASE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_value_wins() {
        let pass = resolve_passphrase(Some("s3cret".to_string()));
        assert_eq!(pass.expose_secret().as_str(), "s3cret");
    }

    #[test]
    fn missing_or_empty_falls_back() {
        assert_eq!(
            resolve_passphrase(None).expose_secret().as_str(),
            DEFAULT_PASSPHRASE
        );
        assert_eq!(
            resolve_passphrase(Some(String::new())).expose_secret().as_str(),
            DEFAULT_PASSPHRASE
        );
    }
}

//! Secure credential handling using the secrecy crate
//!
//! The PostgreSQL connection string usually embeds a password, so it is held
//! in a [`SecretString`]: zeroed on drop, redacted in `Debug` output, and only
//! readable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use derrick::config::{redact_connection_string, secret_string};
//! use secrecy::ExposeSecret;
//!
//! let conn = secret_string("postgresql://etl:hunter2@db:5432/wells".to_string());
//! assert_eq!(conn.expose_secret().as_ref(), "postgresql://etl:hunter2@db:5432/wells");
//! assert_eq!(redact_connection_string(&conn), "postgresql://***@db:5432/wells");
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::Zeroize;

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Parse the secret value into another type
    pub fn parse<F: std::str::FromStr>(&self) -> Result<F, F::Err> {
        self.0.parse()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Wraps a String in a [`SecretString`]
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Renders a connection string with its credentials replaced by `***`
///
/// Everything before the last `@` is dropped; strings without credentials
/// keep only their scheme.
pub fn redact_connection_string(conn: &SecretString) -> String {
    let raw = conn.expose_secret().as_ref();
    let scheme = raw.split("://").next().filter(|s| *s != raw);

    match (scheme, raw.rsplit_once('@')) {
        (Some(scheme), Some((_, host))) => format!("{scheme}://***@{host}"),
        (Some(scheme), None) => format!("{scheme}://***"),
        (None, _) => "***".to_string(),
    }
}

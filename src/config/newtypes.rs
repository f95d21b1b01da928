//! Validated newtype wrappers for configuration values.
//!
//! Each wrapper validates its contents on construction, so a value that
//! exists is known to be usable.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated request authority: a host name with an optional port.
///
/// The scheme is not part of the authority; it is chosen by the
/// [`Protocol`](crate::command::Protocol) that owns it.
///
/// # Example
///
/// ```rust
/// use rest_command::Authority;
///
/// let authority = Authority::new("atompark.com").unwrap();
/// assert_eq!(authority.as_ref(), "atompark.com");
///
/// let local = Authority::new("localhost:8080").unwrap();
/// assert_eq!(local.host_name(), "localhost");
///
/// assert!(Authority::new("https://atompark.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Authority(String);

impl Authority {
    /// Creates a new validated authority.
    ///
    /// Surrounding whitespace is trimmed and the host is lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAuthority`] if nothing remains after
    /// trimming, or [`ConfigError::InvalidAuthority`] if the value carries a
    /// scheme, a path, a query or inner whitespace.
    pub fn new(authority: impl Into<String>) -> Result<Self, ConfigError> {
        let authority = authority.into();
        let authority = authority.trim().to_lowercase();

        if authority.is_empty() {
            return Err(ConfigError::EmptyAuthority);
        }

        let has_forbidden = authority
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'));
        if has_forbidden || authority.starts_with(':') || authority.ends_with(':') {
            return Err(ConfigError::InvalidAuthority { authority });
        }

        if let Some((_, port)) = authority.rsplit_once(':') {
            if port.parse::<u16>().is_err() {
                return Err(ConfigError::InvalidAuthority { authority });
            }
        }

        Ok(Self(authority))
    }

    /// Returns the host portion, without any port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        self.0.rsplit_once(':').map_or(self.0.as_str(), |(host, _)| host)
    }
}

impl AsRef<str> for Authority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Authority {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Authority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API key or access token.
///
/// The `Debug` implementation masks the value, displaying only
/// `ApiKey(*****)`.
///
/// # Example
///
/// ```rust
/// use rest_command::ApiKey;
///
/// let key = ApiKey::new("public-key").unwrap();
/// assert_eq!(key.as_ref(), "public-key");
/// assert_eq!(format!("{:?}", key), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty or blank.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated private key used to sign requests.
///
/// The key never leaves the process: it is mixed into the request
/// signature but is not itself sent.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `PrivateKey(*****)`.
///
/// # Example
///
/// ```rust
/// use rest_command::PrivateKey;
///
/// let key = PrivateKey::new("my-private-key").unwrap();
/// assert_eq!(format!("{:?}", key), "PrivateKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Creates a new validated private key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrivateKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyPrivateKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for PrivateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(*****)")
    }
}

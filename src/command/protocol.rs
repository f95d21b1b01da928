//! Transport security and request signing.

use std::fmt;

use crate::command::parameters::ParameterSet;
use crate::command::signature;
use crate::config::{Authority, PrivateKey};

/// URL scheme a protocol uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Plain `http`.
    Http,
    /// TLS `https`.
    Https,
}

impl Scheme {
    /// Returns the scheme as it appears in a URL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How commands reach an API and whether they are signed.
///
/// A protocol is chosen once per provider and shared by every command the
/// provider builds. The signed variants are the only ones that carry a
/// private key.
///
/// # Example
///
/// ```rust
/// use rest_command::command::{ParameterSet, Protocol};
/// use rest_command::{Authority, PrivateKey};
///
/// let plain = Protocol::https(Authority::new("www.googleapis.com").unwrap());
/// assert_eq!(plain.base_url(), "https://www.googleapis.com");
///
/// let signed = Protocol::atompark_http(
///     Authority::new("atompark.com").unwrap(),
///     PrivateKey::new("private").unwrap(),
/// );
/// let params = ParameterSet::new().set("action", "getUserBalance");
/// assert!(signed.prepare(&params).contains("sum"));
/// assert!(!params.contains("sum"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// Unsigned requests over `http`.
    Http(Authority),
    /// Unsigned requests over `https`.
    Https(Authority),
    /// AtomPark-signed requests over `http`.
    AtomParkHttp {
        /// Target host.
        authority: Authority,
        /// Key mixed into every signature.
        private_key: PrivateKey,
    },
    /// AtomPark-signed requests over `https`.
    AtomParkHttps {
        /// Target host.
        authority: Authority,
        /// Key mixed into every signature.
        private_key: PrivateKey,
    },
}

impl Protocol {
    /// Unsigned `http` protocol.
    #[must_use]
    pub const fn http(authority: Authority) -> Self {
        Self::Http(authority)
    }

    /// Unsigned `https` protocol.
    #[must_use]
    pub const fn https(authority: Authority) -> Self {
        Self::Https(authority)
    }

    /// AtomPark-signed `http` protocol.
    #[must_use]
    pub const fn atompark_http(authority: Authority, private_key: PrivateKey) -> Self {
        Self::AtomParkHttp {
            authority,
            private_key,
        }
    }

    /// AtomPark-signed `https` protocol.
    #[must_use]
    pub const fn atompark_https(authority: Authority, private_key: PrivateKey) -> Self {
        Self::AtomParkHttps {
            authority,
            private_key,
        }
    }

    /// Returns the target authority.
    #[must_use]
    pub const fn authority(&self) -> &Authority {
        match self {
            Self::Http(authority)
            | Self::Https(authority)
            | Self::AtomParkHttp { authority, .. }
            | Self::AtomParkHttps { authority, .. } => authority,
        }
    }

    /// Returns the URL scheme.
    #[must_use]
    pub const fn scheme(&self) -> Scheme {
        match self {
            Self::Http(_) | Self::AtomParkHttp { .. } => Scheme::Http,
            Self::Https(_) | Self::AtomParkHttps { .. } => Scheme::Https,
        }
    }

    /// Returns `true` for the variants that sign requests.
    #[must_use]
    pub const fn is_signed(&self) -> bool {
        self.private_key().is_some()
    }

    const fn private_key(&self) -> Option<&PrivateKey> {
        match self {
            Self::Http(_) | Self::Https(_) => None,
            Self::AtomParkHttp { private_key, .. } | Self::AtomParkHttps { private_key, .. } => {
                Some(private_key)
            }
        }
    }

    /// Returns `scheme://authority`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme(), self.authority())
    }

    /// Returns the parameters to send, adding a signature when required.
    ///
    /// `params` itself is never modified.
    #[must_use]
    pub fn prepare(&self, params: &ParameterSet) -> ParameterSet {
        self.private_key().map_or_else(
            || params.clone(),
            |private_key| signature::sign(params, private_key),
        )
    }
}

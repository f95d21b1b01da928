//! AtomPark request signatures.
//!
//! Signed AtomPark requests carry a `sum` parameter derived from every other
//! parameter and the account's private key:
//!
//! 1. drop any existing `sum`;
//! 2. sort the remaining parameters by name (byte order);
//! 3. concatenate their values, in that order, with no separator;
//! 4. append the private key;
//! 5. MD5 the result and render it as lowercase hex.
//!
//! The same steps let an independent client (or a test) recompute and check
//! a signature, see [`verify_signature`].
//!
//! # Example
//!
//! ```rust
//! use rest_command::command::ParameterSet;
//! use rest_command::command::signature::{compute_signature, verify_signature, SIGNATURE_PARAMETER};
//! use rest_command::PrivateKey;
//!
//! let key = PrivateKey::new("c").unwrap();
//! let params = ParameterSet::new().set("b", "b").set("a", "a");
//!
//! // "a" + "b" + "c"
//! let sum = compute_signature(&params, &key);
//! assert_eq!(sum, "900150983cd24fb0d6963f7d28e17f72");
//!
//! let signed = params.set(SIGNATURE_PARAMETER, sum);
//! assert!(verify_signature(&signed, &key));
//! ```

use md5::{Digest, Md5};
use subtle::ConstantTimeEq;

use crate::command::parameters::ParameterSet;
use crate::config::PrivateKey;

/// Name of the parameter that carries the signature.
pub const SIGNATURE_PARAMETER: &str = "sum";

/// Builds the string that gets hashed, without the private key.
#[must_use]
pub fn canonical_string(params: &ParameterSet) -> String {
    let unsigned = params.clone().without(SIGNATURE_PARAMETER);
    let mut entries: Vec<(&str, String)> = unsigned
        .iter()
        .map(|(name, value)| (name, value.to_string()))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    entries.into_iter().map(|(_, value)| value).collect()
}

/// Computes the signature for a parameter set.
///
/// Deterministic for a given parameter set and key; insertion order does
/// not matter.
#[must_use]
pub fn compute_signature(params: &ParameterSet, key: &PrivateKey) -> String {
    let mut hasher = Md5::new();
    hasher.update(canonical_string(params).as_bytes());
    let key: &str = key.as_ref();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns a copy of `params` with the signature parameter set.
///
/// The input is left untouched. A stale `sum` in the input is ignored when
/// signing and replaced in the output.
#[must_use]
pub fn sign(params: &ParameterSet, key: &PrivateKey) -> ParameterSet {
    let signature = compute_signature(params, key);
    tracing::debug!("Attached {} signature parameter", SIGNATURE_PARAMETER);
    params.clone().set(SIGNATURE_PARAMETER, signature)
}

/// Checks the signature carried by a signed parameter set.
///
/// Returns `false` if there is no signature parameter.
#[must_use]
pub fn verify_signature(params: &ParameterSet, key: &PrivateKey) -> bool {
    params.get(SIGNATURE_PARAMETER).is_some_and(|received| {
        let computed = compute_signature(params, key);
        constant_time_compare(&computed, &received.to_string())
    })
}

/// Performs constant-time comparison of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

// Internal hex encoding since we don't want to add another dependency
mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}

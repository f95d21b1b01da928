//! Ordered request parameters with guarded insertion.

use std::fmt;

/// A single parameter value.
///
/// Composite values such as comma-joined ids or embedded JSON documents are
/// carried as [`ParamValue::Text`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamValue {
    /// A string value, sent as-is.
    Text(String),
    /// An integer value, sent in decimal.
    Integer(i64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// An ordered mapping from parameter name to value.
///
/// Every method consumes the set and returns it, so a set can be built in a
/// single expression and an existing set (or a [`Command`] holding one) can
/// be cloned and specialised without affecting the original.
///
/// Names are unique. Setting a name that is already present overwrites the
/// value but keeps the original position.
///
/// [`Command`]: crate::command::Command
///
/// # Example
///
/// ```rust
/// use rest_command::command::ParameterSet;
///
/// let params = ParameterSet::new()
///     .set("action", "getPhones")
///     .set_if_present("phone", Some("  "))
///     .set_if_positive("idAddressBook", 0)
///     .set_if(true, "currency", "USD");
///
/// assert_eq!(params.len(), 2);
/// assert!(!params.contains("phone"));
/// assert!(!params.contains("idAddressBook"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or overwrites a parameter.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    /// Inserts a parameter only when `value` is `Some` and not blank.
    ///
    /// The value is stored untrimmed; trimming only decides blankness.
    #[must_use]
    pub fn set_if_present(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(text) if !text.trim().is_empty() => self.set(name, text),
            _ => self,
        }
    }

    /// Inserts a parameter only when `value` is strictly greater than zero.
    ///
    /// Used for numeric filters where `0` means "no filter".
    #[must_use]
    pub fn set_if_positive(self, name: impl Into<String>, value: i64) -> Self {
        if value > 0 {
            self.set(name, value)
        } else {
            self
        }
    }

    /// Inserts a parameter only when `condition` holds.
    #[must_use]
    pub fn set_if(
        self,
        condition: bool,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Self {
        if condition {
            self.set(name, value)
        } else {
            self
        }
    }

    /// Removes a parameter if present.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(key, _)| key != name);
        self
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the parameter is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the parameters as string pairs, in insertion order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }

    /// Encodes the parameters as `application/x-www-form-urlencoded`.
    ///
    /// ```rust
    /// use rest_command::command::ParameterSet;
    ///
    /// let params = ParameterSet::new().set("q", "rust lang").set("num", 10);
    /// assert_eq!(params.to_query_string(), "q=rust%20lang&num=10");
    /// ```
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn insert(&mut self, name: String, value: ParamValue) {
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }
}

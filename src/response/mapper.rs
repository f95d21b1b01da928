//! Typed mapping of response payloads.
//!
//! Transforming and decoding are two explicit steps: a transformer turns
//! the raw JSON into the shape a type expects, then `serde` decodes it.
//! [`map_to`] chains the two so a mismatch is always a
//! [`CommandError::Deserialization`] and an error envelope is always a
//! [`CommandError::Api`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::command::CommandError;
use crate::response::errors::ResultError;

/// Runs `transform` on `raw`, then decodes the outcome into `T`.
///
/// # Errors
///
/// Returns [`CommandError::Api`] if the transformer raises and
/// [`CommandError::Deserialization`] if the transformed JSON does not
/// match `T`.
///
/// # Example
///
/// ```rust
/// use rest_command::response::{check_for_error, map_to, Envelope, SuccessResult};
/// use serde_json::json;
///
/// let raw = json!({"result": {"successful": true}});
/// let mapped: Envelope<SuccessResult> = map_to(raw, check_for_error).unwrap();
/// assert!(mapped.into_inner().successful);
/// ```
pub fn map_to<T, F>(raw: Value, transform: F) -> Result<T, CommandError>
where
    T: DeserializeOwned,
    F: FnOnce(Value) -> Result<Value, ResultError>,
{
    let transformed = transform(raw)?;
    Ok(serde_json::from_value(transformed)?)
}

/// Like [`map_to`], but decodes the `result` member and unwraps it.
///
/// # Errors
///
/// Same as [`map_to`]; a payload without `result` is a deserialization
/// error.
pub fn map_result<T, F>(raw: Value, transform: F) -> Result<T, CommandError>
where
    T: DeserializeOwned,
    F: FnOnce(Value) -> Result<Value, ResultError>,
{
    map_to::<Envelope<T>, F>(raw, transform).map(Envelope::into_inner)
}

/// The `{"result": ...}` wrapper most payloads arrive in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The wrapped payload.
    pub result: T,
}

impl<T> Envelope<T> {
    /// Unwraps the payload.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.result
    }
}

/// `{"successful": bool}`, returned by calls that only report success.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResult {
    pub successful: bool,
}

/// `{"id": ...}`, returned by calls that create something.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdResult {
    pub id: i64,
}

/// A list reshaped by
/// [`remake_json_for_list`](crate::response::remake_json_for_list).
///
/// Missing `items` decode as an empty list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{check_for_error, convert_arrayed_result, remake_json_for_list};
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
        name: String,
    }

    #[test]
    fn test_map_to_success_result() {
        let raw = json!({"result": {"successful": true}});
        let mapped: Envelope<SuccessResult> = map_to(raw, check_for_error).unwrap();
        assert!(mapped.into_inner().successful);
    }

    #[test]
    fn test_map_result_unwraps_envelope() {
        let raw = json!({"result": {"successful": false}});
        let mapped: SuccessResult = map_result(raw, check_for_error).unwrap();
        assert!(!mapped.successful);
    }

    #[test]
    fn test_map_to_reports_api_error() {
        let raw = json!({"error": {"message": "bad key", "code": 403}});
        let error = map_result::<SuccessResult, _>(raw, check_for_error).unwrap_err();

        match error {
            CommandError::Api(e) => {
                assert_eq!(e.message, "bad key");
                assert_eq!(e.code, 403);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_to_reports_shape_mismatch() {
        let raw = json!({"result": {"successful": "yes"}});
        let error = map_result::<SuccessResult, _>(raw, check_for_error).unwrap_err();
        assert!(matches!(error, CommandError::Deserialization(_)));

        let error = map_result::<SuccessResult, _>(json!({}), check_for_error).unwrap_err();
        assert!(matches!(error, CommandError::Deserialization(_)));
    }

    #[test]
    fn test_id_result() {
        let created: IdResult = map_result(json!({"result": {"id": 42}}), check_for_error).unwrap();
        assert_eq!(created.id, 42);
    }

    #[test]
    fn test_row_list_after_remake() {
        let raw = json!({"result": {"fields": ["id", "name"], "data": [[1, "a"], [2, "b"]]}});
        let list: RowList<Row> = map_result(raw, remake_json_for_list).unwrap();

        assert_eq!(
            list.items,
            vec![
                Row { id: 1, name: "a".to_string() },
                Row { id: 2, name: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_row_list_defaults_to_empty() {
        let list: RowList<Row> = map_result(json!({"result": {}}), remake_json_for_list).unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_vec_after_convert_arrayed_result() {
        let raw = json!({"result": {"fields": ["id", "name"], "data": [[7, "x"]]}});
        let rows: Vec<Row> = map_result(raw, convert_arrayed_result).unwrap();
        assert_eq!(rows, vec![Row { id: 7, name: "x".to_string() }]);
    }
}

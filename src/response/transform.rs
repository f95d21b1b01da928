//! Response transformers.
//!
//! A transformer is a pure `Value -> Result<Value, ResultError>` function
//! run on the raw JSON before it is deserialized. Every transformer here
//! starts with [`check_for_error`], so an API error envelope is always
//! reported before any reshaping happens.
//!
//! Error envelopes are looked for at the top level and directly under
//! `result`; nothing deeper is inspected.

use serde_json::{Map, Value};

use crate::response::errors::ResultError;

/// Raises the API error embedded in `raw`, or returns `raw` unchanged.
///
/// An object is treated as an error envelope when it has an `error` member.
/// Two envelope shapes are understood:
///
/// - `{"error": {"message": "...", "code": 403}}`
/// - `{"error": "...", "code": 12}`
///
/// The envelope may sit at the top level or inside `result`. A missing or
/// non-numeric code is reported as `0`; a non-string message is rendered as
/// JSON text (`null` renders as an empty message).
///
/// # Errors
///
/// Returns [`ResultError`] carrying the message, the code and the whole of
/// `raw` when an envelope is found.
///
/// # Example
///
/// ```rust
/// use rest_command::response::check_for_error;
/// use serde_json::json;
///
/// let ok = json!({"result": {"ok": true}});
/// assert_eq!(check_for_error(ok.clone()).unwrap(), ok);
///
/// let error = check_for_error(json!({"error": {"message": "bad key", "code": 403}})).unwrap_err();
/// assert_eq!(error.message, "bad key");
/// assert_eq!(error.code, 403);
/// ```
pub fn check_for_error(raw: Value) -> Result<Value, ResultError> {
    let found = raw.as_object().and_then(|root| {
        envelope_error(root).or_else(|| {
            root.get("result")
                .and_then(Value::as_object)
                .and_then(envelope_error)
        })
    });

    match found {
        Some((message, code)) => {
            tracing::debug!("API reported error {}: {}", code, message);
            Err(ResultError { message, code, raw })
        }
        None => Ok(raw),
    }
}

/// Rebuilds columnar rows as objects.
///
/// Row `k` becomes an object with `fields[i] => data[k][i]`. Rows shorter
/// than `fields` simply lack the trailing names, extra cells are dropped,
/// non-string field names are skipped and non-array rows become empty
/// objects.
///
/// ```rust
/// use rest_command::response::reshape_list;
/// use serde_json::json;
///
/// let items = reshape_list(
///     &[json!("id"), json!("name")],
///     &[json!([1, "a"]), json!([2, "b"])],
/// );
/// assert_eq!(items, vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "b"})]);
/// ```
#[must_use]
pub fn reshape_list(fields: &[Value], data: &[Value]) -> Vec<Value> {
    data.iter()
        .map(|row| {
            let mut object = Map::new();
            if let Some(cells) = row.as_array() {
                for (field, cell) in fields.iter().zip(cells) {
                    if let Some(name) = field.as_str() {
                        object.insert(name.to_string(), cell.clone());
                    }
                }
            }
            Value::Object(object)
        })
        .collect()
}

/// Checks for an error, then adds `result.items` built from
/// `result.fields` and `result.data`.
///
/// The original `fields` and `data` members are kept. When `result` is not
/// an object, or either array is missing, the payload passes through
/// unchanged.
///
/// # Errors
///
/// Returns [`ResultError`] if the payload is an error envelope.
pub fn remake_json_for_list(raw: Value) -> Result<Value, ResultError> {
    let mut raw = check_for_error(raw)?;

    if let Some(result) = raw.get_mut("result").and_then(Value::as_object_mut) {
        if let Some(items) = tabular_items(result) {
            result.insert("items".to_string(), Value::Array(items));
        }
    }

    Ok(raw)
}

/// Checks for an error, then turns a columnar `result` into a row array.
///
/// Unlike [`remake_json_for_list`], the `result` member is replaced by the
/// rows themselves, so the payload can be read as `{"result": [...]}`. A
/// `result` that already is an array passes through unchanged.
///
/// # Errors
///
/// Returns [`ResultError`] if the payload is an error envelope.
pub fn convert_arrayed_result(raw: Value) -> Result<Value, ResultError> {
    let mut raw = check_for_error(raw)?;

    if let Some(result) = raw.get_mut("result") {
        if let Some(items) = result.as_object().and_then(tabular_items) {
            *result = Value::Array(items);
        }
    }

    Ok(raw)
}

/// Rows from a `{"fields": [...], "data": [...]}` object, if it is one.
fn tabular_items(container: &Map<String, Value>) -> Option<Vec<Value>> {
    let fields = container.get("fields")?.as_array()?;
    let data = container.get("data")?.as_array()?;
    Some(reshape_list(fields, data))
}

fn envelope_error(container: &Map<String, Value>) -> Option<(String, i64)> {
    let error = container.get("error")?;

    Some(match error {
        Value::Object(details) => (
            details
                .get("message")
                .map_or_else(|| error.to_string(), message_text),
            details.get("code").and_then(code_number).unwrap_or(0),
        ),
        other => (
            message_text(other),
            container.get("code").and_then(code_number).unwrap_or(0),
        ),
    })
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn code_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|code| code.fract() == 0.0 && code.abs() <= 9.0e15)
                .map(|code| code as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

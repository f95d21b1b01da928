//! Integration tests for response transformers through the public API.

use rest_command::response::{
    check_for_error, convert_arrayed_result, map_result, remake_json_for_list, reshape_list,
    Envelope, RowList, SuccessResult,
};
use rest_command::CommandError;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Item {
    id: i64,
    name: String,
}

#[test]
fn test_reshape_two_rows() {
    let items = reshape_list(
        &[json!("id"), json!("name")],
        &[json!([1, "a"]), json!([2, "b"])],
    );
    assert_eq!(
        items,
        vec![json!({"id": 1, "name": "a"}), json!({"id": 2, "name": "b"})]
    );
}

#[test]
fn test_missing_fields_leaves_payload_unchanged() {
    let raw = json!({"result": {"data": [[1, "a"]]}});
    assert_eq!(remake_json_for_list(raw.clone()).unwrap(), raw);
    assert_eq!(convert_arrayed_result(raw.clone()).unwrap(), raw);
}

#[test]
fn test_check_for_error_raises_envelope_and_passes_results() {
    let error = check_for_error(json!({"error": {"message": "bad key", "code": 403}})).unwrap_err();
    assert_eq!(error.message, "bad key");
    assert_eq!(error.code, 403);

    let ok = json!({"result": {"ok": true}});
    let once = check_for_error(ok.clone()).unwrap();
    assert_eq!(once, ok);
    assert_eq!(check_for_error(once).unwrap(), ok);
}

#[test]
fn test_same_rows_through_both_list_transformers() {
    let raw = json!({"result": {"fields": ["id", "name"], "data": [[1, "a"], [2, "b"]]}});
    let expected = vec![
        Item { id: 1, name: "a".to_string() },
        Item { id: 2, name: "b".to_string() },
    ];

    let remade: RowList<Item> = map_result(raw.clone(), remake_json_for_list).unwrap();
    let converted: Vec<Item> = map_result(raw, convert_arrayed_result).unwrap();

    assert_eq!(remade.items, expected);
    assert_eq!(converted, expected);
}

#[test]
fn test_error_wins_over_shape() {
    let raw = json!({"result": {"error": "Campaign not found", "code": 9}});
    let error = map_result::<Vec<Item>, _>(raw, convert_arrayed_result).unwrap_err();
    assert!(matches!(error, CommandError::Api(ref e) if e.code == 9));
}

#[test]
fn test_success_envelope_decodes() {
    let outcome: Envelope<SuccessResult> =
        rest_command::response::map_to(json!({"result": {"successful": true}}), check_for_error)
            .unwrap();
    assert!(outcome.result.successful);
}

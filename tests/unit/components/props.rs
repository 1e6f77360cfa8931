use super::*;
use serde_json::json;

fn map(v: Value) -> PropertyMap {
    match v {
        Value::Object(m) => m,
        _ => panic!("not an object"),
    }
}

#[test]
fn table_entry_wins_over_inline_data() {
    let props = map(json!({ "text": "from table" }));
    let data = map(json!({ "text": "inline", "duration": 2.5 }));
    let view = PropertyView::new(&props, &data);
    assert_eq!(view.string_or("text", "d").unwrap(), "from table");
    assert_eq!(view.number_or("duration", 1.0).unwrap(), 2.5);
}

#[test]
fn null_in_table_falls_through_to_data() {
    let props = map(json!({ "text": null }));
    let data = map(json!({ "text": "inline" }));
    let view = PropertyView::new(&props, &data);
    assert_eq!(view.string_or("text", "d").unwrap(), "inline");
}

#[test]
fn defaults_apply_when_absent() {
    let empty = PropertyMap::new();
    let view = PropertyView::new(&empty, &empty);
    assert_eq!(view.string_or("text", "Hello World").unwrap(), "Hello World");
    assert_eq!(view.number_or("x", 0.0).unwrap(), 0.0);
    assert!(!view.bool_or("store_correct", false).unwrap());
}

#[test]
fn numbers_accept_numeric_strings_and_reject_garbage() {
    let props = map(json!({ "a": "1.5", "b": "abc", "c": true, "d": "" }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    assert_eq!(view.number_or("a", 0.0).unwrap(), 1.5);
    assert!(view.number_or("b", 0.0).is_err());
    assert!(view.number_or("c", 0.0).is_err());
    assert_eq!(view.number_or("d", 4.0).unwrap(), 4.0);
}

#[test]
fn non_negative_rejects_negative_values() {
    let props = map(json!({ "duration": -1 }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    let err = view.non_negative_or("duration", 1.0).unwrap_err();
    assert_eq!(err.to_string(), "property 'duration': must be >= 0");
}

#[test]
fn required_values_report_absence() {
    let props = map(json!({ "image": "  ", "pin": -3 }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    assert!(view.required_string("image").is_err());
    assert!(view.required_string("missing").is_err());
    assert!(view.required_u64("pin").is_err());
    assert!(view.required_u64("nope").is_err());
}

#[test]
fn integers_parse_from_numbers_and_strings() {
    let props = map(json!({ "a": 17, "b": "4" }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    assert_eq!(view.required_u64("a").unwrap(), 17);
    assert_eq!(view.required_u64("b").unwrap(), 4);
}

#[test]
fn booleans_accept_string_forms() {
    let props = map(json!({ "a": "TRUE", "b": "no", "c": false }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    assert!(view.bool_or("a", false).unwrap());
    assert!(view.bool_or("b", false).is_err());
    assert!(!view.bool_or("c", true).unwrap());
}

#[test]
fn wrong_type_names_the_json_kind() {
    let props = map(json!({ "text": [1] }));
    let empty = PropertyMap::new();
    let view = PropertyView::new(&props, &empty);
    let err = view.string_or("text", "").unwrap_err();
    assert_eq!(err.to_string(), "property 'text': expected a string, got an array");
}

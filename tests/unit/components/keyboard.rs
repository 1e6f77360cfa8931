use super::*;
use crate::graph::model::{ComponentPropertyTable, FlowNode, PropertyMap};
use crate::graph::resolve::resolve;
use crate::templates::registry::TemplateRegistry;
use serde_json::json;

fn render(target: Target, props: Value) -> Result<String, NodeError> {
    let node = FlowNode::new("k1", "keyboard").with_label("resp");
    let mut table = ComponentPropertyTable::new();
    table.insert("k1".to_string(), props);
    let (node, props): (ResolvedNode, PropertyMap) = resolve(&node, &table);
    KeyboardGenerator.render(&node, &props, &TemplateRegistry::builtin(target))
}

#[test]
fn defaults_to_space_and_no_timeout() {
    let out = render(Target::Desktop, json!({})).unwrap();
    assert!(out.contains("keyList=['space']"));
    assert!(out.contains("maxWait=float('inf')"));
    assert!(out.contains("if False:"));
}

#[test]
fn splits_key_strings_on_commas_and_spaces() {
    let keys = allowed_keys(Some(&json!("left, right  'up'"))).unwrap();
    assert_eq!(keys, vec!["left", "right", "up"]);
}

#[test]
fn accepts_arrays_and_rejects_bad_entries() {
    assert_eq!(
        allowed_keys(Some(&json!(["y", "n"]))).unwrap(),
        vec!["y", "n"]
    );
    assert!(allowed_keys(Some(&json!(["y", 3]))).is_err());
    assert!(allowed_keys(Some(&json!(5))).is_err());
}

#[test]
fn empty_key_list_accepts_any_key() {
    let out = render(Target::Desktop, json!({ "allowed_keys": "" })).unwrap();
    assert!(out.contains("keyList=None"));
    let out = render(Target::Browser, json!({ "allowed_keys": [] })).unwrap();
    assert!(out.contains("keyList: undefined"));
}

#[test]
fn timeout_and_correct_answer_for_browser() {
    let out = render(
        Target::Browser,
        json!({ "allowed_keys": "f j", "duration": 2.5, "store_correct": true, "correct_answer": "f" }),
    )
    .unwrap();
    assert!(out.contains("keyList: [\"f\",\"j\"]"));
    assert!(out.contains("< 2.5)"));
    assert!(out.contains("if (true) {"));
    assert!(out.contains("=== \"f\""));
}

#[test]
fn negative_duration_is_rejected() {
    let err = render(Target::Desktop, json!({ "duration": -0.5 })).unwrap_err();
    assert!(matches!(err, NodeError::InvalidProperty { .. }));
}

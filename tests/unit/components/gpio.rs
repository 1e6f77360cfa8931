use super::*;
use crate::graph::model::{ComponentPropertyTable, FlowNode};
use crate::graph::resolve::resolve;
use crate::templates::registry::TemplateRegistry;
use serde_json::json;

fn render(target: Target, props: Value) -> Result<String, NodeError> {
    let node = FlowNode::new("g", "gpio").with_label("Trigger Out");
    let mut table = ComponentPropertyTable::new();
    table.insert("g".to_string(), props);
    let (node, props) = resolve(&node, &table);
    GpioGenerator.render(&node, &props, &TemplateRegistry::builtin(target))
}

#[test]
fn pin_is_required() {
    let err = render(Target::Desktop, json!({})).unwrap_err();
    assert_eq!(err.to_string(), "property 'pin': is required");
}

#[test]
fn pin_above_header_range_is_rejected() {
    assert!(render(Target::Desktop, json!({ "pin": 40 })).is_err());
    assert!(render(Target::Desktop, json!({ "pin": 27 })).is_ok());
}

#[test]
fn desktop_drives_the_pin() {
    let out = render(Target::Desktop, json!({ "pin": 17, "state": "low", "duration": 0.01 })).unwrap();
    assert!(out.starts_with("# Node: Trigger Out (gpio)\n"));
    assert!(out.contains("TriggerOut = DigitalOutputDevice(17, initial_value=False)"));
    assert!(out.contains("if 0.01 > 0:"));
}

#[test]
fn browser_records_the_trigger() {
    let out = render(Target::Browser, json!({ "pin": "4" })).unwrap();
    assert!(out.contains("const TriggerOut = { pin: 4, state: true };"));
    assert!(out.contains("if (0 > 0) {"));
}

#[test]
fn level_parsing() {
    assert!(level(None).unwrap());
    assert!(!level(Some(&json!(0))).unwrap());
    assert!(level(Some(&json!("HIGH"))).unwrap());
    assert!(!level(Some(&json!(false))).unwrap());
    assert!(level(Some(&json!(2))).is_err());
    assert!(level(Some(&json!("sideways"))).is_err());
    assert!(level(Some(&json!([]))).is_err());
}

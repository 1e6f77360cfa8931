use super::*;
use serde_json::json;

#[test]
fn payload_parses_editor_document() {
    let p = ExperimentPayload::from_value(&json!({
        "react_flow": {
            "nodes": [
                { "id": "1", "type": "text", "data": { "label": "Hello" }, "position": { "x": 10, "y": 5 } }
            ],
            "edges": [ { "id": "e", "source": "1", "target": "2" } ]
        },
        "component_props": { "1": { "text": "Welcome" } }
    }))
    .unwrap();

    assert_eq!(p.react_flow.nodes.len(), 1);
    assert_eq!(p.react_flow.nodes[0].node_type, "text");
    assert_eq!(p.react_flow.nodes[0].label(), Some("Hello"));
    assert_eq!(p.react_flow.edges.len(), 1);
    assert_eq!(p.component_props["1"]["text"], json!("Welcome"));
}

#[test]
fn missing_data_and_props_default_to_empty() {
    let p = ExperimentPayload::from_value(&json!({
        "react_flow": { "nodes": [ { "id": "a", "type": "gpio", "data": null } ], "edges": null },
        "component_props": null
    }))
    .unwrap();
    assert!(p.react_flow.nodes[0].data.is_empty());
    assert!(p.react_flow.edges.is_empty());
    assert!(p.component_props.is_empty());
}

#[test]
fn structural_problems_become_malformed_graph() {
    let err = ExperimentPayload::from_value(&json!({ "react_flow": {} })).unwrap_err();
    match err {
        StimflowError::MalformedGraph(msg) => assert!(msg.contains("$.react_flow.nodes")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn invalid_json_text_is_malformed() {
    let err = ExperimentPayload::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, StimflowError::MalformedGraph(_)));
}

#[test]
fn bare_graph_from_value() {
    let g = FlowGraph::from_value(&json!({ "nodes": [ { "id": "1", "type": "text" } ] })).unwrap();
    assert_eq!(g.nodes, vec![FlowNode::new("1", "text")]);
    assert!(FlowGraph::from_value(&json!({ "edges": [] })).is_err());
}

#[test]
fn non_string_label_is_not_a_label() {
    let mut node = FlowNode::new("1", "text");
    node.data.insert("label".to_string(), json!(12));
    assert_eq!(node.label(), None);
    assert_eq!(node.with_label("x").label(), Some("x"));
}

#[test]
fn payload_round_trips_through_serde() {
    let p = ExperimentPayload {
        react_flow: FlowGraph::new(vec![FlowNode::new("1", "text").with_label("A")]),
        component_props: ComponentPropertyTable::new(),
    };
    let v = serde_json::to_value(&p).unwrap();
    assert_eq!(v["react_flow"]["nodes"][0]["type"], json!("text"));
    assert_eq!(ExperimentPayload::from_value(&v).unwrap(), p);
}

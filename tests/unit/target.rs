use super::*;
use serde_json::json;

#[test]
fn template_names_follow_target_extension() {
    assert_eq!(Target::Desktop.assembly_template(), "experiment.py");
    assert_eq!(Target::Browser.assembly_template(), "experiment.js");
    assert_eq!(
        Target::Desktop.component_template("text"),
        "components/text.py"
    );
    assert_eq!(
        Target::Browser.component_template("gpio"),
        "components/gpio.js"
    );
}

#[test]
fn python_literals_match_repr_conventions() {
    let t = Target::Desktop;
    assert_eq!(t.literal(&json!(null)), "None");
    assert_eq!(t.literal(&json!(true)), "True");
    assert_eq!(t.literal(&json!(false)), "False");
    assert_eq!(t.literal(&json!(3)), "3");
    assert_eq!(t.literal(&json!(0.5)), "0.5");
    assert_eq!(t.literal(&json!("it's")), "'it\\'s'");
    assert_eq!(t.literal(&json!(["a", 1])), "['a', 1]");
    assert_eq!(t.literal(&json!({"k": null})), "{'k': None}");
}

#[test]
fn python_strings_escape_control_characters() {
    assert_eq!(Target::Desktop.str_literal("a\nb"), "'a\\nb'");
    assert_eq!(Target::Desktop.str_literal("back\\slash"), "'back\\\\slash'");
    assert_eq!(Target::Desktop.str_literal("\u{1}"), "'\\x01'");
}

#[test]
fn javascript_literals_are_json() {
    let t = Target::Browser;
    assert_eq!(t.literal(&json!(null)), "null");
    assert_eq!(t.literal(&json!({"a": [true, "x"]})), "{\"a\":[true,\"x\"]}");
    assert_eq!(t.str_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
    assert_eq!(t.bool_literal(false), "false");
    assert_eq!(t.none_literal(), "undefined");
}

#[test]
fn number_literals_per_target() {
    assert_eq!(Target::Desktop.number_literal(1.0), "1.0");
    assert_eq!(Target::Browser.number_literal(1.0), "1");
    assert_eq!(Target::Browser.number_literal(1.05), "1.05");
    assert_eq!(Target::Desktop.number_literal(0.05), "0.05");
}

#[test]
fn parses_names_and_aliases() {
    assert_eq!("desktop".parse::<Target>().unwrap(), Target::Desktop);
    assert_eq!("JS".parse::<Target>().unwrap(), Target::Browser);
    assert!("mobile".parse::<Target>().is_err());
}

#[test]
fn serde_uses_lowercase_names() {
    let v = serde_json::to_value(Target::Browser).unwrap();
    assert_eq!(v, json!("browser"));
    let t: Target = serde_json::from_value(json!("desktop")).unwrap();
    assert_eq!(t, Target::Desktop);
}

#[test]
fn code_fields_match_record_columns() {
    assert_eq!(Target::Desktop.code_field(), "python_code");
    assert_eq!(Target::Browser.code_field(), "psychojs_code");
}

#[test]
fn keywords_and_assembly_names_are_reserved_per_target() {
    assert!(Target::Desktop.is_reserved("class"));
    assert!(Target::Desktop.is_reserved("win"));
    assert!(Target::Desktop.is_reserved("keyboard"));
    assert!(!Target::Desktop.is_reserved("new"));
    assert!(Target::Browser.is_reserved("new"));
    assert!(Target::Browser.is_reserved("sleep"));
    assert!(Target::Browser.is_reserved("thisExp"));
    assert!(!Target::Browser.is_reserved("keyboard"));
    assert!(!Target::Desktop.is_reserved("Class"));
    assert!(!Target::Browser.is_reserved("stimulus"));
}

use super::*;

#[test]
fn drops_whitespace_and_punctuation() {
    assert_eq!(sanitize("Test Node"), "TestNode");
    assert_eq!(sanitize("fix-cross #1!"), "fixcross1");
    assert_eq!(sanitize("keep_under_score"), "keep_under_score");
}

#[test]
fn empty_result_gets_prefix() {
    assert_eq!(sanitize(""), "component_");
    assert_eq!(sanitize("  !!  "), "component_");
}

#[test]
fn leading_digit_gets_prefix() {
    assert_eq!(sanitize("1st trial"), "component_1sttrial");
    assert_eq!(sanitize("42"), "component_42");
}

#[test]
fn non_ascii_letters_are_removed() {
    assert_eq!(sanitize("réponse"), "rponse");
    assert_eq!(sanitize("刺激"), "component_");
}

#[test]
fn output_is_always_an_identifier() {
    let labels = [
        "",
        " ",
        "0",
        "_",
        "a",
        "Test Node",
        "9lives",
        "x\ny",
        "ünïcödé",
        "__init__",
        "a-b-c",
        "\u{0}\u{7f}",
        "component_1",
        "tab\there",
    ];
    for label in labels {
        let s = sanitize(label);
        assert!(!s.is_empty(), "empty output for {label:?}");
        assert!(is_identifier(&s), "{s:?} from {label:?} is not an identifier");
    }
}

#[test]
fn sanitize_is_idempotent() {
    for label in ["Test Node", "1abc", "", "ok_name"] {
        let once = sanitize(label);
        assert_eq!(sanitize(&once), once);
    }
}

#[test]
fn distinct_labels_can_collide() {
    assert_eq!(sanitize("a b"), sanitize("ab"));
}

#[test]
fn is_identifier_rejects_bad_shapes() {
    assert!(is_identifier("abc_1"));
    assert!(is_identifier("_x"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("1a"));
    assert!(!is_identifier("a b"));
}

#[test]
fn comment_safe_flattens_line_breaks() {
    assert_eq!(comment_safe("a\nb\rc\td"), "a b c d");
    assert_eq!(comment_safe("Test Node"), "Test Node");
    assert_eq!(comment_safe("a\u{2028}b\u{2029}c"), "a b c");
    assert_eq!(comment_safe("a\u{85}b\u{b}c\u{c}d"), "a b c d");
}

use super::*;

#[test]
fn empty_config_is_all_defaults() {
    let config = StimflowConfig::from_toml_str("").unwrap();
    assert_eq!(config, StimflowConfig::default());
    assert_eq!(config.compiler.max_nodes, DEFAULT_MAX_NODES);
    assert_eq!(config.compiler.targets, vec![Target::Desktop, Target::Browser]);
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn toml_overrides_nested_values() {
    let config = StimflowConfig::from_toml_str(
        r#"
        [compiler]
        max_nodes = 12
        template_dir = "tpl"
        targets = ["browser"]

        [logging]
        level = "debug"
        format = "json"
        "#,
    )
    .unwrap();
    assert_eq!(config.compiler.max_nodes, 12);
    assert_eq!(config.compiler.template_dir, Some(PathBuf::from("tpl")));
    assert_eq!(config.compiler.targets, vec![Target::Browser]);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn invalid_values_are_config_errors() {
    for toml in [
        "[compiler]\nmax_nodes = 0",
        "[compiler]\ntargets = []",
        "[compiler]\ntargets = [\"android\"]",
        "[logging]\nlevel = \"loud\"",
        "[logging]\nformat = \"xml\"",
    ] {
        let err = StimflowConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, StimflowError::Config(_)), "{toml}: {err}");
    }
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = StimflowConfig::load_from(Some(dir.path().join("nope.toml"))).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn file_values_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stimflow.toml");
    std::fs::write(&path, "[compiler]\nmax_nodes = 7\n").unwrap();
    let config = StimflowConfig::load_from(Some(&path)).unwrap();
    assert_eq!(config.compiler.max_nodes, 7);
}

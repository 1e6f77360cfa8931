use super::*;

#[test]
fn builtin_sets_have_assembly_and_every_component() {
    for target in Target::ALL {
        let reg = TemplateRegistry::builtin(target);
        assert_eq!(reg.target(), target);
        assert!(reg.assembly().is_ok(), "{target} has no assembly template");
        for ty in ["text", "image", "keyboard", "gpio"] {
            let name = target.component_template(ty);
            assert!(reg.contains(&name), "{target} is missing {name}");
        }
        assert_eq!(reg.len(), 5);
    }
}

#[test]
fn render_substitutes_placeholders_and_unescapes_braces() {
    let t = Template::new("t", "x = {value}; d = {{'a': 1}}");
    let ctx = RenderContext::new().with("value", "42");
    assert_eq!(t.render(&ctx).unwrap(), "x = 42; d = {'a': 1}");
}

#[test]
fn render_fails_on_missing_placeholder() {
    let t = Template::new("components/text.py", "{label} = {missing}");
    let ctx = RenderContext::new().with("label", "a");
    let err = t.render(&ctx).unwrap_err();
    assert_eq!(err.template, "components/text.py");
    assert!(err.to_string().contains("components/text.py"));
}

#[test]
fn missing_assembly_is_reported_by_name() {
    let reg = TemplateRegistry::from_templates(
        Target::Desktop,
        [("components/text.py", "# {label}")],
    );
    match reg.assembly() {
        Err(StimflowError::MissingAssemblyTemplate { name }) => {
            assert_eq!(name, "experiment.py")
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn builtin_templates_render_with_full_contexts() {
    let reg = TemplateRegistry::builtin(Target::Desktop);
    let asm = reg.assembly().unwrap();
    let out = asm
        .render(
            &RenderContext::new()
                .with("expName", "'Demo'")
                .with("components", ""),
        )
        .unwrap();
    assert!(out.contains("expName = 'Demo'"));
    assert!(out.contains("expInfo = {'participant': '', 'session': '001'}"));
}

#[test]
fn from_dir_loads_nested_templates_with_relative_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("components")).unwrap();
    std::fs::write(dir.path().join("experiment.py.tmpl"), "# {expName}\n{components}").unwrap();
    std::fs::write(
        dir.path().join("components").join("text.py.tmpl"),
        "{label} = 1",
    )
    .unwrap();
    std::fs::write(dir.path().join("README.md"), "ignored").unwrap();

    let reg = TemplateRegistry::from_dir(dir.path(), Target::Desktop).unwrap();
    let names: Vec<&str> = reg.names().collect();
    assert_eq!(names, vec!["components/text.py", "experiment.py"]);
    assert_eq!(reg.assembly().unwrap().source(), "# {expName}\n{components}");
}

#[test]
fn overrides_replace_builtin_entries_only() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("components")).unwrap();
    std::fs::write(
        dir.path().join("components").join("text.py.tmpl"),
        "custom {label}",
    )
    .unwrap();

    let reg = TemplateRegistry::builtin_with_overrides(dir.path(), Target::Desktop).unwrap();
    assert_eq!(reg.len(), 5);
    assert_eq!(
        reg.get("components/text.py").unwrap().source(),
        "custom {label}"
    );
    assert!(reg.assembly().is_ok());
}

#[test]
fn from_dir_reports_unreadable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = TemplateRegistry::from_dir(&missing, Target::Browser).unwrap_err();
    assert!(matches!(err, StimflowError::Template(_)));
}

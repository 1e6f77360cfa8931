use crate::target::Target;

const DESKTOP: &[(&str, &str)] = &[
    (
        "experiment.py",
        include_str!("../../templates/desktop/experiment.py.tmpl"),
    ),
    (
        "components/text.py",
        include_str!("../../templates/desktop/components/text.py.tmpl"),
    ),
    (
        "components/image.py",
        include_str!("../../templates/desktop/components/image.py.tmpl"),
    ),
    (
        "components/keyboard.py",
        include_str!("../../templates/desktop/components/keyboard.py.tmpl"),
    ),
    (
        "components/gpio.py",
        include_str!("../../templates/desktop/components/gpio.py.tmpl"),
    ),
];

const BROWSER: &[(&str, &str)] = &[
    (
        "experiment.js",
        include_str!("../../templates/browser/experiment.js.tmpl"),
    ),
    (
        "components/text.js",
        include_str!("../../templates/browser/components/text.js.tmpl"),
    ),
    (
        "components/image.js",
        include_str!("../../templates/browser/components/image.js.tmpl"),
    ),
    (
        "components/keyboard.js",
        include_str!("../../templates/browser/components/keyboard.js.tmpl"),
    ),
    (
        "components/gpio.js",
        include_str!("../../templates/browser/components/gpio.js.tmpl"),
    ),
];

pub(crate) fn sources(target: Target) -> &'static [(&'static str, &'static str)] {
    match target {
        Target::Desktop => DESKTOP,
        Target::Browser => BROWSER,
    }
}

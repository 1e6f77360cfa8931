use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Runtime environment a compile emits source for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Desktop runtime: a PsychoPy-style Python script.
    Desktop,
    /// Browser runtime: a PsychoJS-style JavaScript module.
    Browser,
}

impl Target {
    /// Every supported target, in output order.
    pub const ALL: [Target; 2] = [Target::Desktop, Target::Browser];

    /// Stable lowercase name, also used in config files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Target::Desktop => "desktop",
            Target::Browser => "browser",
        }
    }

    /// File extension of generated sources and of template logical names.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Desktop => "py",
            Target::Browser => "js",
        }
    }

    /// Field on the experiment record that stores this target's source text.
    pub fn code_field(self) -> &'static str {
        match self {
            Target::Desktop => "python_code",
            Target::Browser => "psychojs_code",
        }
    }

    /// Single-line comment leader.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Target::Desktop => "#",
            Target::Browser => "//",
        }
    }

    /// Logical template name for `stem` in this target, e.g. `components/text.py`.
    pub fn template_name(self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }

    /// Logical name of the assembly template.
    pub fn assembly_template(self) -> String {
        self.template_name("experiment")
    }

    /// Logical name of the per-type component template.
    pub fn component_template(self, node_type: &str) -> String {
        self.template_name(&format!("components/{node_type}"))
    }

    /// Source literal for a JSON value in this target's language.
    pub fn literal(self, value: &Value) -> String {
        match self {
            Target::Desktop => python_literal(value),
            // JSON is a JavaScript expression subset; serialization of a `Value` cannot fail.
            Target::Browser => serde_json::to_string(value).unwrap_or_else(|_| "null".to_string()),
        }
    }

    /// Source literal for a string.
    pub fn str_literal(self, s: &str) -> String {
        match self {
            Target::Desktop => python_str(s),
            Target::Browser => Value::String(s.to_string()).to_string(),
        }
    }

    /// Source literal for a boolean.
    pub fn bool_literal(self, b: bool) -> &'static str {
        match (self, b) {
            (Target::Desktop, true) => "True",
            (Target::Desktop, false) => "False",
            (Target::Browser, true) => "true",
            (Target::Browser, false) => "false",
        }
    }

    /// Source literal for an absent value.
    pub fn none_literal(self) -> &'static str {
        match self {
            Target::Desktop => "None",
            Target::Browser => "undefined",
        }
    }

    /// Whether `name` cannot be used as a node identifier in this target: a keyword of the
    /// language or a name the assembly template already binds.
    pub fn is_reserved(self, name: &str) -> bool {
        let (keywords, bound) = match self {
            Target::Desktop => (PYTHON_KEYWORDS, DESKTOP_BOUND),
            Target::Browser => (JS_RESERVED, BROWSER_BOUND),
        };
        keywords.contains(&name) || bound.contains(&name)
    }

    /// Source literal for a floating point number.
    pub fn number_literal(self, n: f64) -> String {
        // Both languages accept Rust's shortest round-trip formatting for finite values.
        let s = format!("{n:?}");
        match self {
            Target::Desktop => s,
            Target::Browser => s.strip_suffix(".0").map(str::to_string).unwrap_or(s),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" | "python" | "py" => Ok(Target::Desktop),
            "browser" | "javascript" | "js" => Ok(Target::Browser),
            other => Err(format!("unknown target '{other}' (expected desktop or browser)")),
        }
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

const JS_RESERVED: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function",
    "if", "implements", "import", "in", "instanceof", "interface", "let", "new", "null",
    "package", "private", "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield", "arguments", "eval",
    "undefined", "NaN", "Infinity",
];

// Names bound at top level by `experiment.py` and the component fragments' imports.
const DESKTOP_BOUND: &[&str] = &[
    "core", "data", "gui", "logging", "visual", "keyboard", "expName", "expInfo", "dlg",
    "thisExp", "win", "defaultKeyboard", "globalClock", "DigitalOutputDevice",
];

// Names bound by `experiment.js` around the spliced fragments.
const BROWSER_BOUND: &[&str] = &[
    "core", "util", "visual", "hardware", "PsychoJS", "expName", "expInfo", "psychoJS",
    "globalClock", "sleep", "runExperiment", "win", "thisExp",
];

fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => python_str(s),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(python_literal).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", python_str(k), python_literal(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

// Single-quoted like Python's `repr`, so the output matches what a Python author would write.
fn python_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
#[path = "../tests/unit/target.rs"]
mod tests;

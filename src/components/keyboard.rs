use serde_json::Value;

use super::props::{invalid, kind};
use super::{ComponentGenerator, NodeError, PropertyView, base_context};
use crate::graph::resolve::ResolvedNode;
use crate::target::Target;
use crate::templates::registry::RenderContext;

/// Suffix of the variable holding the captured keys, e.g. `resp_keys`.
pub const KEYS_SUFFIX: &str = "_keys";

/// Keyboard response capture.
///
/// `duration == 0` waits without a timeout. `allowed_keys` may be a string of names separated by
/// commas and/or whitespace, or an array of names; an empty list accepts any key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardGenerator;

impl ComponentGenerator for KeyboardGenerator {
    fn type_name(&self) -> &str {
        "keyboard"
    }

    fn bound_names(&self, label: &str) -> Vec<String> {
        vec![label.to_string(), format!("{label}{KEYS_SUFFIX}")]
    }

    fn context(
        &self,
        node: &ResolvedNode,
        props: &PropertyView<'_>,
        target: Target,
    ) -> Result<RenderContext, NodeError> {
        let keys = allowed_keys(props.get("allowed_keys"))?;
        let duration = props.non_negative_or("duration", 0.0)?;
        let store_correct = props.bool_or("store_correct", false)?;
        let correct_answer = props.string_or("correct_answer", "")?;

        // An empty list accepts any key.
        let key_list = if keys.is_empty() {
            target.none_literal().to_string()
        } else {
            target.literal(&Value::Array(keys.into_iter().map(Value::String).collect()))
        };
        let max_wait = if duration > 0.0 {
            target.number_literal(duration)
        } else {
            match target {
                Target::Desktop => "float('inf')".to_string(),
                Target::Browser => "Infinity".to_string(),
            }
        };

        Ok(base_context(node, target)
            .with("allowed_keys", key_list)
            .with("duration", target.number_literal(duration))
            .with("max_wait", max_wait)
            .with("store_correct", target.bool_literal(store_correct))
            .with("correct_answer", target.str_literal(&correct_answer)))
    }
}

fn allowed_keys(value: Option<&Value>) -> Result<Vec<String>, NodeError> {
    let keys: Vec<String> = match value {
        None => vec!["space".to_string()],
        Some(Value::String(s)) => s
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(|k| k.trim_matches(|c: char| c == '\'' || c == '"'))
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
                other => Err(invalid(
                    "allowed_keys",
                    format!("entries must be non-empty strings, got {}", kind(other)),
                )),
            })
            .collect::<Result<Vec<String>, NodeError>>()?,
        Some(other) => {
            return Err(invalid(
                "allowed_keys",
                format!("expected a string or an array, got {}", kind(other)),
            ));
        }
    };
    Ok(keys)
}

#[cfg(test)]
#[path = "../../tests/unit/components/keyboard.rs"]
mod tests;

use serde_json::Value;

use super::props::{invalid, kind};
use super::{ComponentGenerator, NodeError, PropertyView, base_context};
use crate::graph::resolve::ResolvedNode;
use crate::target::Target;
use crate::templates::registry::RenderContext;

/// Highest BCM pin number on a 40-pin header.
pub const MAX_GPIO_PIN: u64 = 27;

/// Digital output trigger on a GPIO pin.
///
/// `state` is the level written (`true`/`"high"` or `false`/`"low"`). A positive `duration`
/// toggles the pin back after that many seconds; zero latches.
#[derive(Clone, Copy, Debug, Default)]
pub struct GpioGenerator;

impl ComponentGenerator for GpioGenerator {
    fn type_name(&self) -> &str {
        "gpio"
    }

    fn context(
        &self,
        node: &ResolvedNode,
        props: &PropertyView<'_>,
        target: Target,
    ) -> Result<RenderContext, NodeError> {
        let pin = props.required_u64("pin")?;
        if pin > MAX_GPIO_PIN {
            return Err(invalid("pin", format!("must be <= {MAX_GPIO_PIN}")));
        }
        let state = level(props.get("state"))?;
        let duration = props.non_negative_or("duration", 0.0)?;

        Ok(base_context(node, target)
            .with("pin", pin.to_string())
            .with("state", target.bool_literal(state))
            .with("duration", target.number_literal(duration)))
    }
}

fn level(value: Option<&Value>) -> Result<bool, NodeError> {
    match value {
        None => Ok(true),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(invalid("state", "numeric level must be 0 or 1")),
        },
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "high" | "on" | "true" | "1" => Ok(true),
            "low" | "off" | "false" | "0" => Ok(false),
            _ => Err(invalid("state", format!("unknown level \"{s}\""))),
        },
        Some(other) => Err(invalid(
            "state",
            format!("expected a level, got {}", kind(other)),
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/components/gpio.rs"]
mod tests;

use serde_json::Value;

use super::props::{invalid, kind};
use super::{ComponentGenerator, NodeError, PropertyView, base_context};
use crate::graph::resolve::ResolvedNode;
use crate::target::Target;
use crate::templates::registry::RenderContext;

/// Image stimulus shown for a fixed duration. The `image` source is required.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageGenerator;

impl ComponentGenerator for ImageGenerator {
    fn type_name(&self) -> &str {
        "image"
    }

    fn context(
        &self,
        node: &ResolvedNode,
        props: &PropertyView<'_>,
        target: Target,
    ) -> Result<RenderContext, NodeError> {
        let image = props.required_string("image")?;
        let duration = props.non_negative_or("duration", 1.0)?;
        let x = props.number_or("x", 0.0)?;
        let y = props.number_or("y", 0.0)?;
        let size = match props.get("size") {
            None => target.none_literal().to_string(),
            Some(v) => {
                let [w, h] = size_pair(v)?;
                format!(
                    "[{}, {}]",
                    target.number_literal(w),
                    target.number_literal(h)
                )
            }
        };

        Ok(base_context(node, target)
            .with("image", target.str_literal(&image))
            .with("duration", target.number_literal(duration))
            .with("x", target.number_literal(x))
            .with("y", target.number_literal(y))
            .with("size", size))
    }
}

fn size_pair(v: &Value) -> Result<[f64; 2], NodeError> {
    let Value::Array(items) = v else {
        return Err(invalid(
            "size",
            format!("expected a [width, height] pair, got {}", kind(v)),
        ));
    };
    let nums: Vec<f64> = items
        .iter()
        .filter_map(Value::as_f64)
        .filter(|n| n.is_finite() && *n > 0.0)
        .collect();
    match nums.as_slice() {
        [w, h] if items.len() == 2 => Ok([*w, *h]),
        _ => Err(invalid("size", "must be two positive numbers")),
    }
}

//! Collaborators used when assembling from the command line

use std::collections::HashMap;

use bodykit::{BoxError, Evaluator, SchemaGenerator};

/// Replaces `${{ name }}` placeholders with values given via `--var`
#[derive(Clone, Debug, Default)]
pub struct VarEvaluator {
    vars: HashMap<String, String>,
}

impl VarEvaluator {
    pub fn new(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            vars: vars.into_iter().collect(),
        }
    }
}

impl Evaluator for VarEvaluator {
    fn evaluate(&self, text: &str) -> Result<String, BoxError> {
        let mut output = String::with_capacity(text.len());
        let mut remainder = text;

        while let Some(start) = remainder.find("${{") {
            let after_start = remainder.get(start + 3..).unwrap_or_default();
            let Some(end) = after_start.find("}}") else {
                break;
            };
            output.push_str(remainder.get(..start).unwrap_or_default());
            let name = after_start.get(..end).unwrap_or_default().trim();
            match self.vars.get(name) {
                Some(value) => output.push_str(value),
                None => return Err(format!("no value for placeholder `{name}`").into()),
            }
            remainder = after_start.get(end + 2..).unwrap_or_default();
        }

        output.push_str(remainder);
        Ok(output)
    }
}

/// Renders the schema's `example` (or `default`) value as the body
#[derive(Clone, Copy, Debug, Default)]
pub struct ExampleSchema;

impl SchemaGenerator for ExampleSchema {
    fn generate(&self, schema: &serde_json::Value) -> Result<String, BoxError> {
        let example = schema
            .get("example")
            .or_else(|| schema.get("default"))
            .ok_or("schema has no `example` or `default` to render")?;
        Ok(serde_json::to_string_pretty(example)?)
    }
}

/// Parse a `NAME=VALUE` pair
pub fn parse_var(input: &str) -> Result<(String, String), String> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{input}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty variable name in `{input}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

//! Render context assembly — TOML input, CLI overrides, reserved keys.

use serde_json::{Map, Value};

use crate::error::ContextError;

/// Reserved context key holding the template's repo-relative path.
///
/// Injected after all overrides; a user-supplied value for this key never
/// survives.
pub const TEMPLATE_PATH_KEY: &str = "template_path";

/// The merged variable mapping handed to the render step.
pub type RenderContext = Map<String, Value>;

/// Split a raw `key=value` argument on its first `=`.
///
/// Everything after the first `=` is the value, further `=` characters
/// included. A string without `=` is a usage error.
pub fn parse_override(raw: &str) -> Result<(&str, &str), ContextError> {
    raw.split_once('=')
        .ok_or_else(|| ContextError::MalformedOverride { raw: raw.to_owned() })
}

// ---------------------------------------------------------------------------
// ContextBuilder
// ---------------------------------------------------------------------------

/// Builds the [`RenderContext`] from TOML input plus CLI overrides.
///
/// Overrides apply in call order and unconditionally replace existing keys.
/// Override values stay strings; a typed value from the TOML input is
/// replaced, never coerced.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    vars: Map<String, Value>,
}

impl ContextBuilder {
    /// Parse `input` as a TOML table and convert it into base context values.
    pub fn from_toml_str(input: &str) -> Result<Self, ContextError> {
        let table: toml::Table = toml::from_str(input)?;
        let mut vars = Map::new();
        for (key, value) in table {
            vars.insert(key, toml_to_json(value)?);
        }
        Ok(ContextBuilder { vars })
    }

    /// Unconditionally set `key` to the string `value`.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), Value::String(value.into()));
    }

    /// Apply one raw `key=value` override string.
    pub fn apply_override(&mut self, raw: &str) -> Result<(), ContextError> {
        let (key, value) = parse_override(raw)?;
        tracing::debug!("override: {key}={value}");
        self.set_string(key, value);
        Ok(())
    }

    /// Inject the reserved [`TEMPLATE_PATH_KEY`], overwriting any prior value.
    pub fn set_template_path(&mut self, rel: impl Into<String>) {
        self.vars
            .insert(TEMPLATE_PATH_KEY.to_owned(), Value::String(rel.into()));
    }

    /// Finish and hand back the merged mapping.
    pub fn build(self) -> RenderContext {
        self.vars
    }
}

/// Convert a TOML value into its JSON counterpart for rendering.
///
/// Datetimes have no JSON equivalent and keep their TOML text form.
fn toml_to_json(value: toml::Value) -> Result<Value, ContextError> {
    let converted = match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or(ContextError::NonFiniteFloat(f))?,
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(toml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| Ok((k, toml_to_json(v)?)))
                .collect::<Result<_, ContextError>>()?,
        ),
    };
    Ok(converted)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

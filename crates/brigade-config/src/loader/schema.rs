//! Schema validation for brigade JSON5 configuration.
//!
//! Each section is described by a field table; validation rejects unknown
//! keys and wrongly typed values before serde sees the document, so errors
//! name the offending layer and dotted path.

use crate::ConfigError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
enum FieldKind {
    String,
    NullableString,
    Bool,
    Unsigned,
    Number,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::NullableString => value.is_string() || value.is_null(),
            FieldKind::Bool => value.is_boolean(),
            FieldKind::Unsigned => value.is_u64(),
            FieldKind::Number => value.is_number(),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FieldKind::String => "expected string",
            FieldKind::NullableString => "expected string or null",
            FieldKind::Bool => "expected boolean",
            FieldKind::Unsigned => "expected non-negative integer",
            FieldKind::Number => "expected number",
        }
    }
}

type Fields = &'static [(&'static str, FieldKind)];

const PROVIDER_FIELDS: Fields = &[
    ("api_key", FieldKind::NullableString),
    ("api_key_env", FieldKind::String),
    ("model", FieldKind::String),
    ("base_url", FieldKind::String),
    ("temperature", FieldKind::Number),
    ("max_output_tokens", FieldKind::Unsigned),
    ("request_timeout_secs", FieldKind::Unsigned),
];

const ASSISTANT_FIELDS: Fields = &[
    ("restaurant_name", FieldKind::NullableString),
    ("max_tool_rounds", FieldKind::Unsigned),
    ("seed_greeting", FieldKind::String),
    ("code_execution", FieldKind::Bool),
    ("web_search", FieldKind::Bool),
];

const RELAY_FIELDS: Fields = &[
    ("enabled", FieldKind::Bool),
    ("base_url", FieldKind::NullableString),
    ("health_path", FieldKind::String),
    ("chat_path", FieldKind::String),
    ("probe_timeout_secs", FieldKind::Unsigned),
    ("reprobe_after_secs", FieldKind::Unsigned),
];

const INSIGHTS_FIELDS: Fields = &[
    ("temperature", FieldKind::Number),
    ("max_output_tokens", FieldKind::Unsigned),
];

const SECTIONS: &[(&str, Fields)] = &[
    ("provider", PROVIDER_FIELDS),
    ("assistant", ASSISTANT_FIELDS),
    ("relay", RELAY_FIELDS),
    ("insights", INSIGHTS_FIELDS),
];

/// Validate one config layer (or the merged document) against the schema.
pub(super) fn validate_layer(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let checker = Checker { layer };
    let root = checker.object(value, "")?;
    for (key, value) in root {
        if key == "$schema" {
            checker.field(value, key, FieldKind::String)?;
            continue;
        }
        let Some((_, fields)) = SECTIONS.iter().find(|(name, _)| *name == key.as_str()) else {
            return Err(checker.invalid(key, "unknown key"));
        };
        checker.section(value, key, fields)?;
    }
    Ok(())
}

struct Checker<'a> {
    layer: &'a str,
}

impl Checker<'_> {
    fn section(&self, value: &Value, path: &str, fields: Fields) -> Result<(), ConfigError> {
        for (key, value) in self.object(value, path)? {
            let path = format!("{path}.{key}");
            match fields.iter().find(|(name, _)| *name == key.as_str()) {
                Some((_, kind)) => self.field(value, &path, *kind)?,
                None => return Err(self.invalid(&path, "unknown key")),
            }
        }
        Ok(())
    }

    fn field(&self, value: &Value, path: &str, kind: FieldKind) -> Result<(), ConfigError> {
        if kind.accepts(value) {
            Ok(())
        } else {
            Err(self.invalid(path, kind.expected()))
        }
    }

    fn object<'v>(&self, value: &'v Value, path: &str) -> Result<&'v Map<String, Value>, ConfigError> {
        value
            .as_object()
            .ok_or_else(|| self.invalid(path, "expected object"))
    }

    fn invalid(&self, path: &str, message: &str) -> ConfigError {
        let path = if path.is_empty() { "root" } else { path };
        ConfigError::InvalidField {
            path: format!("{}:{path}", self.layer),
            message: message.to_string(),
        }
    }
}

/*!
 * Copyright 2025 Release Workshop Ltd
 * Licensed under the Elastic License 2.0; you may not use this file except in compliance with the Elastic License 2.0.
 * See the LICENSE file in the project root for details.
 *
 * Parsing of `--config` payloads given either inline or as a file path.
 */

use crate::error::{KfError, KfResult};
use serde_json::{Map, Value};
use std::fs;
use std::io;

/// Parse a params payload that is either an inline JSON object or a path to
/// a JSON (or YAML) file containing one.
///
/// Input that is already a valid JSON document is never treated as a path.
pub fn parse_json_or_file(json_or_file: &str) -> KfResult<Map<String, Value>> {
    if let Ok(value) = serde_json::from_str::<Value>(json_or_file) {
        return into_object(value);
    }

    let contents = fs::read_to_string(json_or_file).map_err(|e| {
        KfError::ConfigPayload(format!(
            "couldn't read file: open {json_or_file}: {}",
            describe_io_error(&e)
        ))
    })?;

    let value = match serde_json::from_str::<Value>(&contents) {
        Ok(value) => value,
        Err(json_err) => serde_yaml::from_str::<Value>(&contents)
            .map_err(|_| KfError::ConfigPayload(format!("couldn't parse JSON: {json_err}")))?,
    };

    into_object(value)
}

fn into_object(value: Value) -> KfResult<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(KfError::ConfigPayload(format!(
            "couldn't parse JSON: expected an object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Lower-case OS description of an I/O error, without the `(os error N)`
/// suffix the standard library appends.
fn describe_io_error(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => {
            let text = err.to_string();
            let text = match text.find(" (os error") {
                Some(idx) => &text[..idx],
                None => text.as_str(),
            };
            text.to_lowercase()
        }
    }
}

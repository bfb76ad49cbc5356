//! Argument validation against a tool's declared input schema.
//!
//! Covers the subset of JSON Schema the tool definitions actually use:
//! `type` on object properties, `required`, `enum`, and integer bounds
//! (`minimum`/`maximum`). Arguments that fail here never reach a backend.

use serde_json::Value;

/// Validate `args` against an `inputSchema` object. Returns a message
/// naming the offending field on failure.
pub fn validate(schema: &Value, args: &Value) -> Result<(), String> {
    let empty = Value::Object(Default::default());
    // Clients may omit "arguments" entirely for tools without parameters.
    let args = if args.is_null() { &empty } else { args };

    let args_obj = args
        .as_object()
        .ok_or_else(|| "arguments must be a JSON object".to_string())?;

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for key in required.iter().filter_map(Value::as_str) {
            if !args_obj.contains_key(key) {
                return Err(format!("missing required argument: {key}"));
            }
        }
    }

    let properties = match schema.get("properties").and_then(Value::as_object) {
        Some(properties) => properties,
        None => return Ok(()),
    };

    for (key, value) in args_obj {
        let Some(spec) = properties.get(key) else {
            // Unknown keys pass through; backends ignore what they don't know.
            continue;
        };
        check_property(key, spec, value)?;
    }

    Ok(())
}

fn check_property(key: &str, spec: &Value, value: &Value) -> Result<(), String> {
    if let Some(expected) = spec.get("type").and_then(Value::as_str) {
        let ok = match expected {
            "string" => value.is_string(),
            "integer" => value.is_i64() || value.is_u64(),
            "number" => value.is_number(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            _ => true,
        };
        if !ok {
            return Err(format!("argument {key} must be of type {expected}"));
        }
    }

    if let Some(allowed) = spec.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            let choices: Vec<String> = allowed.iter().map(|v| v.to_string()).collect();
            return Err(format!(
                "argument {key} must be one of: {}",
                choices.join(", ")
            ));
        }
    }

    if let Some(minimum) = spec.get("minimum").and_then(Value::as_i64) {
        if value.as_i64().is_some_and(|v| v < minimum) {
            return Err(format!("argument {key} must be >= {minimum}"));
        }
    }
    if let Some(maximum) = spec.get("maximum").and_then(Value::as_i64) {
        if value.as_i64().is_some_and(|v| v > maximum) {
            return Err(format!("argument {key} must be <= {maximum}"));
        }
    }

    Ok(())
}

//! Input helpers shared by command handlers.

use std::io::Read;

use anyhow::Context;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::CliError;

/// Read the whole of stdin.
pub fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}

/// `-` means stdin; anything else is returned as is.
pub fn literal_or_stdin(value: &str) -> anyhow::Result<String> {
    if value == "-" {
        read_stdin()
    } else {
        Ok(value.to_string())
    }
}

/// `-` means stdin; anything else is a file path.
pub fn file_or_stdin(value: &str) -> anyhow::Result<String> {
    if value == "-" {
        read_stdin()
    } else {
        std::fs::read_to_string(value).with_context(|| format!("Failed to read {}", value))
    }
}

/// Parse JSON supplied by the user, reporting failures as invalid input.
pub fn parse_json_input(text: &str) -> Result<Value, CliError> {
    serde_json::from_str(text).map_err(|e| CliError::invalid_input(format!("Invalid JSON: {}", e)))
}

/// Give a record object an id if it has none (or an empty one).
pub fn ensure_id(record: &mut Value) -> Result<String, CliError> {
    let object = record
        .as_object_mut()
        .ok_or_else(|| CliError::invalid_input("Record must be a JSON object"))?;

    match object.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => return Ok(id.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => return Err(CliError::invalid_input("Record \"id\" must be a string")),
    }

    let id = Uuid::new_v4().to_string();
    object.insert("id".to_string(), Value::String(id.clone()));
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ensure_id_keeps_existing() {
        let mut record = json!({"id": "p1", "name": "Sam"});
        assert_eq!(ensure_id(&mut record).unwrap(), "p1");
        assert_eq!(record["id"], json!("p1"));
    }

    #[test]
    fn test_ensure_id_fills_missing_and_empty() {
        for mut record in [json!({"name": "Sam"}), json!({"id": "", "name": "Sam"})] {
            let id = ensure_id(&mut record).unwrap();
            assert!(Uuid::parse_str(&id).is_ok());
            assert_eq!(record["id"], json!(id));
        }
    }

    #[test]
    fn test_ensure_id_rejects_non_objects_and_numeric_ids() {
        assert!(ensure_id(&mut json!([1, 2])).is_err());
        assert!(ensure_id(&mut json!({"id": 7})).is_err());
    }

    #[test]
    fn test_parse_json_input_reports_invalid_input() {
        let err = parse_json_input("{not json").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}

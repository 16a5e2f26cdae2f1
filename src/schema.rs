use jsonschema::validator_for;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("Schema parse error: {0}")]
    SchemaParse(#[from] serde_json::Error),
    #[error("Schema compile error: {0}")]
    SchemaCompile(String),
    #[error("{}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}

/// Validate a JSON instance against a JSON Schema (draft 2020-12).
///
/// On failure every violation is reported, in the validator's order.
pub fn validate_value(schema: &Value, instance: &Value) -> Result<(), SchemaValidationError> {
    let validator =
        validator_for(schema).map_err(|e| SchemaValidationError::SchemaCompile(e.to_string()))?;

    let violations: Vec<String> = validator
        .iter_errors(instance)
        .map(|e| e.to_string())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError::ValidationFailed(violations))
    }
}

/// String form of [`validate_value`].
pub fn validate_json(schema_str: &str, instance_str: &str) -> Result<(), SchemaValidationError> {
    let schema_json: Value = serde_json::from_str(schema_str)?;
    let instance_json: Value = serde_json::from_str(instance_str)?;
    validate_value(&schema_json, &instance_json)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reports_missing_required_property() {
        let schema = json!({
            "type": "object",
            "required": ["docId"],
            "properties": { "docId": { "type": "string" } }
        });
        let err = validate_value(&schema, &json!({})).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed(violations) => {
                assert_eq!(violations.len(), 1);
                assert!(violations[0].contains("docId"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_conforming_instance() {
        let schema = json!({
            "type": "object",
            "properties": { "limit": { "type": "integer", "minimum": 1 } },
            "additionalProperties": false
        });
        validate_value(&schema, &json!({"limit": 5})).unwrap();
        assert!(validate_value(&schema, &json!({"limit": 0})).is_err());
        assert!(validate_value(&schema, &json!({"other": 1})).is_err());
    }
}

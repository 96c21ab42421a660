//! JSON Schema validation of catalog entries.
//!
//! Wraps the `jsonschema` crate's `Validator`. The draft is taken from the
//! schema's `$schema` keyword. Validation never mutates the document and
//! reports every violation in one pass.

use serde_json::Value;

use clitpl_types::error::CatalogError;
use clitpl_types::validation::SchemaViolation;

/// A compiled catalog schema.
#[derive(Debug)]
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidSchema`] if the document is not a valid
    /// JSON Schema.
    pub fn new(schema: &Value) -> Result<Self, CatalogError> {
        let validator = jsonschema::validator_for(schema)
            .map_err(|e| CatalogError::InvalidSchema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Parse and compile a schema from its JSON text.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let schema: Value = serde_json::from_str(raw)
            .map_err(|e| CatalogError::InvalidSchema(format!("schema is not valid JSON: {e}")))?;
        Self::new(&schema)
    }

    /// Collect every violation of the schema in `document`.
    pub fn validate(&self, document: &Value) -> Vec<SchemaViolation> {
        let violations: Vec<SchemaViolation> = self
            .validator
            .iter_errors(document)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        tracing::debug!(violations = violations.len(), "schema validation finished");
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CATALOG_SCHEMA, conforming_entry_json};
    use serde_json::json;

    fn validator() -> SchemaValidator {
        SchemaValidator::from_json_str(CATALOG_SCHEMA).unwrap()
    }

    #[test]
    fn test_conforming_entry_has_no_violations() {
        assert!(validator().validate(&conforming_entry_json()).is_empty());
    }

    #[test]
    fn test_optional_fields_accepted_when_present() {
        let mut doc = conforming_entry_json();
        doc["repository"]["branch"] = json!("v1.0");
        doc["description"] = json!("A tiny bot");
        doc["tags"] = json!(["ai", "discord"]);
        assert!(validator().validate(&doc).is_empty());
    }

    #[test]
    fn test_missing_repository_url_is_reported() {
        let mut doc = conforming_entry_json();
        doc["repository"] = json!({});
        let violations = validator().validate(&doc);
        assert!(!violations.is_empty());
        assert!(violations.iter().any(|v| v.instance_path == "/repository" && v.message.contains("url")));
    }

    #[test]
    fn test_handle_with_space_is_reported() {
        let mut doc = conforming_entry_json();
        doc["handle"] = json!("@light speed");
        let violations = validator().validate(&doc);
        assert!(violations.iter().any(|v| v.instance_path == "/handle"));
    }

    #[test]
    fn test_all_violations_collected_in_one_pass() {
        let mut doc = conforming_entry_json();
        doc["handle"] = json!("bad handle");
        doc["category"] = json!("Spreadsheet");
        doc["tags"] = json!(["a", "a"]);
        let violations = validator().validate(&doc);
        let paths: Vec<&str> = violations.iter().map(|v| v.instance_path.as_str()).collect();
        assert!(paths.contains(&"/handle"));
        assert!(paths.contains(&"/category"));
        assert!(paths.contains(&"/tags"));
    }

    #[test]
    fn test_validation_does_not_mutate_document() {
        let mut doc = conforming_entry_json();
        doc["handle"] = json!("bad handle");
        let before = doc.clone();
        let _ = validator().validate(&doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let err = SchemaValidator::new(&json!({ "type": 12 })).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSchema(_)));

        let err = SchemaValidator::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSchema(_)));
    }
}

// crates/serverless-contracts-core/tests/validation.rs
// ============================================================================
// Module: Schema Validation Tests
// Description: Tests for validation modes and the default validator.
// ============================================================================
//! ## Overview
//! Validates enforcement gating, mismatch reporting, and validator plugging.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use serde_json::Value;
use serde_json::json;
use serverless_contracts_core::JsonSchemaValidator;
use serverless_contracts_core::SchemaValidator;
use serverless_contracts_core::ValidationError;
use serverless_contracts_core::ValidationMode;
use serverless_contracts_core::ValidationSettings;

/// Validator that rejects everything.
struct RejectAll;

impl SchemaValidator for RejectAll {
    fn validate(
        &self,
        target: &str,
        _schema: &Value,
        _instance: &Value,
    ) -> Result<(), ValidationError> {
        Err(ValidationError::mismatch(target, "rejected"))
    }
}

#[test]
fn default_validator_reports_every_violation() {
    let schema = json!({
        "type": "object",
        "properties": { "a": { "type": "string" }, "b": { "type": "integer" } },
        "required": ["a", "b"]
    });
    assert!(JsonSchemaValidator.validate("input", &schema, &json!({ "a": "x", "b": 1 })).is_ok());
    let err = JsonSchemaValidator.validate("input", &schema, &json!({ "a": 1 })).unwrap_err();
    match err {
        ValidationError::SchemaMismatch {
            target,
            details,
        } => {
            assert_eq!(target, "input");
            assert!(details.len() >= 2);
        }
        ValidationError::InvalidSchema {
            ..
        } => panic!("unexpected invalid schema"),
    }
}

#[test]
fn uncompilable_schema_is_reported() {
    let err = JsonSchemaValidator
        .validate("output", &json!({ "type": "not-a-type" }), &json!(1))
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_schema");
}

#[test]
fn off_mode_never_validates() {
    let settings = ValidationSettings::off().with_validator(RejectAll);
    assert_eq!(settings.mode(), ValidationMode::Off);
    assert!(settings.check_input("input", &json!({}), &json!(null)).is_ok());
    assert!(settings.check_output("output", Some(&json!({})), &json!(null)).is_ok());
}

#[test]
fn enforce_mode_uses_plugged_validator() {
    let settings = ValidationSettings::enforce().with_validator(RejectAll);
    let err = settings.check_input("input", &json!({}), &json!({})).unwrap_err();
    assert_eq!(err.to_string(), "schema mismatch for input: rejected");
    assert!(settings.check_output("output", Some(&json!({})), &json!({})).is_err());
}

#[test]
fn absent_output_schema_is_never_checked() {
    let settings = ValidationSettings::enforce().with_validator(RejectAll);
    assert!(settings.check_output("output", None, &json!("anything")).is_ok());
}

#[test]
fn output_checks_can_be_disabled_while_enforcing_inputs() {
    let settings =
        ValidationSettings::from_mode(ValidationMode::Enforce, false).with_validator(RejectAll);
    assert!(!settings.validates_output());
    assert!(settings.check_output("output", Some(&json!({})), &json!({})).is_ok());
    assert!(settings.check_input("input", &json!({}), &json!({})).is_err());
}

#[test]
fn mode_parses_from_snake_case() {
    let mode: ValidationMode = serde_json::from_value(json!("enforce")).unwrap();
    assert_eq!(mode, ValidationMode::Enforce);
    assert_eq!(ValidationMode::default(), ValidationMode::Off);
}

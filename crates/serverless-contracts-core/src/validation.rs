// crates/serverless-contracts-core/src/validation.rs
// ============================================================================
// Module: Schema Validation
// Description: Pluggable JSON Schema validation for contract boundaries.
// Purpose: Enforce schema/value correspondence at decode and build boundaries.
// Dependencies: jsonschema, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Runtime enforcement is an explicit decision: [`ValidationMode::Off`] only
//! relies on structural typing, while [`ValidationMode::Enforce`] runs a
//! [`SchemaValidator`] on every value that crosses a contract boundary.
//! [`JsonSchemaValidator`] is the default validator, backed by `jsonschema`
//! with draft 2020-12.
//! Invariants:
//! - Absent schemas are never checked; the channel does not exist.
//! - Schemas are compiled per check and never cached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use jsonschema::Draft;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A value does not conform to its schema.
    #[error("schema mismatch for {target}: {}", details.join("; "))]
    SchemaMismatch {
        /// Boundary label (`input`, `output`, `payload`, ...).
        target: String,
        /// Validator messages.
        details: Vec<String>,
    },
    /// The schema itself could not be compiled.
    #[error("invalid schema for {target}: {message}")]
    InvalidSchema {
        /// Boundary label.
        target: String,
        /// Compiler message.
        message: String,
    },
}

impl ValidationError {
    /// Builds a schema mismatch with a single detail message.
    #[must_use]
    pub fn mismatch(target: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            target: target.into(),
            details: vec![detail.into()],
        }
    }

    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SchemaMismatch {
                ..
            } => "schema_mismatch",
            Self::InvalidSchema {
                ..
            } => "invalid_schema",
        }
    }
}

// ============================================================================
// SECTION: Validator Trait
// ============================================================================

/// Validates JSON values against JSON schemas.
pub trait SchemaValidator: Send + Sync {
    /// Checks `instance` against `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the schema is invalid or the instance does not conform.
    fn validate(&self, target: &str, schema: &Value, instance: &Value)
    -> Result<(), ValidationError>;
}

/// `jsonschema`-backed validator (draft 2020-12).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(
        &self,
        target: &str,
        schema: &Value,
        instance: &Value,
    ) -> Result<(), ValidationError> {
        let validator = jsonschema::options().with_draft(Draft::Draft202012).build(schema).map_err(
            |err| ValidationError::InvalidSchema {
                target: target.to_string(),
                message: err.to_string(),
            },
        )?;
        let details: Vec<String> =
            validator.iter_errors(instance).map(|err| err.to_string()).collect();
        if details.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::SchemaMismatch {
                target: target.to_string(),
                details,
            })
        }
    }
}

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Whether schema validation is enforced at contract boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Structural typing only.
    #[default]
    Off,
    /// Validate every boundary value against its schema.
    Enforce,
}

/// Validation policy shared by server adapters and client executors.
///
/// # Invariants
/// - Checks are no-ops when `mode` is [`ValidationMode::Off`].
/// - Output checks additionally require `validate_output`.
#[derive(Clone)]
pub struct ValidationSettings {
    /// Enforcement mode.
    mode: ValidationMode,
    /// Whether output values are checked as well as inputs.
    validate_output: bool,
    /// Validator used when enforcing.
    validator: Arc<dyn SchemaValidator>,
}

impl ValidationSettings {
    /// Returns settings that never validate.
    #[must_use]
    pub fn off() -> Self {
        Self {
            mode: ValidationMode::Off,
            validate_output: false,
            validator: Arc::new(JsonSchemaValidator),
        }
    }

    /// Returns settings enforcing inputs and outputs with [`JsonSchemaValidator`].
    #[must_use]
    pub fn enforce() -> Self {
        Self {
            mode: ValidationMode::Enforce,
            validate_output: true,
            validator: Arc::new(JsonSchemaValidator),
        }
    }

    /// Returns settings for `mode` with [`JsonSchemaValidator`].
    #[must_use]
    pub fn from_mode(mode: ValidationMode, validate_output: bool) -> Self {
        Self {
            mode,
            validate_output,
            validator: Arc::new(JsonSchemaValidator),
        }
    }

    /// Replaces the validator implementation.
    #[must_use]
    pub fn with_validator(mut self, validator: impl SchemaValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Returns the enforcement mode.
    #[must_use]
    pub const fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Returns true when output values are checked.
    #[must_use]
    pub const fn validates_output(&self) -> bool {
        self.validate_output && matches!(self.mode, ValidationMode::Enforce)
    }

    /// Checks an input value against `schema` when enforcing.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when enforcement rejects the value.
    pub fn check_input(
        &self,
        target: &str,
        schema: &Value,
        instance: &Value,
    ) -> Result<(), ValidationError> {
        match self.mode {
            ValidationMode::Off => Ok(()),
            ValidationMode::Enforce => self.validator.validate(target, schema, instance),
        }
    }

    /// Checks an output value against `schema` when output enforcement is on.
    ///
    /// An absent schema is never checked.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when enforcement rejects the value.
    pub fn check_output(
        &self,
        target: &str,
        schema: Option<&Value>,
        instance: &Value,
    ) -> Result<(), ValidationError> {
        match schema {
            Some(schema) if self.validates_output() => {
                self.validator.validate(target, schema, instance)
            }
            _ => Ok(()),
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self::off()
    }
}

impl fmt::Debug for ValidationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSettings")
            .field("mode", &self.mode)
            .field("validate_output", &self.validate_output)
            .finish_non_exhaustive()
    }
}

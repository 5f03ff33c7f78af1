// crates/serverless-contracts-core/src/contract.rs
// ============================================================================
// Module: API Gateway Contract
// Description: Immutable contract model and aggregate input schema composition.
// Purpose: Bind route, method, and input/output schemas in one declaration.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`ApiGatewayContract`] is the single source of truth for one HTTP-triggered
//! function. It is built once through [`ApiGatewayContract::builder`] (or
//! deserialized from an [`ApiGatewayContractSpec`]) and never mutated.
//! Invariants:
//! - Path, query-string, and header schemas are object schemas with string-valued
//!   properties, because their values originate from URL and header text.
//! - Every placeholder in `path` is declared in the path-parameters schema.
//! - Absent schemas mean "this channel does not exist"; they are never replaced by `{}`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::http::AuthorizerType;
use crate::http::HttpMethod;
use crate::http::IntegrationType;
use crate::template::path_template_placeholders;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing a contract.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// Contract declaration is structurally invalid.
    #[error("invalid contract: {0}")]
    InvalidContract(String),
}

impl ContractError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidContract(_) => "invalid_contract",
        }
    }
}

// ============================================================================
// SECTION: Input Channels
// ============================================================================

/// Input channel of an HTTP invocation.
///
/// # Invariants
/// - [`InputChannel::ALL`] lists channels in aggregate-schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputChannel {
    /// URL path parameters.
    PathParameters,
    /// URL query-string parameters.
    QueryStringParameters,
    /// Request headers.
    Headers,
    /// JSON request body.
    Body,
}

impl InputChannel {
    /// All channels in aggregate-schema order.
    pub const ALL: [Self; 4] =
        [Self::PathParameters, Self::QueryStringParameters, Self::Headers, Self::Body];

    /// Returns the camelCase property name used on the wire and in schemas.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathParameters => "pathParameters",
            Self::QueryStringParameters => "queryStringParameters",
            Self::Headers => "headers",
            Self::Body => "body",
        }
    }

    /// Returns true for channels restricted to flat string maps.
    #[must_use]
    pub const fn is_constrained(self) -> bool {
        !matches!(self, Self::Body)
    }
}

impl fmt::Display for InputChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Contract Declaration
// ============================================================================

/// Plain declaration of an API Gateway contract, prior to validation.
///
/// This is the serialized form of [`ApiGatewayContract`]; converting it with
/// [`TryFrom`] runs the structural checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayContractSpec {
    /// Stable identifier, unique within a deployment unit.
    pub id: String,
    /// Route template (for example `/users/{userId}`).
    pub path: String,
    /// HTTP verb.
    pub method: HttpMethod,
    /// Integration flavor.
    pub integration_type: IntegrationType,
    /// Authorizer flavor.
    #[serde(default)]
    pub authorizer_type: AuthorizerType,
    /// Path parameters schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters_schema: Option<Value>,
    /// Query-string parameters schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters_schema: Option<Value>,
    /// Headers schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_schema: Option<Value>,
    /// Body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_schema: Option<Value>,
    /// Output schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

// ============================================================================
// SECTION: Contract
// ============================================================================

/// Immutable API Gateway contract.
///
/// # Invariants
/// - Constructed only through [`ApiGatewayContractSpec`] validation.
/// - Never mutated after construction; all derivations take `&self`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ApiGatewayContractSpec", into = "ApiGatewayContractSpec")]
pub struct ApiGatewayContract {
    /// Validated declaration.
    spec: ApiGatewayContractSpec,
}

impl ApiGatewayContract {
    /// Starts a contract declaration with the mandatory routing fields.
    #[must_use]
    pub fn builder(
        id: impl Into<String>,
        path: impl Into<String>,
        method: HttpMethod,
        integration_type: IntegrationType,
    ) -> ApiGatewayContractBuilder {
        ApiGatewayContractBuilder {
            spec: ApiGatewayContractSpec {
                id: id.into(),
                path: path.into(),
                method,
                integration_type,
                authorizer_type: AuthorizerType::None,
                path_parameters_schema: None,
                query_string_parameters_schema: None,
                headers_schema: None,
                body_schema: None,
                output_schema: None,
            },
        }
    }

    /// Returns the contract identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    /// Returns the route template.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.spec.path
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.spec.method
    }

    /// Returns the integration flavor.
    #[must_use]
    pub const fn integration_type(&self) -> IntegrationType {
        self.spec.integration_type
    }

    /// Returns the authorizer flavor.
    #[must_use]
    pub const fn authorizer_type(&self) -> AuthorizerType {
        self.spec.authorizer_type
    }

    /// Returns the path parameters schema, if declared.
    #[must_use]
    pub const fn path_parameters_schema(&self) -> Option<&Value> {
        self.spec.path_parameters_schema.as_ref()
    }

    /// Returns the query-string parameters schema, if declared.
    #[must_use]
    pub const fn query_string_parameters_schema(&self) -> Option<&Value> {
        self.spec.query_string_parameters_schema.as_ref()
    }

    /// Returns the headers schema, if declared.
    #[must_use]
    pub const fn headers_schema(&self) -> Option<&Value> {
        self.spec.headers_schema.as_ref()
    }

    /// Returns the body schema, if declared.
    #[must_use]
    pub const fn body_schema(&self) -> Option<&Value> {
        self.spec.body_schema.as_ref()
    }

    /// Returns the output schema, if declared.
    #[must_use]
    pub const fn output_schema(&self) -> Option<&Value> {
        self.spec.output_schema.as_ref()
    }

    /// Returns the schema declared for `channel`, if any.
    #[must_use]
    pub const fn channel_schema(&self, channel: InputChannel) -> Option<&Value> {
        match channel {
            InputChannel::PathParameters => self.path_parameters_schema(),
            InputChannel::QueryStringParameters => self.query_string_parameters_schema(),
            InputChannel::Headers => self.headers_schema(),
            InputChannel::Body => self.body_schema(),
        }
    }

    /// Returns the declared input channels in aggregate-schema order.
    #[must_use]
    pub fn declared_channels(&self) -> Vec<InputChannel> {
        InputChannel::ALL
            .into_iter()
            .filter(|channel| self.channel_schema(*channel).is_some())
            .collect()
    }

    /// Returns true when a caller must supply a value for `channel`.
    ///
    /// A declared channel needs a value when its schema lists required fields or
    /// describes a non-object value. Undeclared channels never need one.
    #[must_use]
    pub fn channel_requires_value(&self, channel: InputChannel) -> bool {
        self.channel_schema(channel).is_some_and(schema_requires_value)
    }

    /// Returns the aggregate input schema; see [`compose_input_schema`].
    #[must_use]
    pub fn input_schema(&self) -> Value {
        compose_input_schema(self)
    }

    /// Returns the underlying declaration.
    #[must_use]
    pub const fn spec(&self) -> &ApiGatewayContractSpec {
        &self.spec
    }
}

impl TryFrom<ApiGatewayContractSpec> for ApiGatewayContract {
    type Error = ContractError;

    fn try_from(spec: ApiGatewayContractSpec) -> Result<Self, Self::Error> {
        check_spec(&spec)?;
        Ok(Self {
            spec,
        })
    }
}

impl From<ApiGatewayContract> for ApiGatewayContractSpec {
    fn from(contract: ApiGatewayContract) -> Self {
        contract.spec
    }
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`ApiGatewayContract`].
///
/// # Invariants
/// - `build` runs the same structural checks as deserialization.
#[derive(Debug, Clone)]
pub struct ApiGatewayContractBuilder {
    /// Declaration under construction.
    spec: ApiGatewayContractSpec,
}

impl ApiGatewayContractBuilder {
    /// Sets the authorizer flavor.
    #[must_use]
    pub const fn authorizer_type(mut self, authorizer_type: AuthorizerType) -> Self {
        self.spec.authorizer_type = authorizer_type;
        self
    }

    /// Declares the path parameters channel.
    #[must_use]
    pub fn path_parameters_schema(mut self, schema: Value) -> Self {
        self.spec.path_parameters_schema = Some(schema);
        self
    }

    /// Declares the query-string parameters channel.
    #[must_use]
    pub fn query_string_parameters_schema(mut self, schema: Value) -> Self {
        self.spec.query_string_parameters_schema = Some(schema);
        self
    }

    /// Declares the headers channel.
    #[must_use]
    pub fn headers_schema(mut self, schema: Value) -> Self {
        self.spec.headers_schema = Some(schema);
        self
    }

    /// Declares the body channel.
    #[must_use]
    pub fn body_schema(mut self, schema: Value) -> Self {
        self.spec.body_schema = Some(schema);
        self
    }

    /// Declares the output shape.
    #[must_use]
    pub fn output_schema(mut self, schema: Value) -> Self {
        self.spec.output_schema = Some(schema);
        self
    }

    /// Validates the declaration and returns the immutable contract.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidContract`] when the declaration is structurally invalid.
    pub fn build(self) -> Result<ApiGatewayContract, ContractError> {
        ApiGatewayContract::try_from(self.spec)
    }
}

// ============================================================================
// SECTION: Aggregate Input Schema
// ============================================================================

/// Composes the aggregate input schema of `contract`.
///
/// The result is an object schema whose properties are exactly the declared
/// channels (keyed by [`InputChannel::as_str`]) and whose `required` list names
/// every one of them, in [`InputChannel::ALL`] order. Each call builds a fresh
/// value.
#[must_use]
pub fn compose_input_schema(contract: &ApiGatewayContract) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for channel in InputChannel::ALL {
        if let Some(schema) = contract.channel_schema(channel) {
            properties.insert(channel.as_str().to_string(), schema.clone());
            required.push(Value::String(channel.as_str().to_string()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": true,
    })
}

// ============================================================================
// SECTION: Structural Checks
// ============================================================================

/// Builds an invalid-contract error.
fn invalid(message: impl Into<String>) -> ContractError {
    ContractError::InvalidContract(message.into())
}

/// Runs every structural check on a declaration.
fn check_spec(spec: &ApiGatewayContractSpec) -> Result<(), ContractError> {
    if spec.id.trim().is_empty() {
        return Err(invalid("contract id must not be empty"));
    }
    if !spec.path.starts_with('/') {
        return Err(invalid(format!("contract {} path must start with '/'", spec.id)));
    }
    for channel in InputChannel::ALL {
        let schema = match channel {
            InputChannel::PathParameters => spec.path_parameters_schema.as_ref(),
            InputChannel::QueryStringParameters => spec.query_string_parameters_schema.as_ref(),
            InputChannel::Headers => spec.headers_schema.as_ref(),
            InputChannel::Body => spec.body_schema.as_ref(),
        };
        if let Some(schema) = schema {
            if channel.is_constrained() {
                check_constrained_schema(channel, schema)?;
            } else {
                check_free_schema(channel.as_str(), schema)?;
            }
        }
    }
    if let Some(schema) = &spec.output_schema {
        check_free_schema("output", schema)?;
    }
    check_placeholders(spec)
}

/// Ensures every path placeholder is declared in the path parameters schema.
fn check_placeholders(spec: &ApiGatewayContractSpec) -> Result<(), ContractError> {
    let placeholders = path_template_placeholders(&spec.path)
        .map_err(|err| invalid(format!("contract {}: {err}", spec.id)))?;
    if placeholders.is_empty() {
        return Ok(());
    }
    let Some(schema) = &spec.path_parameters_schema else {
        return Err(invalid(format!(
            "contract {} path declares placeholders but no pathParametersSchema",
            spec.id
        )));
    };
    let declared = schema.get("properties").and_then(Value::as_object);
    for name in placeholders {
        if !declared.is_some_and(|properties| properties.contains_key(name)) {
            return Err(invalid(format!(
                "contract {} placeholder {name} is not declared in pathParametersSchema",
                spec.id
            )));
        }
    }
    Ok(())
}

/// Ensures a schema is a JSON object or boolean schema.
fn check_free_schema(label: &str, schema: &Value) -> Result<(), ContractError> {
    if schema.is_object() || schema.is_boolean() {
        Ok(())
    } else {
        Err(invalid(format!("{label} schema must be an object or boolean schema")))
    }
}

/// Ensures a constrained schema is an object schema with string-valued properties.
fn check_constrained_schema(channel: InputChannel, schema: &Value) -> Result<(), ContractError> {
    let Some(object) = schema.as_object() else {
        return Err(invalid(format!("{channel} schema must be a JSON object")));
    };
    if let Some(kind) = object.get("type")
        && kind.as_str() != Some("object")
    {
        return Err(invalid(format!("{channel} schema must have type \"object\"")));
    }
    if let Some(properties) = object.get("properties") {
        let Some(properties) = properties.as_object() else {
            return Err(invalid(format!("{channel} schema properties must be an object")));
        };
        for (name, property) in properties {
            if !is_string_schema(property) {
                return Err(invalid(format!("{channel} property {name} must be string-valued")));
            }
        }
    }
    if let Some(required) = object.get("required") {
        let all_strings =
            required.as_array().is_some_and(|entries| entries.iter().all(Value::is_string));
        if !all_strings {
            return Err(invalid(format!("{channel} schema required must list property names")));
        }
    }
    Ok(())
}

/// Returns true when a property schema only admits strings.
fn is_string_schema(schema: &Value) -> bool {
    let Some(object) = schema.as_object() else {
        return false;
    };
    if let Some(kind) = object.get("type") {
        return kind.as_str() == Some("string");
    }
    if let Some(options) = object.get("enum") {
        return options.as_array().is_some_and(|values| values.iter().all(Value::is_string));
    }
    object.get("const").is_some_and(Value::is_string)
}

/// Returns true when a channel schema forces the caller to supply a value.
fn schema_requires_value(schema: &Value) -> bool {
    let declares_required = schema
        .get("required")
        .and_then(Value::as_array)
        .is_some_and(|required| !required.is_empty());
    let non_object = schema.get("type").and_then(Value::as_str).is_some_and(|kind| kind != "object");
    declares_required || non_object
}

#[cfg(test)]
mod tests;

// crates/serverless-contracts-client/src/request.rs
// ============================================================================
// Module: Request Builder
// Description: Request arguments and transport-neutral request descriptors.
// Purpose: Assemble outbound requests that match the contract exactly.
// Dependencies: percent-encoding, serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! [`build_request`] fills the path template first, then checks that the
//! supplied channels agree with the contract: a channel the contract does not
//! declare may not be supplied, and a declared channel whose schema requires
//! a value may not be omitted.
//! Invariants:
//! - Absent channels are omitted from the descriptor, never defaulted.
//! - Path parameter values are percent-encoded into their own segment, so a
//!   value can never reach a route the contract does not declare. Greedy
//!   placeholders (`{proxy+}`) keep `/` separators but encode each segment.
//! - Other channel values are carried verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::HttpMethod;
use serverless_contracts_core::InputChannel;
use serverless_contracts_core::ValidationError;
use serverless_contracts_core::fill_path_template;

use crate::error::ClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Characters escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// Caller-supplied request channels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestArguments {
    /// Values for the path template placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<BTreeMap<String, String>>,
    /// Query string parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestArguments {
    /// Returns empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }

    /// Adds a query string parameter.
    #[must_use]
    pub fn query_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.get_or_insert_with(BTreeMap::new).insert(name.into(), value.into());
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns whether `channel` was supplied.
    #[must_use]
    pub const fn supplies(&self, channel: InputChannel) -> bool {
        match channel {
            InputChannel::PathParameters => self.path_parameters.is_some(),
            InputChannel::QueryStringParameters => self.query_string_parameters.is_some(),
            InputChannel::Headers => self.headers.is_some(),
            InputChannel::Body => self.body.is_some(),
        }
    }

    /// Returns the supplied channels as a JSON object.
    ///
    /// This is the value checked against the contract's aggregate input schema.
    #[must_use]
    pub fn input_value(&self) -> Value {
        let mut input = Map::new();
        for (channel, params) in [
            (InputChannel::PathParameters, &self.path_parameters),
            (InputChannel::QueryStringParameters, &self.query_string_parameters),
            (InputChannel::Headers, &self.headers),
        ] {
            if let Some(params) = params {
                let object = params
                    .iter()
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect();
                input.insert(channel.as_str().to_string(), Value::Object(object));
            }
        }
        if let Some(body) = &self.body {
            input.insert(InputChannel::Body.as_str().to_string(), body.clone());
        }
        Value::Object(input)
    }
}

// ============================================================================
// SECTION: Descriptor
// ============================================================================

/// Transport-neutral outbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescriptor {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path with placeholders substituted.
    pub path: String,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Query string parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// JSON body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

// ============================================================================
// SECTION: Building
// ============================================================================

/// Builds the request descriptor for `contract` from `args`.
///
/// # Errors
///
/// Returns [`ClientError::Template`] when a placeholder has no value and
/// [`ClientError::Validation`] when a path value is an empty or dot segment,
/// a supplied channel is undeclared, or a required channel is missing.
pub fn build_request(
    contract: &ApiGatewayContract,
    args: RequestArguments,
) -> Result<RequestDescriptor, ClientError> {
    let encoded = match &args.path_parameters {
        Some(values) => encode_path_values(contract, values)?,
        None => BTreeMap::new(),
    };
    let path = fill_path_template(contract.path(), &encoded)?;
    check_channels(contract, &args)?;
    Ok(RequestDescriptor {
        method: contract.method(),
        path,
        headers: args.headers,
        query_string_parameters: args.query_string_parameters,
        body: args.body,
    })
}

/// Percent-encodes path values, rejecting segments that would change the route.
fn encode_path_values(
    contract: &ApiGatewayContract,
    values: &BTreeMap<String, String>,
) -> Result<BTreeMap<String, String>, ClientError> {
    let mut encoded = BTreeMap::new();
    for (name, value) in values {
        let segments: Vec<&str> =
            if name.ends_with('+') { value.split('/').collect() } else { vec![value.as_str()] };
        let mut parts = Vec::with_capacity(segments.len());
        for segment in segments {
            if matches!(segment, "" | "." | "..") {
                return Err(ValidationError::mismatch(
                    "input",
                    format!(
                        "path parameter {name} of contract {} must not contain empty or dot segments",
                        contract.id()
                    ),
                )
                .into());
            }
            parts.push(utf8_percent_encode(segment, PATH_SEGMENT).to_string());
        }
        encoded.insert(name.clone(), parts.join("/"));
    }
    Ok(encoded)
}

/// Rejects undeclared channels and missing required channels.
fn check_channels(contract: &ApiGatewayContract, args: &RequestArguments) -> Result<(), ClientError> {
    for channel in InputChannel::ALL {
        let declared = contract.channel_schema(channel).is_some();
        let supplied = args.supplies(channel);
        if supplied && !declared {
            return Err(ValidationError::mismatch(
                "input",
                format!("{channel} is not declared by contract {}", contract.id()),
            )
            .into());
        }
        if !supplied && contract.channel_requires_value(channel) {
            return Err(ValidationError::mismatch(
                "input",
                format!("{channel} is required by contract {}", contract.id()),
            )
            .into());
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;

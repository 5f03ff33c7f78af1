// crates/serverless-contracts-server/src/event.rs
// ============================================================================
// Module: Invocation Events
// Description: Wire-level and parsed invocation event types.
// Purpose: Turn a platform invocation envelope into the handler's input.
// Dependencies: base64, serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! [`RawEvent`] mirrors the platform envelope (camelCase wire names).
//! [`decode_event`] produces a [`ParsedEvent`]: parameter maps pass through
//! unchanged, the body is decoded from JSON text, and the request context is
//! decoded per the contract's integration and authorizer types.
//! Invariants:
//! - An absent or `null` body yields no `body` key; it is never `{}`.
//! - Base64 bodies are decoded before JSON decoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::InputChannel;

use crate::context::RequestContext;
use crate::context::decode_request_context;
use crate::error::ServerError;

// ============================================================================
// SECTION: Raw Event
// ============================================================================

/// Wire-level invocation event as delivered by the platform dispatcher.
///
/// Fields not listed here (`rawPath`, `multiValueHeaders`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Path parameters; `null` when the route has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<BTreeMap<String, String>>,
    /// Query string parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// Request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Body text; `null` when no body was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Whether `body` is base64 encoded.
    #[serde(default)]
    pub is_base64_encoded: bool,
    /// Platform request context.
    #[serde(default)]
    pub request_context: Value,
}

impl RawEvent {
    /// Reads a raw event from its JSON envelope.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidEvent`] when the envelope shape is wrong.
    pub fn from_value(value: Value) -> Result<Self, ServerError> {
        serde_json::from_value(value).map_err(|err| ServerError::InvalidEvent(err.to_string()))
    }
}

// ============================================================================
// SECTION: Parsed Event
// ============================================================================

/// Handler input derived from a raw event.
///
/// # Invariants
/// - `body` is `None` exactly when the wire body was absent or `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEvent {
    /// Decoded request context.
    pub request_context: RequestContext,
    /// Path parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_parameters: Option<BTreeMap<String, String>>,
    /// Query string parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,
    /// Request headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Decoded JSON body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ParsedEvent {
    /// Returns a path parameter by name.
    #[must_use]
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.as_ref()?.get(name).map(String::as_str)
    }

    /// Returns a query string parameter by name.
    #[must_use]
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_string_parameters.as_ref()?.get(name).map(String::as_str)
    }

    /// Returns a header by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .as_ref()?
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Deserializes the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::BodyDecode`] when the body is absent or does not
    /// match `T`.
    pub fn body_as<T: DeserializeOwned>(&self) -> Result<T, ServerError> {
        let body =
            self.body.clone().ok_or_else(|| ServerError::BodyDecode("body is absent".to_string()))?;
        serde_json::from_value(body).map_err(|err| ServerError::BodyDecode(err.to_string()))
    }

    /// Returns the input channels as a JSON object, omitting absent channels.
    ///
    /// This is the value checked against the contract's aggregate input schema.
    #[must_use]
    pub fn input_value(&self) -> Value {
        let mut input = Map::new();
        insert_params(&mut input, InputChannel::PathParameters, self.path_parameters.as_ref());
        insert_params(
            &mut input,
            InputChannel::QueryStringParameters,
            self.query_string_parameters.as_ref(),
        );
        insert_params(&mut input, InputChannel::Headers, self.headers.as_ref());
        if let Some(body) = &self.body {
            input.insert(InputChannel::Body.as_str().to_string(), body.clone());
        }
        Value::Object(input)
    }
}

/// Inserts a parameter map under its channel key when present.
fn insert_params(
    input: &mut Map<String, Value>,
    channel: InputChannel,
    params: Option<&BTreeMap<String, String>>,
) {
    if let Some(params) = params {
        let object =
            params.iter().map(|(key, value)| (key.clone(), Value::String(value.clone()))).collect();
        input.insert(channel.as_str().to_string(), Value::Object(object));
    }
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes a raw invocation event for `contract`.
///
/// # Errors
///
/// Returns [`ServerError::BodyDecode`] for malformed base64 or JSON bodies and
/// [`ServerError::MissingAuthorizerContext`] when a declared authorizer's
/// section is absent.
pub fn decode_event(contract: &ApiGatewayContract, raw: RawEvent) -> Result<ParsedEvent, ServerError> {
    let body = match raw.body {
        Some(text) => Some(decode_body(&text, raw.is_base64_encoded)?),
        None => None,
    };
    let request_context = decode_request_context(contract, raw.request_context)?;
    Ok(ParsedEvent {
        request_context,
        path_parameters: raw.path_parameters,
        query_string_parameters: raw.query_string_parameters,
        headers: raw.headers,
        body,
    })
}

/// Decodes body text, unwrapping base64 when flagged.
fn decode_body(text: &str, is_base64_encoded: bool) -> Result<Value, ServerError> {
    if is_base64_encoded {
        let bytes = STANDARD
            .decode(text)
            .map_err(|err| ServerError::BodyDecode(format!("invalid base64 body: {err}")))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| ServerError::BodyDecode(format!("invalid json body: {err}")))
    } else {
        serde_json::from_str(text)
            .map_err(|err| ServerError::BodyDecode(format!("invalid json body: {err}")))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

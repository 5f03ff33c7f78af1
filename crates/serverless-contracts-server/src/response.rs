// crates/serverless-contracts-server/src/response.rs
// ============================================================================
// Module: Response Envelope
// Description: Wire-level response produced from handler output.
// Purpose: Encode handler results into the platform response envelope.
// Dependencies: serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! Successful invocations always produce status 200. The body is the JSON
//! text of the handler output when the contract declares an output schema,
//! and is omitted entirely otherwise. The body text is serialized from the
//! handler output directly, so field order follows the output type.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::ValidationSettings;

use crate::error::ServerError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Status code for successful invocations.
const SUCCESS_STATUS: u16 = 200;

/// Wire-level invocation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// JSON response text; absent when the contract declares no output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl WireResponse {
    /// Decodes the body text into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::BodyDecode`] when the body is not valid JSON for `T`.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<Option<T>, ServerError> {
        self.body
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|err| ServerError::BodyDecode(err.to_string()))
    }
}

// ============================================================================
// SECTION: Encoding
// ============================================================================

/// Encodes handler output into a response envelope for `contract`.
///
/// # Errors
///
/// Returns [`ServerError::Encode`] when the output cannot be serialized and
/// [`ServerError::Validation`] when enforced output validation fails.
pub fn encode_response<O: Serialize>(
    contract: &ApiGatewayContract,
    validation: &ValidationSettings,
    output: &O,
) -> Result<WireResponse, ServerError> {
    let Some(schema) = contract.output_schema() else {
        return Ok(WireResponse {
            status_code: SUCCESS_STATUS,
            body: None,
        });
    };
    let value = serde_json::to_value(output).map_err(|err| ServerError::Encode(err.to_string()))?;
    validation.check_output("output", Some(schema), &value)?;
    let body = serde_json::to_string(output).map_err(|err| ServerError::Encode(err.to_string()))?;
    Ok(WireResponse {
        status_code: SUCCESS_STATUS,
        body: Some(body),
    })
}

// crates/serverless-contracts-server/src/context.rs
// ============================================================================
// Module: Request Context Decoding
// Description: Typed view of the invocation request context.
// Purpose: Surface authorizer claims in the shape selected by the contract.
// Dependencies: serde, serde_json, serverless-contracts-core
// ============================================================================

//! ## Overview
//! The authorizer section is read from the same paths for REST (V1) and HTTP
//! (V2) envelopes:
//! - `cognito`: `authorizer.claims`
//! - `jwt`: `authorizer.jwt.claims` and `authorizer.jwt.scopes`
//! - `lambda`: `authorizer.lambda`
//!
//! The caller address differs per envelope: `identity.sourceIp` for V1 and
//! `http.sourceIp` for V2.
//! Invariants:
//! - A contract declaring an authorizer never yields [`AuthorizerContext::None`].
//! - The raw request context is retained unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serverless_contracts_core::ApiGatewayContract;
use serverless_contracts_core::AuthorizerType;
use serverless_contracts_core::IntegrationType;

use crate::error::ServerError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Authorizer-derived context attached to a parsed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthorizerContext {
    /// No authorizer on the route.
    None,
    /// Cognito user pool claims.
    Cognito {
        /// Token claims.
        claims: Map<String, Value>,
    },
    /// JWT authorizer claims and scopes.
    Jwt {
        /// Token claims.
        claims: Map<String, Value>,
        /// Granted scopes; empty when the token carries none.
        scopes: Vec<String>,
    },
    /// Custom Lambda authorizer context.
    Lambda {
        /// Context returned by the authorizer function.
        context: Value,
    },
}

impl AuthorizerContext {
    /// Returns the token claims for Cognito and JWT authorizers.
    #[must_use]
    pub const fn claims(&self) -> Option<&Map<String, Value>> {
        match self {
            Self::Cognito {
                claims,
            }
            | Self::Jwt {
                claims, ..
            } => Some(claims),
            Self::None
            | Self::Lambda {
                ..
            } => None,
        }
    }
}

/// Typed request context of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    /// Envelope flavor the context was decoded from.
    pub integration_type: IntegrationType,
    /// Platform request identifier.
    pub request_id: Option<String>,
    /// Caller IP address.
    pub source_ip: Option<String>,
    /// Authorizer-derived context.
    pub authorizer: AuthorizerContext,
    /// Unmodified request context.
    pub raw: Value,
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

/// Decodes the request context for `contract`.
///
/// # Errors
///
/// Returns [`ServerError::MissingAuthorizerContext`] when the contract
/// declares an authorizer whose section is absent.
pub fn decode_request_context(
    contract: &ApiGatewayContract,
    raw: Value,
) -> Result<RequestContext, ServerError> {
    let integration_type = contract.integration_type();
    let authorizer = decode_authorizer(contract.authorizer_type(), &raw)?;
    let request_id = string_at(&raw, &["requestId"]);
    let source_ip = match integration_type {
        IntegrationType::RestApi => string_at(&raw, &["identity", "sourceIp"]),
        IntegrationType::HttpApi => string_at(&raw, &["http", "sourceIp"]),
    };
    Ok(RequestContext {
        integration_type,
        request_id,
        source_ip,
        authorizer,
        raw,
    })
}

/// Extracts the authorizer section selected by `authorizer_type`.
fn decode_authorizer(
    authorizer_type: AuthorizerType,
    raw: &Value,
) -> Result<AuthorizerContext, ServerError> {
    let missing = |field: &'static str| ServerError::MissingAuthorizerContext {
        authorizer: authorizer_type,
        field,
    };
    match authorizer_type {
        AuthorizerType::None => Ok(AuthorizerContext::None),
        AuthorizerType::Cognito => {
            let claims = object_at(raw, &["authorizer", "claims"])
                .ok_or_else(|| missing("authorizer.claims"))?;
            Ok(AuthorizerContext::Cognito {
                claims,
            })
        }
        AuthorizerType::Jwt => {
            let claims = object_at(raw, &["authorizer", "jwt", "claims"])
                .ok_or_else(|| missing("authorizer.jwt.claims"))?;
            let scopes = value_at(raw, &["authorizer", "jwt", "scopes"])
                .and_then(Value::as_array)
                .map(|scopes| scopes.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            Ok(AuthorizerContext::Jwt {
                claims,
                scopes,
            })
        }
        AuthorizerType::Lambda => {
            let context = value_at(raw, &["authorizer", "lambda"])
                .filter(|value| !value.is_null())
                .cloned()
                .ok_or_else(|| missing("authorizer.lambda"))?;
            Ok(AuthorizerContext::Lambda {
                context,
            })
        }
    }
}

/// Walks `path` through nested objects.
fn value_at<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |value, key| value.get(key))
}

/// Returns a cloned object at `path`.
fn object_at(root: &Value, path: &[&str]) -> Option<Map<String, Value>> {
    value_at(root, path).and_then(Value::as_object).cloned()
}

/// Returns an owned string at `path`.
fn string_at(root: &Value, path: &[&str]) -> Option<String> {
    value_at(root, path).and_then(Value::as_str).map(str::to_string)
}

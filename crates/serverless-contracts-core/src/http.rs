// crates/serverless-contracts-core/src/http.rs
// ============================================================================
// Module: HTTP Vocabulary
// Description: Closed enumerations for methods, integration types, and authorizers.
// Purpose: Give every contract axis a stable, serializable wire form.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The integration and authorizer axes are closed sets. Each variant maps to
//! exactly one trigger-descriptor shape and one request-context shape; callers
//! resolve them with `match`, never with open extension points.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::contract::ContractError;
use crate::trigger::TriggerKind;

// ============================================================================
// SECTION: HTTP Method
// ============================================================================

/// HTTP verb bound to a contract.
///
/// # Invariants
/// - Serializes as the upper-case verb (`GET`, `POST`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`.
    Get,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
    /// `HEAD`.
    Head,
    /// `OPTIONS`.
    Options,
}

impl HttpMethod {
    /// Returns the upper-case verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ContractError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(ContractError::InvalidContract(format!("unsupported http method: {raw}"))),
        }
    }
}

// ============================================================================
// SECTION: Integration Type
// ============================================================================

/// API Gateway integration flavor.
///
/// # Invariants
/// - `RestApi` uses the V1 event envelope and the `http` trigger key.
/// - `HttpApi` uses the V2 event envelope and the `httpApi` trigger key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegrationType {
    /// REST API (payload format 1.0).
    RestApi,
    /// HTTP API (payload format 2.0).
    HttpApi,
}

impl IntegrationType {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RestApi => "restApi",
            Self::HttpApi => "httpApi",
        }
    }

    /// Returns the trigger key used for route registration.
    #[must_use]
    pub const fn trigger_kind(self) -> TriggerKind {
        match self {
            Self::HttpApi => TriggerKind::HttpApi,
            Self::RestApi => TriggerKind::Http,
        }
    }
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Authorizer Type
// ============================================================================

/// Authorizer attached to the route, selecting the request-context claims shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizerType {
    /// No authorizer; no authorizer context is attached.
    #[default]
    None,
    /// Cognito user pool authorizer (`authorizer.claims`).
    Cognito,
    /// JWT authorizer (`authorizer.jwt.claims` and `authorizer.jwt.scopes`).
    Jwt,
    /// Custom Lambda authorizer (`authorizer.lambda`).
    Lambda,
}

impl AuthorizerType {
    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cognito => "cognito",
            Self::Jwt => "jwt",
            Self::Lambda => "lambda",
        }
    }
}

impl fmt::Display for AuthorizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// crates/serverless-contracts-core/src/trigger.rs
// ============================================================================
// Module: Trigger Descriptors
// Description: Route registration descriptors derived from contracts.
// Purpose: Tell deployment tooling how to route requests to a function.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A trigger descriptor is a single-entry map keyed by the trigger kind
//! (`http` for REST APIs, `httpApi` for HTTP APIs) whose value carries the
//! contract's `path` and `method`, optionally merged with platform
//! configuration such as authorizer wiring or CORS.
//! Invariants:
//! - The trigger kind is selected from the contract's integration type only.
//! - `path` and `method` always come from the contract, overriding caller configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde_json::Map;
use serde_json::Value;

use crate::contract::ApiGatewayContract;

// ============================================================================
// SECTION: Trigger Kind
// ============================================================================

/// Trigger key understood by the deployment tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// REST API event (`http`).
    #[serde(rename = "http")]
    Http,
    /// HTTP API event (`httpApi`).
    #[serde(rename = "httpApi")]
    HttpApi,
}

impl TriggerKind {
    /// Returns the trigger key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::HttpApi => "httpApi",
        }
    }
}

// ============================================================================
// SECTION: Trigger Descriptor
// ============================================================================

/// Route registration descriptor.
///
/// # Invariants
/// - `config` always contains `path` and `method` entries copied from the contract.
/// - Serializes as `{ "<kind>": { ...config } }`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerDescriptor {
    /// Trigger key.
    kind: TriggerKind,
    /// Trigger configuration, including `path` and `method`.
    config: Map<String, Value>,
}

impl TriggerDescriptor {
    /// Returns the trigger key.
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        self.kind
    }

    /// Returns the full trigger configuration.
    #[must_use]
    pub const fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Returns the routed path template.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.config.get("path").and_then(Value::as_str)
    }

    /// Returns the routed HTTP verb.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.config.get("method").and_then(Value::as_str)
    }

    /// Returns the descriptor as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut outer = Map::new();
        outer.insert(self.kind.as_str().to_string(), Value::Object(self.config.clone()));
        Value::Object(outer)
    }
}

impl Serialize for TriggerDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.kind.as_str(), &self.config)?;
        map.end()
    }
}

// ============================================================================
// SECTION: Derivations
// ============================================================================

/// Derives the simple trigger descriptor (`path` and `method` only).
#[must_use]
pub fn get_trigger(contract: &ApiGatewayContract) -> TriggerDescriptor {
    get_complete_trigger(contract, Map::new())
}

/// Derives the complete trigger descriptor, merging platform configuration.
///
/// `extra` is merged as-is; its `path` and `method` entries, if any, are
/// replaced by the contract's values.
#[must_use]
pub fn get_complete_trigger(
    contract: &ApiGatewayContract,
    extra: Map<String, Value>,
) -> TriggerDescriptor {
    let mut config = extra;
    config.insert("path".to_string(), Value::String(contract.path().to_string()));
    config.insert("method".to_string(), Value::String(contract.method().as_str().to_string()));
    TriggerDescriptor {
        kind: contract.integration_type().trigger_kind(),
        config,
    }
}

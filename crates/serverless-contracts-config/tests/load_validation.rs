//! Config load validation tests for serverless-contracts-config.
// crates/serverless-contracts-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, fields).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only panic-based assertions are permitted."
)]

use std::io::Write;
use std::path::Path;

use serverless_contracts_config::AuditSinkKind;
use serverless_contracts_config::ConfigError;
use serverless_contracts_config::ContractsConfig;
use serverless_contracts_config::MAX_CONFIG_FILE_SIZE;
use serverless_contracts_config::config_toml_example;
use serverless_contracts_core::AuditEvent;
use serverless_contracts_core::AuditEventParams;
use serverless_contracts_core::AuditOutcome;
use serverless_contracts_core::HttpMethod;
use serverless_contracts_core::ValidationMode;
use tempfile::NamedTempFile;

/// Result type for tests that report failures as messages.
type TestResult = Result<(), String>;

/// Asserts that config loading failed with an error containing `needle`.
fn assert_invalid(result: Result<ContractsConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Writes `content` to a fresh temp file.
fn write_config(content: &[u8]) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content).map_err(|err| err.to_string())?;
    Ok(file)
}

// ============================================================================
// SECTION: Load Guards
// ============================================================================

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    assert_invalid(ContractsConfig::load(Some(Path::new(&long_path))), "config path exceeds max length")
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(ContractsConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut content = String::from("# padding\n");
    content.push_str(&"#".repeat(MAX_CONFIG_FILE_SIZE));
    let file = write_config(content.as_bytes())?;
    assert_invalid(ContractsConfig::load(Some(file.path())), "exceeds size limit")
}

#[test]
fn load_rejects_non_utf8() -> TestResult {
    let file = write_config(&[0xff, 0xfe, 0x00])?;
    assert_invalid(ContractsConfig::load(Some(file.path())), "must be utf-8")
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let file = write_config(b"[validation]\nmode = \"off\"\nstrict = true\n")?;
    assert_invalid(ContractsConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let file = write_config(b"")?;
    let config = ContractsConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != ContractsConfig::default() {
        return Err(format!("unexpected config: {config:?}"));
    }
    if config.validation.mode != ValidationMode::Off || !config.validation.validate_output {
        return Err("unexpected validation defaults".to_string());
    }
    if config.client.timeout_ms != 30_000 {
        return Err("unexpected timeout default".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Field Validation
// ============================================================================

#[test]
fn rejects_non_http_base_url() -> TestResult {
    assert_invalid(
        ContractsConfig::from_toml_str("[client]\nbase_url = \"ftp://example.com\"\n"),
        "must be an http or https url",
    )?;
    assert_invalid(
        ContractsConfig::from_toml_str("[client]\nbase_url = \"not a url\"\n"),
        "client.base_url is invalid",
    )
}

#[test]
fn rejects_timeout_out_of_range() -> TestResult {
    assert_invalid(ContractsConfig::from_toml_str("[client]\ntimeout_ms = 50\n"), "timeout_ms")?;
    assert_invalid(ContractsConfig::from_toml_str("[client]\ntimeout_ms = 60001\n"), "timeout_ms")
}

#[test]
fn rejects_too_many_default_headers() -> TestResult {
    let mut content = String::from("[client.default_headers]\n");
    for index in 0 ..= 64 {
        content.push_str(&format!("x-h{index} = \"v\"\n"));
    }
    assert_invalid(ContractsConfig::from_toml_str(&content), "exceeds 64 entries")
}

#[test]
fn rejects_invalid_header_names() -> TestResult {
    assert_invalid(
        ContractsConfig::from_toml_str("[client.default_headers]\n\"bad name\" = \"v\"\n"),
        "invalid header name",
    )
}

#[test]
fn file_sink_requires_path() -> TestResult {
    assert_invalid(ContractsConfig::from_toml_str("[audit]\nsink = \"file\"\n"), "audit.path is required")?;
    assert_invalid(
        ContractsConfig::from_toml_str("[audit]\nsink = \"stderr\"\npath = \"audit.log\"\n"),
        "only valid for file sink",
    )
}

#[test]
fn audit_path_limits_are_enforced() -> TestResult {
    assert_invalid(
        ContractsConfig::from_toml_str("[audit]\nsink = \"file\"\npath = \"  \"\n"),
        "audit.path must be non-empty",
    )?;
    let content = format!("[audit]\nsink = \"file\"\npath = \"logs/{}.jsonl\"\n", "a".repeat(300));
    assert_invalid(ContractsConfig::from_toml_str(&content), "audit.path component too long")
}

// ============================================================================
// SECTION: Runtime Conversion
// ============================================================================

#[test]
fn example_config_parses_and_converts() -> TestResult {
    let config = ContractsConfig::from_toml_str(&config_toml_example()).map_err(|err| err.to_string())?;
    let settings = config.validation_settings();
    if settings.mode() != ValidationMode::Enforce || !settings.validates_output() {
        return Err("example should enforce validation".to_string());
    }
    if config.audit.sink != AuditSinkKind::Stderr {
        return Err("example should use the stderr sink".to_string());
    }
    let transport = config.client_transport().map_err(|err| err.to_string())?;
    if transport.base_url().as_str() != "https://api.example.com/prod" {
        return Err(format!("unexpected base url {}", transport.base_url()));
    }
    Ok(())
}

#[test]
fn transport_requires_base_url() -> TestResult {
    match ContractsConfig::default().client_transport() {
        Err(err) if err.to_string().contains("client.base_url is required") => Ok(()),
        Err(err) => Err(format!("unexpected error {err}")),
        Ok(_) => Err("expected missing base url".to_string()),
    }
}

#[test]
fn file_audit_sink_appends_json_lines() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("audit.jsonl");
    let content = format!("[audit]\nsink = \"file\"\npath = '{}'\n", path.display());
    let config = ContractsConfig::from_toml_str(&content).map_err(|err| err.to_string())?;
    let sink = config.audit_sink().map_err(|err| err.to_string())?;
    sink.record(&AuditEvent::request(AuditEventParams {
        contract_id: "ping".to_string(),
        method: HttpMethod::Get,
        path: "/ping".to_string(),
        outcome: AuditOutcome::Ok,
        error_kind: None,
        status_code: Some(200),
        body_present: false,
    }));
    let written = std::fs::read_to_string(&path).map_err(|err| err.to_string())?;
    if written.lines().count() != 1 || !written.contains("\"contract_request\"") {
        return Err(format!("unexpected audit output {written}"));
    }
    Ok(())
}

// crates/serverless-contracts-core/src/template.rs
// ============================================================================
// Module: Path Templating
// Description: Named placeholder substitution for route templates.
// Purpose: Turn `/users/{userId}` plus parameter values into a concrete path.
// Dependencies: thiserror, std
// ============================================================================

//! ## Overview
//! Route templates contain `{name}` placeholders. Names are matched literally:
//! there is no nesting and no escaping, so API Gateway greedy names such as
//! `{proxy+}` are plain placeholder names here.
//! Invariants:
//! - The template is scanned once, left to right; substituted values are never re-scanned.
//! - A placeholder without a value is an error, never left in the output.
//! - Stray braces (`}` outside a placeholder, unterminated `{`, empty `{}`) are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing or filling a route template.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// No value was supplied for a placeholder.
    #[error("missing path parameter: {name}")]
    MissingPathParameter {
        /// Placeholder name without braces.
        name: String,
    },
    /// The template contains braces that do not form a placeholder.
    #[error("malformed path template {template}: {reason}")]
    MalformedPathTemplate {
        /// Offending template.
        template: String,
        /// Short description of the defect.
        reason: &'static str,
    },
}

impl TemplateError {
    /// Returns a stable label for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingPathParameter {
                ..
            } => "missing_path_parameter",
            Self::MalformedPathTemplate {
                ..
            } => "malformed_path_template",
        }
    }
}

// ============================================================================
// SECTION: Segments
// ============================================================================

/// Parsed piece of a route template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    /// Literal text copied verbatim.
    Literal(&'a str),
    /// Placeholder name (without braces).
    Placeholder(&'a str),
}

/// Builds a malformed-template error for `template`.
fn malformed(template: &str, reason: &'static str) -> TemplateError {
    TemplateError::MalformedPathTemplate {
        template: template.to_string(),
        reason,
    }
}

/// Splits a template into literal and placeholder segments.
fn parse_segments(template: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        if literal.contains('}') {
            return Err(malformed(template, "unmatched '}'"));
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        let tail = tail.strip_prefix('{').unwrap_or(tail);
        let Some(close) = tail.find('}') else {
            return Err(malformed(template, "unterminated placeholder"));
        };
        let (name, after) = tail.split_at(close);
        if name.is_empty() {
            return Err(malformed(template, "empty placeholder"));
        }
        if name.contains('{') {
            return Err(malformed(template, "nested placeholder"));
        }
        segments.push(Segment::Placeholder(name));
        rest = after.strip_prefix('}').unwrap_or(after);
    }
    if rest.contains('}') {
        return Err(malformed(template, "unmatched '}'"));
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Returns the placeholder names of `template` in order of appearance.
///
/// Duplicate placeholders are reported once per occurrence.
///
/// # Errors
///
/// Returns [`TemplateError::MalformedPathTemplate`] when the template braces are malformed.
pub fn path_template_placeholders(template: &str) -> Result<Vec<&str>, TemplateError> {
    Ok(parse_segments(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Substitutes every `{name}` placeholder in `template` with `values[name]`.
///
/// # Errors
///
/// Returns [`TemplateError::MissingPathParameter`] naming the first placeholder without a
/// value, or [`TemplateError::MalformedPathTemplate`] when the braces are malformed.
pub fn fill_path_template(
    template: &str,
    values: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let segments = parse_segments(template)?;
    let mut filled = String::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Literal(text) => filled.push_str(text),
            Segment::Placeholder(name) => {
                let value =
                    values.get(name).ok_or_else(|| TemplateError::MissingPathParameter {
                        name: name.to_string(),
                    })?;
                filled.push_str(value);
            }
        }
    }
    Ok(filled)
}

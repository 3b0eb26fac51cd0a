//! Field splitting and parsing for comma-separated log records

use uuid::Uuid;

use crate::types::*;

/// Location of a record, used to describe parse failures
#[derive(Debug, Clone, Copy)]
pub struct RecordContext<'a> {
    pub origin: &'a str,
    /// 1-based line number
    pub line: usize,
}

impl<'a> RecordContext<'a> {
    pub fn new(origin: &'a str, line: usize) -> Self {
        Self { origin, line }
    }

    /// Build a malformed-record error for this location
    pub fn malformed(&self, reason: impl Into<String>) -> SettlementError {
        SettlementError::MalformedRecord {
            origin: self.origin.to_string(),
            line: self.line,
            reason: reason.into(),
        }
    }
}

/// Split a record on commas, dropping trailing empty fields.
///
/// `a,b,,` yields `["a", "b"]` while `a,,b` keeps the empty middle field.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// Fetch a required column
pub fn require_field<'f>(
    fields: &[&'f str],
    index: usize,
    name: &str,
    ctx: &RecordContext<'_>,
) -> SettlementResult<&'f str> {
    fields
        .get(index)
        .copied()
        .ok_or_else(|| ctx.malformed(format!("missing {name} (column {})", index + 1)))
}

/// Whether a value has the 8-4-4-4-12 hyphenated layout
fn is_hyphenated(value: &str) -> bool {
    value.len() == 36
        && value
            .bytes()
            .enumerate()
            .all(|(i, b)| matches!(i, 8 | 13 | 18 | 23) == (b == b'-'))
}

/// Parse a UUID-shaped identifier.
///
/// Only the hyphenated form is accepted; simple, braced and URN forms are
/// rejected.
pub fn parse_identifier(value: &str, name: &str, ctx: &RecordContext<'_>) -> SettlementResult<Uuid> {
    if !is_hyphenated(value) {
        return Err(ctx.malformed(format!(
            "invalid {name} '{value}': expected hyphenated UUID"
        )));
    }
    Uuid::parse_str(value).map_err(|e| ctx.malformed(format!("invalid {name} '{value}': {e}")))
}

/// Parse an integer amount in minor currency units
pub fn parse_amount(value: &str, name: &str, ctx: &RecordContext<'_>) -> SettlementResult<i64> {
    value
        .parse::<i64>()
        .map_err(|e| ctx.malformed(format!("invalid {name} '{value}': {e}")))
}

/// Parse a decimal payout rate. Surrounding whitespace is ignored.
pub fn parse_rate(value: &str, name: &str, ctx: &RecordContext<'_>) -> SettlementResult<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|e| ctx.malformed(format!("invalid {name} '{value}': {e}")))
}

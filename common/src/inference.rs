//! Column type inference.
//!
//! A column is classified by testing its non-blank, trimmed values against a
//! fixed list of rules. The first rule that accepts *every* value decides the
//! type; a rule that rejects a single value is skipped. Rules, highest
//! priority first:
//!
//! 1. integer: optional sign followed by ASCII digits
//! 2. float: anything `f64` parses
//! 3. date: `YYYY-MM-DD`, `MM/DD/YYYY` or `MM-DD-YYYY` (shape only)
//! 4. boolean: `true false yes no 1 0 t f y n`, any case
//!
//! Columns with no usable values, or that match none of the rules, are
//! strings. Inference is total: it cannot fail and has no side effects.

use crate::model::column_type::InferredType;
use crate::model::csv::ColumnProfile;
use regex::Regex;
use std::sync::LazyLock;

/// Number of raw values echoed back as examples.
pub const SAMPLE_SIZE: usize = 3;

const BOOLEAN_TOKENS: [&str; 10] = ["true", "false", "yes", "no", "1", "0", "t", "f", "y", "n"];

// No calendar check: "13-99-9999" is a date here.
static DATE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$",
        r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$",
        r"^[0-9]{2}-[0-9]{2}-[0-9]{4}$",
    ]
    .map(|p| Regex::new(p).expect("date pattern is valid"))
});

/// Infers the type of a column from its raw values.
///
/// Returns the type, that type's default value and up to the first
/// [`SAMPLE_SIZE`] raw values.
pub fn infer<S: AsRef<str>>(values: &[S]) -> ColumnProfile {
    let sample_values = values
        .iter()
        .take(SAMPLE_SIZE)
        .map(|v| v.as_ref().to_string())
        .collect();
    ColumnProfile::new(infer_type(values), sample_values)
}

/// Type-only variant of [`infer`].
pub fn infer_type<S: AsRef<str>>(values: &[S]) -> InferredType {
    let effective: Vec<&str> = values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .collect();

    if effective.is_empty() {
        return InferredType::String;
    }

    let rules: [(InferredType, fn(&str) -> bool); 4] = [
        (InferredType::Integer, is_integer),
        (InferredType::Float, is_float),
        (InferredType::Date, is_date),
        (InferredType::Boolean, is_boolean),
    ];

    rules
        .into_iter()
        .find(|(_, accepts)| effective.iter().all(|v| accepts(v)))
        .map(|(inferred, _)| inferred)
        .unwrap_or(InferredType::String)
}

/// Base-10 integer of any magnitude; no separators, no fraction.
pub fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_float(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

pub fn is_date(value: &str) -> bool {
    DATE_PATTERNS.iter().any(|re| re.is_match(value))
}

pub fn is_boolean(value: &str) -> bool {
    BOOLEAN_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(value))
}

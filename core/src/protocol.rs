//! Wire contract for the recognition service.
//!
//! The service accepts a PNG data URI plus the accumulated variable bindings
//! and answers with a JSON array of `{expr, result, assign}` records. Only
//! the first record is displayed; `assign` records feed the binding map sent
//! with later submissions.

#[cfg(test)]
#[path = "protocol_test.rs"]
mod protocol_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CALCULATE_PATH: &str = "/calculate";

/// Request body for `POST {base}/calculate`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CalculateRequest {
    /// The surface as a self-describing data URI (`data:image/png;base64,…`).
    pub data: String,
    /// Variable bindings accumulated from earlier `assign` records.
    pub dict_of_vars: BTreeMap<String, Value>,
}

/// One recognition record. Missing fields take their defaults so a sparse
/// service answer still maps cleanly.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ResultRecord {
    #[serde(default)]
    pub expr: String,
    /// String or number depending on the service's mood.
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub assign: bool,
}

impl ResultRecord {
    /// The result as display text: strings verbatim, numbers and booleans
    /// via their JSON rendering, null as empty.
    pub fn result_text(&self) -> String {
        match &self.result {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }
}

/// The expression/result pair the overlay displays.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    pub expression: String,
    pub result: String,
}

impl Calculation {
    /// The fixed record shown when a submission fails in transit.
    pub fn error() -> Self {
        Self {
            expression: "Error".to_string(),
            result: "Failed to process the image. Please try again.".to_string(),
        }
    }

    /// An empty calculation renders nothing; the overlay stays hidden.
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty() && self.result.is_empty()
    }
}

/// A parsed response body.
#[derive(Debug, PartialEq)]
pub struct ParsedRecords {
    pub records: Vec<ResultRecord>,
    /// The body was a JSON string wrapping the array. The contract says
    /// top-level array; callers should log this as a service-side bug.
    pub string_encoded: bool,
}

#[derive(Debug)]
pub enum ParseError {
    Syntax(serde_json::Error),
    /// Top level was valid JSON but not an array of records.
    Shape(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax(error) => write!(f, "response is not valid JSON: {error}"),
            ParseError::Shape(shape) => {
                write!(f, "response is not an array of records (got {shape})")
            }
        }
    }
}

fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a response body into recognition records.
///
/// The contract is an array of records at the top level. A body that is a
/// JSON string containing that array gets exactly one re-parse and is
/// flagged via [`ParsedRecords::string_encoded`].
pub fn parse_records(body: &str) -> Result<ParsedRecords, ParseError> {
    let value: Value = serde_json::from_str(body).map_err(ParseError::Syntax)?;
    match value {
        Value::Array(_) => Ok(ParsedRecords {
            records: records_from_array(value)?,
            string_encoded: false,
        }),
        Value::String(inner) => {
            let inner: Value = serde_json::from_str(&inner).map_err(ParseError::Syntax)?;
            if !inner.is_array() {
                return Err(ParseError::Shape(value_shape(&inner)));
            }
            Ok(ParsedRecords {
                records: records_from_array(inner)?,
                string_encoded: true,
            })
        }
        other => Err(ParseError::Shape(value_shape(&other))),
    }
}

fn records_from_array(value: Value) -> Result<Vec<ResultRecord>, ParseError> {
    serde_json::from_value(value).map_err(ParseError::Syntax)
}

/// The display pair for the first record, if any.
pub fn first_calculation(records: &[ResultRecord]) -> Option<Calculation> {
    records.first().map(|record| Calculation {
        expression: record.expr.clone(),
        result: record.result_text(),
    })
}

/// Fold `assign` records into the binding map sent with later submissions.
pub fn apply_bindings(bindings: &mut BTreeMap<String, Value>, records: &[ResultRecord]) {
    for record in records {
        if record.assign && !record.expr.is_empty() {
            bindings.insert(record.expr.clone(), record.result.clone());
        }
    }
}

/// Endpoint URL for a configured base, tolerating a trailing slash.
pub fn calculate_url(base: &str) -> String {
    format!("{}{CALCULATE_PATH}", base.trim_end_matches('/'))
}

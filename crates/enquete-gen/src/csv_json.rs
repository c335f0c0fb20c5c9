//! CSV text to a JSON array of header-keyed objects.

use csv::ReaderBuilder;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::GenError;

/// Parse CSV text into rows keyed by the header row, in header order.
///
/// Surrounding whitespace is ignored. A short row gets `null` for its missing
/// columns; cells past the last header are dropped.
pub fn csv_to_rows(input: &str) -> Result<Vec<Map<String, Value>>, GenError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(input.trim().as_bytes());
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let cell = record
                    .get(i)
                    .map_or(Value::Null, |v| Value::String(v.to_string()));
                (header.to_string(), cell)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Convert CSV text to pretty JSON with four-space indentation.
pub fn csv_to_json(input: &str) -> Result<String, GenError> {
    let rows = csv_to_rows(input)?;
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    rows.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&out).into_owned())
}

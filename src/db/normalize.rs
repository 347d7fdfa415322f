//! Column type normalization.
//!
//! Driver-reported types are uneven across backends, so fetched tables get
//! a second pass here: each column's type is inferred from its first
//! non-NULL value, recorded on the column metadata, and the remaining
//! values are coerced to match where that is representable.
//!
//! Columns that are entirely NULL are left untouched. Values that cannot
//! be represented in the inferred type keep their original form; NULLs are
//! never invented and never removed.

use crate::db::types::{ColumnType, DataTable, Value};
use chrono::NaiveDateTime;
use tracing::debug;

/// Timestamp formats accepted when coercing strings to datetimes.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d",
];

/// Applies type normalization to every column of the table in place.
pub fn normalize_table(table: &mut DataTable) {
    for idx in 0..table.columns.len() {
        let Some(inferred) = infer_column_type(table, idx) else {
            continue;
        };

        table.columns[idx].semantic = Some(inferred);
        for row in &mut table.rows {
            coerce_in_place(&mut row[idx], inferred);
        }
    }
}

/// Infers the normalized type for one column from its first non-NULL value.
///
/// Returns `None` for all-NULL columns and for sampled values with no
/// normalized mapping (binary data).
fn infer_column_type(table: &DataTable, idx: usize) -> Option<ColumnType> {
    let sample = table.rows.iter().map(|row| &row[idx]).find(|v| !v.is_null())?;

    let inferred = match sample.semantic_type()? {
        // Strings may be decimals or timestamps in disguise. The declared
        // SQL type decides, mirroring how the driver reported the column.
        ColumnType::Text => {
            let declared = table.columns[idx].sql_type.to_uppercase();
            if declared.contains("DECIMAL") || declared.contains("NUMERIC") {
                ColumnType::Float
            } else if declared.contains("DATE") || declared.contains("TIME") {
                ColumnType::DateTime
            } else {
                ColumnType::Text
            }
        }
        other => other,
    };

    debug!(
        "Column '{}' normalized to {} (declared {})",
        table.columns[idx].name, inferred, table.columns[idx].sql_type
    );
    Some(inferred)
}

/// Coerces a single value toward the inferred column type.
///
/// NULLs pass through unchanged. Unrepresentable values keep their original
/// form rather than becoming NULL.
fn coerce_in_place(value: &mut Value, target: ColumnType) {
    if value.is_null() {
        return;
    }

    let coerced = match (target, &*value) {
        (ColumnType::Integer, Value::Int(_)) => None,
        (ColumnType::Integer, Value::Float(f)) => Some(Value::Int(*f as i64)),
        (ColumnType::Integer, Value::Bool(b)) => Some(Value::Int(i64::from(*b))),
        (ColumnType::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::Int),

        (ColumnType::Float, Value::Float(_)) => None,
        (ColumnType::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
        (ColumnType::Float, Value::Bool(b)) => Some(Value::Float(f64::from(u8::from(*b)))),
        (ColumnType::Float, Value::String(s)) => s.trim().parse::<f64>().ok().map(Value::Float),

        (ColumnType::Boolean, Value::Bool(_)) => None,
        (ColumnType::Boolean, Value::Int(i)) => match i {
            0 => Some(Value::Bool(false)),
            1 => Some(Value::Bool(true)),
            _ => None,
        },
        (ColumnType::Boolean, Value::String(s)) => parse_bool(s).map(Value::Bool),

        (ColumnType::DateTime, Value::DateTime(_)) => None,
        (ColumnType::DateTime, Value::String(s)) => parse_datetime(s).map(Value::DateTime),

        (ColumnType::Text, Value::String(_)) => None,
        (ColumnType::Text, Value::Bytes(_)) => None,
        (ColumnType::Text, other) => Some(Value::String(other.to_display_string())),

        _ => None,
    };

    if let Some(new_value) = coerced {
        *value = new_value;
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
        // Date-only strings need the time half filled in.
        if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.and_time(chrono::NaiveTime::MIN));
        }
    }
    None
}

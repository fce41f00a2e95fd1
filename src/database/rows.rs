//! Conversion of untyped Postgres rows into JSON maps.
//!
//! Tables browsed through the data-center API have no compile-time shape, so
//! every value is decoded by its reported Postgres type name. Column order in
//! the resulting map follows the order of the SELECT list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{Map, Number, Value};
use sqlx::postgres::types::Oid;
use sqlx::postgres::PgRow;
use sqlx::types::BigDecimal;
use sqlx::{Column, Row, TypeInfo, ValueRef};
use uuid::Uuid;

/// A single row keyed by column name
pub type RowMap = Map<String, Value>;

/// Catalog `udt_name`s that `decode_column` maps straight to JSON. Any other
/// type has to be selected as `::text` to be readable.
const NATIVE_UDT_NAMES: &[&str] = &[
    "bool", "int2", "int4", "int8", "float4", "float8", "oid", "text", "varchar", "bpchar", "name",
    "uuid", "json", "jsonb", "bytea", "timestamptz", "timestamp", "date", "time", "_bool", "_int2",
    "_int4", "_int8", "_float8", "_text", "_varchar",
];

pub fn decodes_natively(udt_name: &str) -> bool {
    NATIVE_UDT_NAMES.contains(&udt_name)
}

pub fn rows_to_maps(rows: &[PgRow]) -> Result<Vec<RowMap>, sqlx::Error> {
    rows.iter().map(row_to_map).collect()
}

pub fn row_to_map(row: &PgRow) -> Result<RowMap, sqlx::Error> {
    let mut map = Map::new();
    for (i, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, i, column.type_info().name())?;
        map.insert(column.name().to_string(), value);
    }
    Ok(map)
}

fn decode_column(row: &PgRow, i: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    let decoded = match type_name {
        "BOOL" => opt(row.try_get::<Option<bool>, _>(i), Value::Bool),
        "INT2" => opt(row.try_get::<Option<i16>, _>(i), |v| Value::from(v)),
        "INT4" => opt(row.try_get::<Option<i32>, _>(i), |v| Value::from(v)),
        "INT8" => opt(row.try_get::<Option<i64>, _>(i), |v| Value::from(v)),
        "OID" => opt(row.try_get::<Option<Oid>, _>(i), |v| Value::from(v.0)),
        "FLOAT4" => opt(row.try_get::<Option<f32>, _>(i), |v| float(v as f64)),
        "FLOAT8" => opt(row.try_get::<Option<f64>, _>(i), float),
        // Kept as a string so no precision is lost in transit
        "NUMERIC" => opt(row.try_get::<Option<BigDecimal>, _>(i), |v| Value::String(v.to_string())),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => opt(row.try_get::<Option<String>, _>(i), Value::String),
        "UUID" => opt(row.try_get::<Option<Uuid>, _>(i), |v| Value::String(v.to_string())),
        "JSON" | "JSONB" => opt(row.try_get::<Option<Value>, _>(i), |v| v),
        "BYTEA" => opt(row.try_get::<Option<Vec<u8>>, _>(i), |v| Value::String(bytea_hex(&v))),
        "TIMESTAMPTZ" => opt(row.try_get::<Option<DateTime<Utc>>, _>(i), |v| {
            Value::String(v.to_rfc3339())
        }),
        "TIMESTAMP" => opt(row.try_get::<Option<NaiveDateTime>, _>(i), |v| {
            Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
        }),
        "DATE" => opt(row.try_get::<Option<NaiveDate>, _>(i), |v| Value::String(v.to_string())),
        "TIME" => opt(row.try_get::<Option<NaiveTime>, _>(i), |v| Value::String(v.to_string())),
        "BOOL[]" => opt(row.try_get::<Option<Vec<bool>>, _>(i), |v| {
            Value::Array(v.into_iter().map(Value::Bool).collect())
        }),
        "INT2[]" => opt(row.try_get::<Option<Vec<i16>>, _>(i), |v| {
            Value::Array(v.into_iter().map(Value::from).collect())
        }),
        "INT4[]" => opt(row.try_get::<Option<Vec<i32>>, _>(i), |v| {
            Value::Array(v.into_iter().map(Value::from).collect())
        }),
        "INT8[]" => opt(row.try_get::<Option<Vec<i64>>, _>(i), |v| {
            Value::Array(v.into_iter().map(Value::from).collect())
        }),
        "FLOAT8[]" => opt(row.try_get::<Option<Vec<f64>>, _>(i), |v| {
            Value::Array(v.into_iter().map(float).collect())
        }),
        "TEXT[]" | "VARCHAR[]" => opt(row.try_get::<Option<Vec<String>>, _>(i), |v| {
            Value::Array(v.into_iter().map(Value::String).collect())
        }),
        _ => None,
    };

    match decoded {
        Some(value) => Ok(value),
        None => fallback(row, i, type_name),
    }
}

/// `Some(Null)` for SQL NULL, `None` when the decode itself failed
fn opt<T>(result: Result<Option<T>, sqlx::Error>, f: impl FnOnce(T) -> Value) -> Option<Value> {
    match result {
        Ok(Some(v)) => Some(f(v)),
        Ok(None) => Some(Value::Null),
        Err(_) => None,
    }
}

fn float(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

/// Same rendering as Postgres' default `bytea_output = hex`
fn bytea_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

/// An unmapped type fails the row rather than leaking wire bytes
fn fallback(row: &PgRow, i: usize, type_name: &str) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(i)?.is_null() {
        return Ok(Value::Null);
    }
    Err(sqlx::Error::ColumnDecode {
        index: row.column(i).name().to_string(),
        source: format!("{} has no JSON mapping; select it as ::text", type_name).into(),
    })
}

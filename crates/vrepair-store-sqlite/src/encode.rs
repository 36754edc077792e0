//! Conversions between [`SqlValue`] and rusqlite's value types.
//!
//! Only integers and text cross the seam. The sweep reads nothing but IDs,
//! record IDs and versions, so every other storage class decodes as `Null`.

use rusqlite::types::{Value, ValueRef};
use vrepair_core::db::SqlValue;

pub fn encode_value(v: SqlValue) -> Value {
  match v {
    SqlValue::Null => Value::Null,
    SqlValue::Integer(i) => Value::Integer(i),
    SqlValue::Text(s) => Value::Text(s),
  }
}

pub fn decode_value(v: ValueRef<'_>) -> SqlValue {
  match v {
    ValueRef::Integer(i) => SqlValue::Integer(i),
    ValueRef::Text(bytes) => {
      SqlValue::Text(String::from_utf8_lossy(bytes).into_owned())
    }
    ValueRef::Null | ValueRef::Real(_) | ValueRef::Blob(_) => SqlValue::Null,
  }
}

//! JSON export of extracted records.
//!
//! # Example
//!
//! ```
//! use sql_values_rs::{Columns, ParseOptions, extract, json};
//!
//! let columns = Columns::new(["id", "title"]).unwrap();
//! let extraction = extract("(1, 'Hello'), (2, NULL)", &columns, &ParseOptions::default()).unwrap();
//! let json = json::to_string(&extraction.records).unwrap();
//!
//! assert_eq!(json, r#"[{"id":"1","title":"Hello"},{"id":"2","title":null}]"#);
//! ```

use alloc::string::String;

use crate::record::Record;

/// Serialize `records` as a compact JSON array.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_string(records: &[Record<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string(records)
}

/// Serialize `records` as an indented JSON array.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_string_pretty(records: &[Record<'_>]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Serialize `records` as a `serde_json::Value`.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_value(records: &[Record<'_>]) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Columns, EscapePolicy, ParseOptions, extract};

    #[test]
    fn test_column_order_is_kept() {
        let columns = Columns::new(["z", "a", "m"]).unwrap();
        let extraction = extract("(1, 2, 3)", &columns, &ParseOptions::default()).unwrap();
        assert_eq!(
            to_string(&extraction.records).unwrap(),
            r#"[{"z":"1","a":"2","m":"3"}]"#
        );
    }

    #[test]
    fn test_policy_is_applied() {
        let columns = Columns::new(["title"]).unwrap();
        let options = ParseOptions::default().escape_policy(EscapePolicy::MySql);
        let extraction = extract(r"('it\'s\nhere')", &columns, &options).unwrap();
        let value = to_value(&extraction.records).unwrap();
        assert_eq!(value[0]["title"], "it's\nhere");
    }

    #[test]
    fn test_pretty() {
        let columns = Columns::new(["id"]).unwrap();
        let extraction = extract("(1)", &columns, &ParseOptions::default()).unwrap();
        let pretty = to_string_pretty(&extraction.records).unwrap();
        assert!(pretty.contains('\n'));
        assert!(pretty.contains("\"id\": \"1\""));
    }
}

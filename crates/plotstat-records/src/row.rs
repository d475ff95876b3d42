//! Row access for loosely typed records
//!
//! Data sources hand rows over as field-keyed mappings whose values are
//! either strings (CSV exports) or numbers (already-parsed JSON). The
//! `Row` trait gives the filter a uniform view over both.

use std::collections::{BTreeMap, HashMap};

/// A single field value as exposed by a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// Raw text, parsed on demand
    Text(&'a str),
    /// Already-numeric value
    Number(f64),
}

impl<'a> FieldValue<'a> {
    /// Coerce to a finite number
    ///
    /// Text is trimmed before parsing. Empty strings, `NaN` and infinities
    /// are rejected.
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
        };
        value.is_finite().then_some(value)
    }

    /// Coerce to an integer position
    ///
    /// Accepts integral numbers only; `"3"` and `3.0` both give `3`, while
    /// `"3.5"` is rejected.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| FieldValue::Text(trimmed).as_finite().and_then(integral))
            }
            FieldValue::Number(n) => integral(*n),
        }
    }

    /// Text form used for label matching
    pub fn as_label(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Number(n) if n.is_finite() => Some(format_number_label(*n)),
            FieldValue::Number(_) => None,
        }
    }
}

fn integral(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}

fn format_number_label(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Trait for records that expose named fields
///
/// Implementations return `None` for absent fields; the filter treats an
/// absent field exactly like an unparseable one.
pub trait Row {
    /// Look up a field by name
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

impl Row for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|s| FieldValue::Text(s))
    }
}

impl Row for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|s| FieldValue::Text(s))
    }
}

impl Row for HashMap<String, f64> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|n| FieldValue::Number(*n))
    }
}

impl Row for HashMap<&str, &str> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|s| FieldValue::Text(s))
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.get(name)? {
            serde_json::Value::String(s) => Some(FieldValue::Text(s)),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number),
            _ => None,
        }
    }
}

impl Row for serde_json::Value {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.as_object()?.field(name)
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_as_finite() {
        assert_eq!(FieldValue::Text(" 12.5 ").as_finite(), Some(12.5));
        assert_eq!(FieldValue::Text("").as_finite(), None);
        assert_eq!(FieldValue::Text("NaN").as_finite(), None);
        assert_eq!(FieldValue::Text("inf").as_finite(), None);
        assert_eq!(FieldValue::Text("12abc").as_finite(), None);
    }

    #[test]
    fn test_number_as_finite() {
        assert_eq!(FieldValue::Number(3.0).as_finite(), Some(3.0));
        assert_eq!(FieldValue::Number(f64::NAN).as_finite(), None);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(FieldValue::Text("7").as_integer(), Some(7));
        assert_eq!(FieldValue::Text("7.0").as_integer(), Some(7));
        assert_eq!(FieldValue::Text("7.5").as_integer(), None);
        assert_eq!(FieldValue::Number(12.0).as_integer(), Some(12));
    }

    #[test]
    fn test_as_label() {
        assert_eq!(FieldValue::Text(" Boston ").as_label(), Some("Boston".into()));
        assert_eq!(FieldValue::Number(3.0).as_label(), Some("3".into()));
        assert_eq!(FieldValue::Text("  ").as_label(), None);
    }

    #[test]
    fn test_json_row() {
        let row = json!({ "city": "Austin", "temp": 31.5, "flag": true });
        assert_eq!(row.field("city"), Some(FieldValue::Text("Austin")));
        assert_eq!(row.field("temp"), Some(FieldValue::Number(31.5)));
        assert_eq!(row.field("flag"), None);
        assert_eq!(row.field("missing"), None);
    }
}

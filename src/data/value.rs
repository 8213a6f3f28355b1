use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

/// Cell text treated as missing, trimmed before comparison.
///
/// This is the NA vocabulary most CSV exports use (pandas' default list).
const MISSING: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Whether a raw CSV cell denotes a missing value.
pub fn is_missing(raw: &str) -> bool {
    MISSING.contains(&raw.trim())
}

/// A single typed cell.
///
/// Ordering puts numbers first (integers and floats compare numerically),
/// then text, then `Null`, so sorting leaves missing values at the end.
/// Equality follows the same rules: `Int(1) == Float(1.0)`.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view; integers widen, text and null have none.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        }
    }

    /// Integer view; integral floats convert, fractional ones truncate.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            _ => None,
        }
    }

    /// Text view; numbers render in their display form.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Float(f) if !f.is_finite() => None,
            other => Some(other.to_string()),
        }
    }

    fn as_number(&self) -> f64 {
        match self {
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
            _ => f64::NAN,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Int(_) | Self::Float(_) => 0,
            Self::Text(_) => 1,
            Self::Null => 2,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(i) => write!(f, "{i}"),
            // `{:?}` keeps the trailing `.0` on integral floats.
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Null, Self::Null) => Ordering::Equal,
            (a, b) if a.rank() == 0 && b.rank() == 0 => {
                let (x, y) = (a.as_number(), b.as_number());
                x.total_cmp(&y)
            }
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

/// Missing cells and non-finite floats serialise as JSON `null`.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => s.serialize_none(),
            Self::Int(i) => s.serialize_i64(*i),
            Self::Float(f) if f.is_finite() => s.serialize_f64(*f),
            Self::Float(_) => s.serialize_none(),
            Self::Text(t) => s.serialize_str(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_markers() {
        for raw in ["", "  ", "nan", "NaN", "NA", "null", " None ", "#N/A"] {
            assert!(is_missing(raw), "{raw:?} should be missing");
        }
        for raw in ["0", "nano", "A", "-"] {
            assert!(!is_missing(raw), "{raw:?} should be present");
        }
    }

    #[test]
    fn ordering_numbers_then_text_then_null() {
        let mut v = vec![
            Value::Null,
            Value::Text("b".into()),
            Value::Float(2.5),
            Value::Int(10),
            Value::Text("a".into()),
            Value::Int(2),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Value::Int(2),
                Value::Float(2.5),
                Value::Int(10),
                Value::Text("a".into()),
                Value::Text("b".into()),
                Value::Null,
            ]
        );
    }

    #[test]
    fn mixed_numeric_equality() {
        assert_eq!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Text("1".into()));
    }

    #[test]
    fn views() {
        assert_eq!(Value::Int(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(5.9).as_i64(), Some(5));
        assert_eq!(Value::Float(1.0).as_text().as_deref(), Some("1.0"));
        assert_eq!(Value::Int(7).as_text().as_deref(), Some("7"));
        assert_eq!(Value::Text("x".into()).as_f64(), None);
        assert_eq!(Value::Null.as_text(), None);
    }

    #[test]
    fn serialises_nulls() {
        let row = vec![Value::Null, Value::Float(f64::NAN), Value::Int(1), Value::Text("A".into())];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[null,null,1,"A"]"#);
    }
}

use super::MetricValue;
use core::fmt;

/// Declared output shape for a metric value.
///
/// A schema is a small descriptor tree validated against a [`MetricValue`]
/// at runtime. It is deliberately decoupled from any serialization
/// framework; the engine only needs "does this value have the shape the
/// metric promised".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSchema {
    /// Any value tree, including null.
    Any,
    Null,
    Bool,
    Int,
    /// A float slot also accepts an integer value.
    Float,
    String,
    /// List with a uniform element shape.
    List(Box<ValueSchema>),
    /// String-keyed map with a uniform value shape.
    Map(Box<ValueSchema>),
    /// Either null or the inner shape.
    Nullable(Box<ValueSchema>),
}

impl ValueSchema {
    /// Validate `value` against this schema.
    ///
    /// # Errors
    /// Returns a [`SchemaViolation`] locating the first mismatching node.
    pub fn validate(&self, value: &MetricValue) -> Result<(), SchemaViolation> {
        self.validate_at("$", value)
    }

    fn validate_at(&self, path: &str, value: &MetricValue) -> Result<(), SchemaViolation> {
        match (self, value) {
            (Self::Any, _)
            | (Self::Null, MetricValue::Null)
            | (Self::Bool, MetricValue::Bool(_))
            | (Self::Int, MetricValue::Int(_))
            | (Self::Float, MetricValue::Float(_) | MetricValue::Int(_))
            | (Self::String, MetricValue::String(_)) => Ok(()),
            (Self::List(element), MetricValue::List(values)) => {
                for (index, element_value) in values.iter().enumerate() {
                    element.validate_at(&format!("{path}[{index}]"), element_value)?;
                }
                Ok(())
            }
            (Self::Map(entry), MetricValue::Map(map)) => {
                for (key, entry_value) in map {
                    entry.validate_at(&format!("{path}.{key}"), entry_value)?;
                }
                Ok(())
            }
            (Self::Nullable(_), MetricValue::Null) => Ok(()),
            (Self::Nullable(inner), _) => inner.validate_at(path, value),
            (expected, actual) => Err(SchemaViolation {
                path: path.to_string(),
                expected: expected.to_string(),
                actual: actual.type_name(),
            }),
        }
    }
}

impl fmt::Display for ValueSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("boolean"),
            Self::Int => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::String => f.write_str("string"),
            Self::List(element) => write!(f, "list of {element}"),
            Self::Map(entry) => write!(f, "map of {entry}"),
            Self::Nullable(inner) => write!(f, "nullable {inner}"),
        }
    }
}

/// A value node that does not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    path: String,
    expected: String,
    actual: &'static str,
}

impl SchemaViolation {
    /// JSONPath-style location of the mismatching node, rooted at `$`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    #[must_use]
    pub const fn actual(&self) -> &'static str {
        self.actual
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: expected {}, found {}", self.path, self.expected, self.actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn counts(entries: &[(&str, MetricValue)]) -> MetricValue {
        let map: BTreeMap<_, _> = entries.iter().map(|(k, v)| ((*k).into(), v.clone())).collect();
        MetricValue::Map(map)
    }

    #[test]
    fn test_scalars_accept_matching_values() {
        assert!(ValueSchema::Null.validate(&MetricValue::Null).is_ok());
        assert!(ValueSchema::Bool.validate(&MetricValue::Bool(true)).is_ok());
        assert!(ValueSchema::Int.validate(&MetricValue::Int(-3)).is_ok());
        assert!(ValueSchema::Float.validate(&MetricValue::Float(0.5)).is_ok());
        assert!(ValueSchema::String.validate(&MetricValue::from("x")).is_ok());
    }

    #[test]
    fn test_any_accepts_everything() {
        assert!(ValueSchema::Any.validate(&MetricValue::Null).is_ok());
        assert!(ValueSchema::Any.validate(&counts(&[("a", MetricValue::Int(1))])).is_ok());
    }

    #[test]
    fn test_float_accepts_int() {
        assert!(ValueSchema::Float.validate(&MetricValue::Int(2)).is_ok());
    }

    #[test]
    fn test_int_rejects_string() {
        let violation = ValueSchema::Int.validate(&MetricValue::from("oops")).unwrap_err();
        assert_eq!(violation.path(), "$");
        assert_eq!(violation.expected(), "integer");
        assert_eq!(violation.actual(), "string");
    }

    #[test]
    fn test_map_violation_reports_entry_path() {
        let schema = ValueSchema::Map(Box::new(ValueSchema::Int));
        let value = counts(&[("likes", MetricValue::Int(2)), ("posts", MetricValue::from("three"))]);

        let violation = schema.validate(&value).unwrap_err();
        assert_eq!(violation.path(), "$.posts");
        assert_eq!(violation.expected(), "integer");
        assert_eq!(violation.actual(), "string");
    }

    #[test]
    fn test_list_violation_reports_index_path() {
        let schema = ValueSchema::List(Box::new(ValueSchema::Bool));
        let value = MetricValue::List(vec![MetricValue::Bool(true), MetricValue::Int(0)]);

        let violation = schema.validate(&value).unwrap_err();
        assert_eq!(violation.path(), "$[1]");
    }

    #[test]
    fn test_nested_path() {
        let schema = ValueSchema::Map(Box::new(ValueSchema::List(Box::new(ValueSchema::Int))));
        let value = counts(&[("a", MetricValue::List(vec![MetricValue::Int(1), MetricValue::Null]))]);

        let violation = schema.validate(&value).unwrap_err();
        assert_eq!(violation.path(), "$.a[1]");
        assert_eq!(violation.actual(), "null");
    }

    #[test]
    fn test_nullable() {
        let schema = ValueSchema::Nullable(Box::new(ValueSchema::Int));
        assert!(schema.validate(&MetricValue::Null).is_ok());
        assert!(schema.validate(&MetricValue::Int(1)).is_ok());

        let violation = schema.validate(&MetricValue::from("x")).unwrap_err();
        assert_eq!(violation.expected(), "integer");
    }

    #[test]
    fn test_violation_display() {
        let schema = ValueSchema::Map(Box::new(ValueSchema::Int));
        let violation = schema.validate(&MetricValue::from("x")).unwrap_err();
        assert_eq!(violation.to_string(), "at $: expected map of integer, found string");
    }
}

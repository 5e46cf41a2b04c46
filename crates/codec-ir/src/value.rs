//! Tagged-variant value type for schema documents

/// A value in a parsed schema document.
///
/// Mappings are stored as a vector of key/value pairs so that declaration
/// order survives parsing. The fingerprint of a schema is computed over its
/// canonical serialization, which makes that order load-bearing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/absent marker
    Null,

    /// Boolean value
    Bool(bool),

    /// Integer value
    Int(i64),

    /// Integer value beyond the i64 range
    UInt(u64),

    /// Floating-point value
    Float(f64),

    /// String value
    Str(String),

    /// Ordered sequence of values
    Seq(Vec<Value>),

    /// Mapping with declaration-ordered key/value pairs
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// View the value as a string slice, if it is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View the value as an integer, if it is one
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View the value as a sequence, if it is one
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// View the value as a mapping, if it is one
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a mapping entry by string key.
    ///
    /// Returns `None` for non-mapping values and for missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k.as_str() == Some(key))
            .map(|(_, v)| v)
    }

    /// Short type name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }
}

//! The generic value representation carried between objects, command
//! parameters, and result columns.

/// A dynamically typed scalar value.
///
/// Property getters box their field into a `Value` when binding parameters,
/// and row builders unbox a `Value` back into the field's declared type when
/// materializing results. `Null` stands for both a database NULL and an
/// absent (`None`) property value.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Null / absent value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// 64-bit floating point value
    F64(f64),

    /// String value
    String(String),

    /// Raw byte blob
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Self {
        Self::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(src: Vec<u8>) -> Self {
        Self::Bytes(src)
    }
}

impl<V> From<Option<V>> for Value
where
    V: Into<Value>,
{
    fn from(src: Option<V>) -> Self {
        match src {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// Conversion from a [`Value`] back into a concrete field or scalar type.
///
/// On failure the rejected `Value` is handed back so the caller can name it
/// in a diagnostic. `Null` converts only into `Option` targets; assigning a
/// database NULL to a non-optional property is a conversion failure rather
/// than a silent default.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> std::result::Result<Self, Value>;
}

impl FromValue for bool {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::I32(v) => Ok(v),
            // Narrow only when the value fits
            Value::I64(v) => i32::try_from(v).map_err(|_| Value::I64(v)),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::I64(v) => Ok(v),
            Value::I32(v) => Ok(i64::from(v)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::F64(v) => Ok(v),
            Value::I32(v) => Ok(f64::from(v)),
            Value::I64(v) => Ok(v as f64),
            other => Err(other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Bytes(v) => Ok(v),
            other => Err(other),
        }
    }
}

impl<V> FromValue for Option<V>
where
    V: FromValue,
{
    fn from_value(value: Value) -> std::result::Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => V::from_value(other).map(Some),
        }
    }
}

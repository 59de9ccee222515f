//! Query parameter values.
//!
//! Resource clients describe query strings as a [`QueryParams`] mapping whose
//! values may be absent, plain primitives, or enumerated values. The
//! dispatcher resolves them into the pairs that actually go on the wire.

use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::fmt;

/// A scalar that can be transmitted as-is.
///
/// This is also the underlying representation of every enumerated type.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<Primitive> for Value {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Bool(value) => Value::Bool(value),
            Primitive::Int(value) => Value::Number(value.into()),
            Primitive::Float(value) => Number::from_f64(value).map_or(Value::Null, Value::Number),
            Primitive::Str(value) => Value::String(value),
        }
    }
}

/// An enumerated type with a primitive representation.
///
/// Implementors should also invoke [`enum_value!`](crate::enum_value) so the
/// type converts into [`ParamValue`] and [`Convertible`](crate::Convertible).
pub trait EnumValue: Copy {
    /// Returns the underlying primitive of this variant.
    fn primitive(self) -> Primitive;
}

/// Implements `From<E>` for [`ParamValue`] and [`Convertible`](crate::Convertible)
/// for each listed [`EnumValue`] type.
#[macro_export]
macro_rules! enum_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::core::convert::From<$ty> for $crate::ParamValue {
            fn from(value: $ty) -> Self {
                $crate::ParamValue::Enumerated($crate::EnumValue::primitive(value))
            }
        }

        impl ::core::convert::From<$ty> for $crate::Convertible {
            fn from(value: $ty) -> Self {
                $crate::Convertible::Enum($crate::EnumValue::primitive(value))
            }
        }
    )+};
}

/// A single query parameter value before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// No value; the parameter is omitted from the request.
    Absent,
    /// A plain primitive, transmitted unchanged.
    Value(Primitive),
    /// An enumerated value, transmitted as its primitive.
    Enumerated(Primitive),
}

impl ParamValue {
    /// Returns the primitive to transmit, or `None` when the parameter is absent.
    pub fn resolve(&self) -> Option<Primitive> {
        match self {
            Self::Absent => None,
            Self::Value(primitive) | Self::Enumerated(primitive) => Some(primitive.clone()),
        }
    }

    /// Returns true if this parameter is absent.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Value(Primitive::Bool(value))
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Value(Primitive::Int(i64::from(value)))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Value(Primitive::Int(i64::from(value)))
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Value(Primitive::Int(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Value(Primitive::Float(value))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Value(Primitive::Str(value.to_string()))
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Value(Primitive::Str(value))
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// An insertion-ordered mapping of query parameter names to values.
///
/// # Example
///
/// ```
/// use courier_core::{ParamValue, QueryParams};
///
/// let params = QueryParams::new()
///     .with("mode", "osu")
///     .with("page", None::<i64>);
///
/// assert_eq!(params.len(), 2);
/// assert!(params.get("page").is_some_and(ParamValue::is_absent));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: IndexMap<String, ParamValue>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `key` bound to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Binds `key` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Returns the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Returns the number of bindings, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no bindings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy)]
    enum Colour {
        Red,
        Blue,
    }

    impl EnumValue for Colour {
        fn primitive(self) -> Primitive {
            match self {
                Self::Red => Primitive::Str("red".to_string()),
                Self::Blue => Primitive::Str("blue".to_string()),
            }
        }
    }

    crate::enum_value!(Colour);

    #[test]
    fn test_option_none_is_absent() {
        let value: ParamValue = None::<String>.into();
        assert!(value.is_absent());
        assert_eq!(value.resolve(), None);
    }

    #[test]
    fn test_enum_resolves_to_primitive() {
        let value: ParamValue = Colour::Red.into();
        assert_eq!(value, ParamValue::Enumerated(Primitive::Str("red".to_string())));
        assert_eq!(value.resolve(), Some(Primitive::Str("red".to_string())));

        let value: ParamValue = Some(Colour::Blue).into();
        assert_eq!(value.resolve(), Some(Primitive::Str("blue".to_string())));
    }

    #[test]
    fn test_primitive_display() {
        assert_eq!(Primitive::Bool(true).to_string(), "true");
        assert_eq!(Primitive::Int(-2).to_string(), "-2");
        assert_eq!(Primitive::Float(1.5).to_string(), "1.5");
        assert_eq!(Primitive::Str("osu".to_string()).to_string(), "osu");
    }

    #[test]
    fn test_primitive_into_json() {
        assert_eq!(Value::from(Primitive::Int(4)), serde_json::json!(4));
        assert_eq!(Value::from(Primitive::Float(f64::NAN)), Value::Null);
    }

    #[test]
    fn test_query_params_preserve_insertion_order() {
        let params = QueryParams::new()
            .with("page", 1)
            .with("mode", "taiko")
            .with("nsfw", false);

        let keys: Vec<&str> = params.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["page", "mode", "nsfw"]);
    }

    #[test]
    fn test_query_params_from_iter() {
        let params: QueryParams = vec![("a", 1_i64), ("b", 2_i64)].into_iter().collect();
        assert_eq!(params.get("b"), Some(&ParamValue::Value(Primitive::Int(2))));
    }
}

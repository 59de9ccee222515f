//! Value normalization.
//!
//! Outgoing bodies are described as a [`Convertible`], a closed set of the
//! value kinds the services accept. [`normalize`] lowers a [`Convertible`]
//! into a plain JSON tree that contains no domain types. Adding a new
//! convertible kind means adding a variant here.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::error::{CodecError, CodecResult};
use crate::params::Primitive;

/// A value that can be normalized into JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Convertible {
    /// JSON null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(Number),
    /// String.
    String(String),
    /// 128-bit identifier, sent in its canonical hyphenated form.
    Uuid(Uuid),
    /// Instant, sent as an RFC 3339 string.
    Timestamp(DateTime<Utc>),
    /// Enumerated value, sent as its primitive.
    Enum(Primitive),
    /// Ordered sequence.
    Sequence(Vec<Convertible>),
    /// String-keyed mapping; insertion order is preserved.
    Mapping(IndexMap<String, Convertible>),
    /// A model instance, described by its canonical field mapping.
    Model(ModelFields),
}

/// The canonical field mapping of a model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFields {
    /// Model name, kept for diagnostics.
    pub name: &'static str,
    /// Field values in declaration order.
    pub fields: IndexMap<String, Convertible>,
}

/// A record type exchanged with a service.
///
/// The field mapping is derived from the `Serialize` implementation, so a
/// model is normalized exactly as it would be serialized.
pub trait Model: Serialize {
    /// Model name.
    const NAME: &'static str;

    /// Returns this instance as a [`Convertible::Model`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if the `Serialize` implementation fails.
    fn try_to_convertible(&self) -> CodecResult<Convertible> {
        match serde_json::to_value(self).map_err(CodecError::encode)? {
            Value::Object(map) => Ok(Convertible::Model(ModelFields {
                name: Self::NAME,
                fields: map.into_iter().map(|(key, value)| (key, value.into())).collect(),
            })),
            other => Ok(other.into()),
        }
    }

    /// Infallible form of [`Model::try_to_convertible`].
    ///
    /// A model that fails to serialize is logged at error level and becomes
    /// [`Convertible::Null`].
    fn to_convertible(&self) -> Convertible {
        self.try_to_convertible().unwrap_or_else(|err| {
            tracing::error!(model = Self::NAME, error = %err, "Failed to convert model");
            Convertible::Null
        })
    }
}

/// Implements [`Model`] and `From` conversions into [`Convertible`] for
/// each listed type.
#[macro_export]
macro_rules! model {
    ($($ty:ty => $name:literal),+ $(,)?) => {$(
        impl $crate::Model for $ty {
            const NAME: &'static str = $name;
        }

        impl ::core::convert::From<&$ty> for $crate::Convertible {
            fn from(value: &$ty) -> Self {
                $crate::Model::to_convertible(value)
            }
        }

        impl ::core::convert::From<$ty> for $crate::Convertible {
            fn from(value: $ty) -> Self {
                $crate::Model::to_convertible(&value)
            }
        }
    )+};
}

/// Builds a [`Convertible::Mapping`] from `key => value` pairs.
///
/// ```
/// use courier_core::{mapping, normalize};
///
/// let body = mapping! {
///     "username" => "cookiezi",
///     "country" => "kr",
/// };
/// assert_eq!(normalize(&body), serde_json::json!({"username": "cookiezi", "country": "kr"}));
/// ```
#[macro_export]
macro_rules! mapping {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields = $crate::indexmap::IndexMap::<::std::string::String, $crate::Convertible>::new();
        $( fields.insert(::std::string::String::from($key), $crate::Convertible::from($value)); )*
        $crate::Convertible::Mapping(fields)
    }};
}

/// Converts a [`Convertible`] into its JSON-safe representation.
///
/// Idempotent: a value that is already plain JSON comes back unchanged.
pub fn normalize(value: &Convertible) -> Value {
    match value {
        Convertible::Model(model) => normalize_mapping(&model.fields),
        Convertible::Mapping(fields) => normalize_mapping(fields),
        Convertible::Sequence(items) => Value::Array(items.iter().map(normalize).collect()),
        Convertible::Uuid(id) => Value::String(id.hyphenated().to_string()),
        Convertible::Timestamp(at) => {
            Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        Convertible::Enum(primitive) => primitive.clone().into(),
        Convertible::Null => Value::Null,
        Convertible::Bool(flag) => Value::Bool(*flag),
        Convertible::Number(number) => Value::Number(number.clone()),
        Convertible::String(text) => Value::String(text.clone()),
    }
}

fn normalize_mapping(fields: &IndexMap<String, Convertible>) -> Value {
    let map: Map<String, Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect();
    Value::Object(map)
}

impl Serialize for Convertible {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        normalize(self).serialize(serializer)
    }
}

impl From<Value> for Convertible {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(key, value)| (key, value.into())).collect())
            }
        }
    }
}

impl From<bool> for Convertible {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Convertible {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for Convertible {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u8> for Convertible {
    fn from(value: u8) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for Convertible {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Convertible {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Convertible {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Convertible {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Uuid> for Convertible {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<DateTime<Utc>> for Convertible {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<IndexMap<String, Convertible>> for Convertible {
    fn from(value: IndexMap<String, Convertible>) -> Self {
        Self::Mapping(value)
    }
}

impl<T: Into<Convertible>> From<Vec<T>> for Convertible {
    fn from(value: Vec<T>) -> Self {
        Self::Sequence(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Convertible>> From<Option<T>> for Convertible {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Member {
        session_id: Uuid,
        username: String,
    }

    crate::model!(Member => "member");

    #[test]
    fn test_normalize_uuid() {
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();
        assert_eq!(
            normalize(&Convertible::Uuid(id)),
            json!("67e55044-10b1-426f-9247-bb680e5fe0c8")
        );
    }

    #[test]
    fn test_normalize_nested_mapping_preserves_order() {
        let id = Uuid::nil();
        let body = mapping! {
            "zeta" => 1,
            "alpha" => vec![Convertible::Uuid(id), Convertible::Null],
            "middle" => mapping! { "inner" => id },
        };

        let normalized = normalize(&body);
        let keys: Vec<&String> = normalized.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "middle"]);
        assert_eq!(
            normalized,
            json!({
                "zeta": 1,
                "alpha": ["00000000-0000-0000-0000-000000000000", null],
                "middle": {"inner": "00000000-0000-0000-0000-000000000000"},
            })
        );
    }

    #[test]
    fn test_normalize_model_uses_field_mapping() {
        let member = Member {
            session_id: Uuid::nil(),
            username: "peppy".to_string(),
        };

        let convertible = Convertible::from(&member);
        assert!(matches!(convertible, Convertible::Model(ref m) if m.name == "member"));
        assert_eq!(
            normalize(&convertible),
            json!({"session_id": "00000000-0000-0000-0000-000000000000", "username": "peppy"})
        );
    }

    #[derive(Serialize)]
    struct Grid {
        cells: std::collections::BTreeMap<(i32, i32), i32>,
    }

    crate::model!(Grid => "grid");

    #[test]
    fn test_model_serialize_failure_is_reported() {
        let grid = Grid {
            cells: [((0, 0), 1)].into_iter().collect(),
        };

        let err = grid.try_to_convertible().unwrap_err();
        assert!(matches!(err, CodecError::Encode(_)));
        assert_eq!(Convertible::from(&grid), Convertible::Null);
    }

    #[test]
    fn test_try_to_convertible_matches_infallible_form() {
        let member = Member {
            session_id: Uuid::nil(),
            username: "peppy".to_string(),
        };
        assert_eq!(member.try_to_convertible().unwrap(), member.to_convertible());
    }

    #[test]
    fn test_normalize_enum_and_timestamp() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(normalize(&Convertible::Timestamp(at)), json!("2024-03-01T12:00:00Z"));
        assert_eq!(normalize(&Convertible::Enum(Primitive::Int(-2))), json!(-2));
    }

    #[test]
    fn test_option_and_non_finite_float_become_null() {
        assert_eq!(normalize(&Convertible::from(None::<i64>)), Value::Null);
        assert_eq!(normalize(&Convertible::from(f64::INFINITY)), Value::Null);
    }

    #[test]
    fn test_serialize_goes_through_normalizer() {
        let body = mapping! { "id" => Uuid::nil() };
        let text = serde_json::to_string(&body).unwrap();
        assert_eq!(text, r#"{"id":"00000000-0000-0000-0000-000000000000"}"#);
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..6)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(value in json_value()) {
            let once = normalize(&Convertible::from(value.clone()));
            prop_assert_eq!(&once, &value);

            let twice = normalize(&Convertible::from(once.clone()));
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn prop_uuid_round_trips_through_string(bits in any::<u128>()) {
            let id = Uuid::from_u128(bits);
            let normalized = normalize(&Convertible::Uuid(id));
            let text = normalized.as_str().expect("uuid normalizes to a string");
            prop_assert_eq!(Uuid::parse_str(text).unwrap(), id);
        }
    }
}

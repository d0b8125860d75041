//! `application/x-www-form-urlencoded` request bodies.
//!
//! Fields are kept in insertion order. `Null` and `Absent` fields are dropped
//! from the encoded body instead of being sent as empty strings.

use std::fmt;

use serde_json::{Map, Number, Value};
use url::form_urlencoded;

use crate::result::{ProbeError, ProbeResult};

/// Content type header value for form bodies
pub const FORM_URLENCODED_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A scalar form field value
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// Text, sent as-is
    Text(String),
    /// Number, sent in its JSON spelling
    Number(Number),
    /// Boolean, sent as `true` / `false`
    Bool(bool),
    /// Explicit null; dropped
    Null,
    /// Missing value; dropped
    Absent,
}

impl FormValue {
    /// String form of the value, or `None` when the field is dropped
    #[must_use]
    pub fn as_form_string(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(number.to_string()),
            Self::Bool(flag) => Some(flag.to_string()),
            Self::Null | Self::Absent => None,
        }
    }

    /// Whether the field is left out of the body
    #[must_use]
    pub const fn is_dropped(&self) -> bool {
        matches!(self, Self::Null | Self::Absent)
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FormValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! form_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FormValue {
                fn from(value: $t) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

form_value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON number form
        Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Number)
    }
}

impl From<f32> for FormValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl<T: Into<Self>> From<Option<T>> for FormValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Ordered set of form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormBody {
    fields: Vec<(String, FormValue)>,
}

impl FormBody {
    /// Create an empty body
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field (builder style)
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Add a field
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<FormValue>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Number of fields, dropped ones included
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were added
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Fields that survive encoding, stringified
    #[must_use]
    pub fn pairs(&self) -> Vec<(&str, String)> {
        self.fields
            .iter()
            .filter_map(|(k, v)| v.as_form_string().map(|s| (k.as_str(), s)))
            .collect()
    }

    /// Serialize to an `application/x-www-form-urlencoded` body
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.pairs() {
            serializer.append_pair(key, &value);
        }
        serializer.finish()
    }
}

impl fmt::Display for FormBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl<K, V> FromIterator<(K, V)> for FormBody
where
    K: Into<String>,
    V: Into<FormValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<&Map<String, Value>> for FormBody {
    type Error = ProbeError;

    fn try_from(map: &Map<String, Value>) -> ProbeResult<Self> {
        let mut body = Self::new();
        for (key, value) in map {
            let value = match value {
                Value::String(s) => FormValue::Text(s.clone()),
                Value::Number(n) => FormValue::Number(n.clone()),
                Value::Bool(b) => FormValue::Bool(*b),
                Value::Null => FormValue::Null,
                Value::Array(_) => {
                    return Err(ProbeError::UnsupportedFormValue {
                        key: key.clone(),
                        kind: "array",
                    })
                }
                Value::Object(_) => {
                    return Err(ProbeError::UnsupportedFormValue {
                        key: key.clone(),
                        kind: "object",
                    })
                }
            };
            body.push(key.clone(), value);
        }
        Ok(body)
    }
}

/// Encode a loosely-typed JSON object as a form body.
///
/// Nulls are dropped. Arrays and objects are rejected with
/// [`ProbeError::UnsupportedFormValue`] rather than stringified.
pub fn to_form_urlencoded(map: &Map<String, Value>) -> ProbeResult<String> {
    FormBody::try_from(map).map(|body| body.encode())
}

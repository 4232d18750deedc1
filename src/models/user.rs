use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
use serde::ser::{Error as _, Serialize, Serializer};

pub const USERNAME_FIELD: &str = "Username";
pub const GROUPS_FIELD: &str = "Groups";

/// A single attribute value as returned by the directory service.
///
/// Dates and date-times serialize as ISO-8601 strings. Binary payloads have no
/// JSON representation and make serialization fail.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(i64),
    String(String),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Binary(Vec<u8>),
    List(Vec<AttributeValue>),
    Map(Vec<(String, AttributeValue)>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders a UTC timestamp the way `isoformat()` does: `+00:00` offset,
/// microseconds only when the sub-second part is non-zero.
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    let precision = if value.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    value.to_rfc3339_opts(precision, false)
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttributeValue::Null => serializer.serialize_unit(),
            AttributeValue::Bool(b) => serializer.serialize_bool(*b),
            AttributeValue::Number(n) => serializer.serialize_i64(*n),
            AttributeValue::String(s) => serializer.serialize_str(s),
            AttributeValue::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
            AttributeValue::Date(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            AttributeValue::Binary(_) => Err(S::Error::custom("Type bytes not serializable")),
            AttributeValue::List(items) => serializer.collect_seq(items),
            AttributeValue::Map(entries) => {
                serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Binary(value)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

impl From<DateTime<Utc>> for AttributeValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::DateTime(value)
    }
}

impl From<NaiveDate> for AttributeValue {
    fn from(value: NaiveDate) -> Self {
        AttributeValue::Date(value)
    }
}

/// A user as listed by the directory: provider-defined fields in the order the
/// provider returned them, plus the computed `Groups` field once joined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserRecord {
    fields: Vec<(String, AttributeValue)>,
}

impl UserRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_username(username: &str) -> Self {
        let mut record = Self::new();
        record.insert(USERNAME_FIELD, username);
        record
    }

    /// Sets a field, replacing an existing value in place so field order is kept.
    pub fn insert(&mut self, name: &str, value: impl Into<AttributeValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn username(&self) -> Option<&str> {
        self.get(USERNAME_FIELD).and_then(AttributeValue::as_str)
    }

    /// Group names attached by the joiner, if any.
    pub fn groups(&self) -> Option<Vec<&str>> {
        match self.get(GROUPS_FIELD)? {
            AttributeValue::List(items) => items.iter().map(AttributeValue::as_str).collect(),
            _ => None,
        }
    }
}

impl Serialize for UserRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|(k, v)| (k, v)))
    }
}

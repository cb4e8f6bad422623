//! Query/filter engine.
//!
//! Pure functions over a collection slice. Selection is by integer field
//! equality on one of the [`Field`]s a [`Record`] exposes, and every
//! externally supplied identifier goes through [`parse_identifier`] first so a
//! bad value is a `400`, never a silent mismatch.

use serde_json::Value;

use crate::error::ApiError;

/// The filterable integer fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    Id,
    UserId,
    PostId,
}

impl Field {
    /// The field's wire name, as used in bodies and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id     => "id",
            Self::UserId => "userId",
            Self::PostId => "postId",
        }
    }
}

/// A record the filter engine can select on.
pub trait Record {
    fn id(&self) -> i64;

    /// Value of `field`, or `None` if this record type has no such field.
    fn field(&self, field: Field) -> Option<i64>;
}

/// A conjunction of field-equality constraints.
///
/// ```rust
/// use murmur::query::{Constraints, Field};
///
/// let c = Constraints::new()
///     .with(Field::PostId, 5)
///     .maybe(Field::UserId, None);
/// assert_eq!(c.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Constraints(Vec<(Field, i64)>);

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: i64) -> Self {
        self.0.push((field, value));
        self
    }

    /// Adds the constraint only when a value is present.
    pub fn maybe(self, field: Field, value: Option<i64>) -> Self {
        match value {
            Some(v) => self.with(field, v),
            None    => self,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn matches<T: Record>(&self, record: &T) -> bool {
        self.0.iter().all(|&(field, value)| record.field(field) == Some(value))
    }
}

/// First record with the given id.
pub fn by_id<T: Record>(items: &[T], id: i64) -> Option<&T> {
    items.iter().find(|r| r.id() == id)
}

/// All records whose `field` equals `value`, in store order. With no value
/// the whole collection is returned.
pub fn by_field<T: Record>(items: &[T], field: Field, value: Option<i64>) -> Vec<&T> {
    by_fields(items, &Constraints::new().maybe(field, value))
}

/// All records matching every constraint, in store order.
pub fn by_fields<'a, T: Record>(items: &'a [T], constraints: &Constraints) -> Vec<&'a T> {
    items.iter().filter(|r| constraints.matches(*r)).collect()
}

/// Parses an identifier from a path or query parameter.
///
/// Surrounding whitespace is ignored; anything else that is not a base-10
/// integer fails with `400 "Invalid <name> parameter"`.
pub fn parse_identifier(raw: &str, name: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {name} parameter")))
}

/// Like [`parse_identifier`], but an absent parameter is `None`. A parameter
/// that is present and empty is still invalid.
pub fn parse_optional_identifier(raw: Option<&str>, name: &str) -> Result<Option<i64>, ApiError> {
    raw.map(|r| parse_identifier(r, name)).transpose()
}

const MISSING: &str = "Missing required fields";

/// A required integer body field.
///
/// Form bodies carry strings, so numeric strings are accepted. Absent, `null`,
/// `false`, `0` and `""` count as missing.
pub fn require_id(body: &Value, name: &str) -> Result<i64, ApiError> {
    let invalid = || ApiError::bad_request(format!("Invalid {name} field"));

    let id = match body.get(name) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Err(ApiError::bad_request(MISSING)),
        Some(Value::String(s)) if s.is_empty() => return Err(ApiError::bad_request(MISSING)),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid)?,
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid())?,
        Some(_) => return Err(invalid()),
    };

    if id == 0 {
        return Err(ApiError::bad_request(MISSING));
    }
    Ok(id)
}

/// A required, non-empty string body field.
pub fn require_text(body: &Value, name: &str) -> Result<String, ApiError> {
    optional_text(body, name)?.ok_or_else(|| ApiError::bad_request(MISSING))
}

/// An optional string body field. Absent, `null` and `""` are `None`.
pub fn optional_text(body: &Value, name: &str) -> Result<Option<String>, ApiError> {
    match body.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::bad_request(format!("Invalid {name} field"))),
    }
}

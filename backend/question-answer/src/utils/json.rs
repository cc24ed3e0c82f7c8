use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::HydrationError;

/// Borrow `raw` as a JSON object or fail with `NotAnObject(entity)`
pub fn require_object<'a>(
    raw: &'a Value,
    entity: &'static str,
) -> Result<&'a Map<String, Value>, HydrationError> {
    raw.as_object().ok_or(HydrationError::NotAnObject(entity))
}

/// Look up a required field; JSON `null` counts as missing
pub fn require_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, HydrationError> {
    match object.get(field) {
        Some(Value::Null) | None => Err(HydrationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

/// Deserialize an owned `T` out of a borrowed value, then run its validators.
pub fn from_validated<T>(raw: &Value, entity: &'static str) -> Result<T, HydrationError>
where
    T: DeserializeOwned + Validate,
{
    let value =
        T::deserialize(raw).map_err(|source| HydrationError::Malformed { entity, source })?;
    value
        .validate()
        .map_err(|source| HydrationError::Invalid { entity, source })?;
    Ok(value)
}

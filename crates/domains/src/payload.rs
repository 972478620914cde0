//! # Payload validation
//!
//! Use cases receive plain JSON objects (body, path parameters and caller id
//! merged by the HTTP layer). [`Payload`] runs the two validation stages
//! every entity shares: presence of all required fields first, then types.

use serde_json::{Map, Value};

use crate::errors::ValidationError;

/// Read-only view over a JSON payload, tagged with the entity being built.
pub struct Payload<'a> {
    entity: &'static str,
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Payload<'a> {
    pub fn new(entity: &'static str, value: &'a Value) -> Self {
        Self { entity, fields: value.as_object() }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|map| map.get(field))
    }

    /// Fails on the first field that is missing, null, `""`, `false` or `0`.
    pub fn require_present(&self, fields: &[&'static str]) -> Result<(), ValidationError> {
        for &field in fields {
            if self.get(field).map_or(true, is_blank) {
                return Err(ValidationError::MissingProperty { entity: self.entity, field });
            }
        }
        Ok(())
    }

    /// Fails on the first field that is not a JSON string.
    pub fn require_strings(&self, fields: &[&'static str]) -> Result<(), ValidationError> {
        for &field in fields {
            if !matches!(self.get(field), Some(Value::String(_))) {
                return Err(ValidationError::InvalidType { entity: self.entity, field });
            }
        }
        Ok(())
    }

    /// Both stages over `fields`, in order.
    pub fn require(&self, fields: &[&'static str]) -> Result<(), ValidationError> {
        self.require_present(fields)?;
        self.require_strings(fields)
    }

    /// Field as `&str`, or `""` when absent or not a string. For identifiers
    /// that a repository lookup will reject anyway.
    pub fn str_or_empty(&self, field: &str) -> &'a str {
        self.get(field).and_then(Value::as_str).unwrap_or_default()
    }

    /// Owned copy of a string field. Call after [`Payload::require`].
    pub fn string(&self, field: &'static str) -> Result<String, ValidationError> {
        match self.get(field) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(ValidationError::InvalidType { entity: self.entity, field }),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn presence_is_checked_for_every_field_before_types() {
        let value = json!({ "a": 42 });
        let payload = Payload::new("sample", &value);
        assert_eq!(
            payload.require(&["a", "b"]),
            Err(ValidationError::MissingProperty { entity: "sample", field: "b" })
        );
    }

    #[test]
    fn falsy_values_count_as_missing() {
        for blank in [json!(null), json!(""), json!(false), json!(0)] {
            let value = json!({ "a": blank });
            assert!(matches!(
                Payload::new("sample", &value).require_present(&["a"]),
                Err(ValidationError::MissingProperty { .. })
            ));
        }
    }

    #[test]
    fn empty_containers_are_present_but_mistyped() {
        let value = json!({ "a": [], "b": {} });
        let payload = Payload::new("sample", &value);
        assert!(payload.require_present(&["a", "b"]).is_ok());
        assert_eq!(
            payload.require_strings(&["a", "b"]),
            Err(ValidationError::InvalidType { entity: "sample", field: "a" })
        );
    }

    #[test]
    fn non_object_payload_has_no_fields() {
        let value = json!("not an object");
        assert!(Payload::new("sample", &value).require(&["a"]).is_err());
    }
}

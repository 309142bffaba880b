//! Ordered field checks over an untyped JSON object.
//!
//! A [`FieldCursor`] walks the declared fields of a schema one by one and
//! records a [`ValidationError`] for every rule that fails. Callers read each
//! field through one of the typed accessors, apply their own predicates, and
//! finally call [`FieldCursor::finish`] to turn the collected values into a
//! record or the collected violations into [`ValidationErrors`].

use serde_json::{Map, Value};

use crate::errors::{ValidationError, ValidationErrors, ViolationKind};

/// Field name used when the payload itself is not an object.
pub const PAYLOAD_FIELD: &str = "payload";

pub(crate) struct FieldCursor<'a> {
    map: &'a Map<String, Value>,
    violations: Vec<ValidationError>,
}

impl<'a> FieldCursor<'a> {
    /// Starts a walk over `payload`; non-objects are rejected up front.
    pub fn new(payload: &'a Value) -> Result<Self, ValidationErrors> {
        match payload.as_object() {
            Some(map) => Ok(Self {
                map,
                violations: Vec::new(),
            }),
            None => Err(ValidationError::new(
                PAYLOAD_FIELD,
                ViolationKind::WrongType,
                format!("expected a JSON object, got {}", type_name(payload)),
            )
            .into()),
        }
    }

    /// Required text: absent or `null` is `MissingField`, any non-string is `WrongType`.
    pub fn required_text(&mut self, field: &'static str) -> Option<&'a str> {
        match self.map.get(field) {
            None | Some(Value::Null) => {
                self.reject(field, ViolationKind::MissingField, "field required");
                None
            }
            Some(Value::String(s)) => Some(s.as_str()),
            Some(other) => {
                self.wrong_type(field, other);
                None
            }
        }
    }

    /// Optional text: absent and `null` both yield `Ok(None)`.
    ///
    /// `Err(())` means a violation was already recorded for this field.
    pub fn optional_text(&mut self, field: &'static str) -> Result<Option<&'a str>, ()> {
        match self.map.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => {
                self.wrong_type(field, other);
                Err(())
            }
        }
    }

    pub fn reject(&mut self, field: &'static str, kind: ViolationKind, message: impl Into<String>) {
        self.violations
            .push(ValidationError::new(field, kind, message));
    }

    fn wrong_type(&mut self, field: &'static str, got: &Value) {
        self.reject(
            field,
            ViolationKind::WrongType,
            format!("expected a string, got {}", type_name(got)),
        );
    }

    /// Builds the record when no rule failed.
    ///
    /// `build` only runs on the success path, so it may assume every required
    /// value it captured is present.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, ValidationErrors> {
        if let Some(errs) = ValidationErrors::from_vec(self.violations) {
            return Err(errs);
        }
        build().ok_or_else(|| {
            // Only reachable if a caller forgot to record a violation for a missing value.
            ValidationError::new(
                PAYLOAD_FIELD,
                ViolationKind::MissingField,
                "incomplete record",
            )
            .into()
        })
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_payload_is_wrong_type() {
        let payload = json!(["content"]);
        let err = FieldCursor::new(&payload).err().unwrap();
        assert_eq!(err.len(), 1);
        assert_eq!(err.first().field, PAYLOAD_FIELD);
        assert_eq!(err.first().kind, ViolationKind::WrongType);
        assert!(err.first().message.contains("array"));
    }

    #[test]
    fn required_text_distinguishes_missing_null_and_type() {
        let payload = json!({ "b": null, "c": 7, "d": "ok" });
        let mut cur = FieldCursor::new(&payload).unwrap();

        assert_eq!(cur.required_text("a"), None);
        assert_eq!(cur.required_text("b"), None);
        assert_eq!(cur.required_text("c"), None);
        assert_eq!(cur.required_text("d"), Some("ok"));

        let errs = cur.finish(|| Some(())).unwrap_err();
        let kinds: Vec<_> = errs.violations().iter().map(|v| (v.field, v.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                ("a", ViolationKind::MissingField),
                ("b", ViolationKind::MissingField),
                ("c", ViolationKind::WrongType),
            ]
        );
    }

    #[test]
    fn optional_text_accepts_absent_and_null() {
        let payload = json!({ "n": null, "s": "", "x": false });
        let mut cur = FieldCursor::new(&payload).unwrap();

        assert_eq!(cur.optional_text("missing"), Ok(None));
        assert_eq!(cur.optional_text("n"), Ok(None));
        assert_eq!(cur.optional_text("s"), Ok(Some("")));
        assert_eq!(cur.optional_text("x"), Err(()));

        let errs = cur.finish(|| Some(())).unwrap_err();
        assert_eq!(errs.first().field, "x");
        assert!(errs.first().message.contains("boolean"));
    }
}

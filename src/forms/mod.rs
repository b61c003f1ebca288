//! Request forms: coerce loosely typed input into typed fields and collect
//! per-field error messages. A form either yields its values or a 422 with
//! every problem found, never a partial result.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use validator::{ValidateEmail, ValidateLength};

use crate::database::{Entity, Repository};
use crate::error::ApiError;

pub mod column;
pub mod contact;
pub mod effort;
pub mod input;
pub mod issue;
pub mod milestone;
pub mod post;
pub mod project;
pub mod tag;
pub mod todo;
pub mod user;

pub use input::FormInput;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_EMAIL: &str = "Invalid email address.";
pub const ALREADY_EXISTS: &str = "Already exists.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";

/// Longest value accepted by the short text columns
pub const SHORT_TEXT: u64 = 120;

/// Field name to error messages, serialized as the 422 body
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was recorded, otherwise the 422 error
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::unprocessable_entity(self))
        }
    }
}

/// Reads typed fields out of a [`FormInput`], recording an error for every
/// field that is missing or malformed.
///
/// Readers come in three shapes:
/// - `required_*` yields the value, or records "This field is required."
/// - `optional_*` yields `None` when absent, null or blank
/// - `patch_*` yields `None` when the key is absent (leave unchanged) and
///   `Some(None)` when it is null or blank (clear the value)
pub struct Form<'a> {
    input: &'a FormInput,
    errors: FieldErrors,
}

impl<'a> Form<'a> {
    pub fn new(input: &'a FormInput) -> Self {
        Self {
            input,
            errors: FieldErrors::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    pub fn finish(self) -> Result<(), ApiError> {
        self.errors.into_result()
    }

    /// Present and not null
    fn value(&self, name: &str) -> Option<&'a Value> {
        self.input.get(name).filter(|v| !v.is_null())
    }

    fn is_blank(value: &Value) -> bool {
        matches!(value, Value::String(s) if s.trim().is_empty())
    }

    // --- strings ---

    fn coerce_string(&mut self, name: &str, value: &Value, max_len: Option<u64>) -> Option<String> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => {
                self.add_error(name, "Not a valid string value.");
                return None;
            }
        };

        if let Some(max) = max_len {
            if !text.validate_length(None, Some(max), None) {
                self.add_error(name, format!("Field cannot be longer than {} characters.", max));
                return None;
            }
        }
        Some(text)
    }

    pub fn required_string(&mut self, name: &str, max_len: Option<u64>) -> Option<String> {
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_string(name, value, max_len),
            _ => {
                self.add_error(name, REQUIRED);
                None
            }
        }
    }

    pub fn optional_string(&mut self, name: &str, max_len: Option<u64>) -> Option<String> {
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_string(name, value, max_len),
            _ => None,
        }
    }

    pub fn patch_string(&mut self, name: &str, max_len: Option<u64>) -> Option<Option<String>> {
        if !self.input.contains_key(name) {
            return None;
        }
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => {
                self.coerce_string(name, value, max_len).map(Some)
            }
            _ => Some(None),
        }
    }

    /// A required field on an update: absent keeps the stored value, but it
    /// cannot be cleared.
    pub fn patch_required_string(&mut self, name: &str, max_len: Option<u64>) -> Option<String> {
        if !self.input.contains_key(name) {
            return None;
        }
        self.required_string(name, max_len)
    }

    pub fn email(&mut self, name: &str) -> Option<String> {
        let email = self.required_string(name, Some(SHORT_TEXT))?;
        let email = email.trim().to_string();
        if !email.validate_email() {
            self.add_error(name, INVALID_EMAIL);
            return None;
        }
        Some(email)
    }

    // --- booleans ---

    fn coerce_boolean(&mut self, name: &str, value: &Value) -> Option<bool> {
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "y" | "on" => Some(true),
                "false" | "0" | "no" | "n" | "off" | "" => Some(false),
                _ => None,
            },
            _ => None,
        };

        if parsed.is_none() {
            self.add_error(name, "Not a valid boolean value.");
        }
        parsed
    }

    /// Checkbox semantics: absent or null reads as `false`
    pub fn boolean(&mut self, name: &str) -> bool {
        match self.value(name) {
            Some(value) => self.coerce_boolean(name, value).unwrap_or(false),
            None => false,
        }
    }

    pub fn patch_boolean(&mut self, name: &str) -> Option<bool> {
        if !self.input.contains_key(name) {
            return None;
        }
        Some(self.boolean(name))
    }

    // --- integers ---

    fn coerce_integer(&mut self, name: &str, value: &Value) -> Option<i64> {
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        if parsed.is_none() {
            self.add_error(name, "Not a valid integer value.");
        }
        parsed
    }

    pub fn required_integer(&mut self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_integer(name, value),
            _ => {
                self.add_error(name, REQUIRED);
                None
            }
        }
    }

    pub fn optional_integer(&mut self, name: &str) -> Option<i64> {
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_integer(name, value),
            _ => None,
        }
    }

    pub fn patch_integer(&mut self, name: &str) -> Option<Option<i64>> {
        if !self.input.contains_key(name) {
            return None;
        }
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_integer(name, value).map(Some),
            _ => Some(None),
        }
    }

    pub fn patch_required_integer(&mut self, name: &str) -> Option<i64> {
        if !self.input.contains_key(name) {
            return None;
        }
        self.required_integer(name)
    }

    // --- references ---

    /// Record "Not a valid choice." when `id` names no row of `T`
    pub async fn check_reference<T: Entity>(
        &mut self,
        pool: &SqlitePool,
        name: &str,
        id: Option<i64>,
    ) -> Result<(), ApiError> {
        if let Some(id) = id {
            if !Repository::<T>::new(pool).exists(id).await? {
                self.add_error(name, INVALID_CHOICE);
            }
        }
        Ok(())
    }

    // --- datetimes ---

    fn coerce_datetime(&mut self, name: &str, value: &Value) -> Option<DateTime<Utc>> {
        let parsed = value.as_str().and_then(|s| parse_datetime(s.trim()));
        if parsed.is_none() {
            self.add_error(name, "Not a valid datetime value.");
        }
        parsed
    }

    pub fn optional_datetime(&mut self, name: &str) -> Option<DateTime<Utc>> {
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_datetime(name, value),
            _ => None,
        }
    }

    pub fn patch_datetime(&mut self, name: &str) -> Option<Option<DateTime<Utc>>> {
        if !self.input.contains_key(name) {
            return None;
        }
        match self.value(name) {
            Some(value) if !Self::is_blank(value) => self.coerce_datetime(name, value).map(Some),
            _ => Some(None),
        }
    }
}

/// RFC 3339, or `YYYY-MM-DD HH:MM:SS` taken as UTC
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> FormInput {
        FormInput::from_value(value).unwrap()
    }

    #[test]
    fn required_string_rejects_missing_null_and_blank() {
        let data = input(json!({"b": null, "c": "   "}));
        let mut form = Form::new(&data);
        assert_eq!(form.required_string("a", None), None);
        assert_eq!(form.required_string("b", None), None);
        assert_eq!(form.required_string("c", None), None);

        let errors = form.errors.clone();
        for field in ["a", "b", "c"] {
            assert_eq!(errors.get(field), Some(&[REQUIRED.to_string()][..]));
        }
        assert!(form.finish().is_err());
    }

    #[test]
    fn strings_enforce_max_length() {
        let data = input(json!({"name": "x".repeat(121), "ok": "x".repeat(120)}));
        let mut form = Form::new(&data);
        assert_eq!(form.required_string("name", Some(SHORT_TEXT)), None);
        assert_eq!(form.required_string("ok", Some(SHORT_TEXT)).map(|s| s.len()), Some(120));
        assert_eq!(
            form.errors.get("name"),
            Some(&["Field cannot be longer than 120 characters.".to_string()][..])
        );
    }

    #[test]
    fn booleans_follow_checkbox_semantics() {
        let data = input(json!({
            "t": true, "one": 1, "yes": "Yes", "on": "on",
            "f": false, "zero": "0", "off": "off", "null": null,
            "bad": "maybe"
        }));
        let mut form = Form::new(&data);
        for field in ["t", "one", "yes", "on"] {
            assert!(form.boolean(field), "{field} should be true");
        }
        for field in ["f", "zero", "off", "null", "missing"] {
            assert!(!form.boolean(field), "{field} should be false");
        }
        assert!(!form.boolean("bad"));
        assert_eq!(form.errors.get("bad"), Some(&["Not a valid boolean value.".to_string()][..]));
    }

    #[test]
    fn integers_accept_numbers_and_digit_strings() {
        let data = input(json!({"a": 4, "b": "17", "c": "seven", "d": 1.5}));
        let mut form = Form::new(&data);
        assert_eq!(form.required_integer("a"), Some(4));
        assert_eq!(form.optional_integer("b"), Some(17));
        assert_eq!(form.optional_integer("c"), None);
        assert_eq!(form.optional_integer("d"), None);
        assert_eq!(form.optional_integer("missing"), None);
        assert!(form.errors.get("c").is_some());
        assert!(form.errors.get("d").is_some());
        assert!(form.errors.get("missing").is_none());
    }

    #[test]
    fn patch_distinguishes_absent_from_cleared() {
        let data = input(json!({"cleared": null, "blank": "", "set": "value", "id": 3}));
        let mut form = Form::new(&data);
        assert_eq!(form.patch_string("absent", None), None);
        assert_eq!(form.patch_string("cleared", None), Some(None));
        assert_eq!(form.patch_string("blank", None), Some(None));
        assert_eq!(form.patch_string("set", None), Some(Some("value".to_string())));
        assert_eq!(form.patch_integer("id"), Some(Some(3)));
        assert_eq!(form.patch_required_string("absent", None), None);
        assert_eq!(form.patch_required_string("cleared", None), None);
        assert_eq!(form.errors.get("cleared"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn email_is_checked() {
        let data = input(json!({"good": "ada@example.com", "bad": "not-an-email"}));
        let mut form = Form::new(&data);
        assert_eq!(form.email("good").as_deref(), Some("ada@example.com"));
        assert_eq!(form.email("bad"), None);
        assert_eq!(form.errors.get("bad"), Some(&[INVALID_EMAIL.to_string()][..]));
    }

    #[test]
    fn datetimes_accept_rfc3339_and_plain_format() {
        let data = input(json!({
            "rfc": "2024-05-01T12:30:00+02:00",
            "plain": "2024-05-01 10:30:00",
            "bad": "next tuesday"
        }));
        let mut form = Form::new(&data);
        let rfc = form.optional_datetime("rfc").unwrap();
        let plain = form.optional_datetime("plain").unwrap();
        assert_eq!(rfc, plain);
        assert_eq!(form.optional_datetime("bad"), None);
        assert!(form.errors.get("bad").is_some());
    }

    #[test]
    fn field_errors_serialize_as_plain_mapping() {
        let mut errors = FieldErrors::new();
        errors.add("email", INVALID_EMAIL);
        errors.add("password", REQUIRED);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"email": [INVALID_EMAIL], "password": [REQUIRED]})
        );
    }
}

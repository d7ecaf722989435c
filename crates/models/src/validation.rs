//! Field rules for student input.
//!
//! Validation is a pure function over [`InputValue`]s: it never touches the
//! database and reports every failing field at once, keyed by field name.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

/// Upper bound, in characters, for every text column.
pub const MAX_LEN: usize = 191;

/// Exact digit count required for `phone`.
pub const PHONE_DIGITS: usize = 10;

/// A raw request value before any rule has been applied.
///
/// JSON bodies may carry numbers where text is expected (`"phone": 1234567890`),
/// so the original shape is kept until validation decides what it means.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl InputValue {
    /// Scalar rendered as text, trimmed. Blank text counts as absent.
    pub fn normalized_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => {
                let t = s.trim();
                (!t.is_empty()).then(|| t.to_string())
            }
            Self::Number(n) => Some(n.to_string()),
            Self::Other(_) => None,
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Other(serde_json::Value::Array(a)) => a.is_empty(),
            Self::Other(serde_json::Value::Object(o)) => o.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Field name to the list of human-readable violations for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
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

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for m in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {m}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

fn must_be_string(field: &str) -> String {
    format!("The {field} must be a string.")
}

fn too_long(field: &str) -> String {
    format!("The {field} must not be greater than {MAX_LEN} characters.")
}

/// Returns the value, or `None` after recording a `required` violation.
fn present<'a>(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&'a InputValue>,
) -> Option<&'a InputValue> {
    match value {
        Some(v) if !v.is_blank() => Some(v),
        _ => {
            errors.add(field, required(field));
            None
        }
    }
}

/// Records a `max` violation; returns whether the text fits.
fn check_max(errors: &mut ValidationErrors, field: &str, text: &str) -> bool {
    if text.chars().count() > MAX_LEN {
        errors.add(field, too_long(field));
        return false;
    }
    true
}

/// `required|string|max:191`
pub fn text_field(errors: &mut ValidationErrors, field: &str, value: Option<&InputValue>) -> Option<String> {
    let v = present(errors, field, value)?;
    let InputValue::Text(raw) = v else {
        errors.add(field, must_be_string(field));
        return None;
    };
    let text = raw.trim();
    check_max(errors, field, text).then(|| text.to_string())
}

/// `required|email|max:191`
pub fn email_field(errors: &mut ValidationErrors, field: &str, value: Option<&InputValue>) -> Option<String> {
    let v = present(errors, field, value)?;
    let InputValue::Text(raw) = v else {
        errors.add(field, format!("The {field} must be a valid email address."));
        return None;
    };
    let text = raw.trim();
    let mut ok = true;
    if !text.validate_email() {
        errors.add(field, format!("The {field} must be a valid email address."));
        ok = false;
    }
    ok &= check_max(errors, field, text);
    ok.then(|| text.to_string())
}

/// `required|digits:10`
pub fn digits_field(errors: &mut ValidationErrors, field: &str, value: Option<&InputValue>) -> Option<String> {
    let v = present(errors, field, value)?;
    let text = v.normalized_text().unwrap_or_default();
    if text.len() == PHONE_DIGITS && text.bytes().all(|b| b.is_ascii_digit()) {
        Some(text)
    } else {
        errors.add(field, format!("The {field} must be {PHONE_DIGITS} digits."));
        None
    }
}

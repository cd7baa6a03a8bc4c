//! Decoding of untrusted request payloads.
//!
//! Request bodies arrive as arbitrary JSON. Every text field is read
//! leniently: a missing key or a non-string value becomes the empty
//! string, which the validators then report as missing. Unknown keys are
//! ignored. Search terms are the exception; anything but a string is
//! rejected outright so structured values can never reach the store as a
//! query.

use std::fmt;

use serde_json::Value;

use murmur_core::error::AppError;

/// Read `key` from `payload` as text, or the empty string.
fn text_field(payload: &Value, key: &str) -> String {
    payload
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

/// A registration attempt.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    /// Requested username, as typed.
    pub username: String,
    /// Email address, as typed.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl RegistrationForm {
    /// Build a form from already-typed values.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Decode a form from an untrusted JSON body.
    pub fn from_untrusted(payload: &Value) -> Self {
        Self {
            username: text_field(payload, "username"),
            email: text_field(payload, "email"),
            password: text_field(payload, "password"),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A login attempt.
#[derive(Clone, Default)]
pub struct LoginForm {
    /// Username, as typed.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginForm {
    /// Build a form from already-typed values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Decode a form from an untrusted JSON body.
    pub fn from_untrusted(payload: &Value) -> Self {
        Self {
            username: text_field(payload, "username"),
            password: text_field(payload, "password"),
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Title and body of a new or edited post, before sanitization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostForm {
    /// Raw title.
    pub title: String,
    /// Raw body.
    pub body: String,
}

impl PostForm {
    /// Build a form from already-typed values.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Decode a form from an untrusted JSON body.
    pub fn from_untrusted(payload: &Value) -> Self {
        Self {
            title: text_field(payload, "title"),
            body: text_field(payload, "body"),
        }
    }
}

/// A full-text search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    /// Wrap a term that is already known to be text.
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// Accept `value` only if it is a JSON string.
    pub fn from_untrusted(value: &Value) -> Result<Self, AppError> {
        match value {
            Value::String(term) => Ok(Self::new(term.as_str())),
            _ => Err(AppError::validation(vec![
                "Search term must be plain text.".to_string(),
            ])),
        }
    }

    /// The term, untrimmed.
    pub fn term(&self) -> &str {
        &self.term
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use murmur_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_non_string_fields_become_empty() {
        let form = RegistrationForm::from_untrusted(&json!({
            "username": {"$gt": ""},
            "email": 42,
            "password": ["hunter2hunter2"],
        }));
        assert_eq!(form.username, "");
        assert_eq!(form.email, "");
        assert_eq!(form.password, "");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let form = PostForm::from_untrusted(&json!({
            "title": "Hello",
            "body": "World",
            "author": "someone-else",
        }));
        assert_eq!(form, PostForm::new("Hello", "World"));
    }

    #[test]
    fn test_non_object_payload_decodes_empty() {
        let form = LoginForm::from_untrusted(&json!("brad"));
        assert_eq!(form.username, "");
        assert_eq!(form.password, "");
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let form = LoginForm::new("brad", "hunter2hunter2");
        let printed = format!("{form:?}");
        assert!(printed.contains("brad"));
        assert!(!printed.contains("hunter2hunter2"));
    }

    #[test]
    fn test_search_rejects_structured_terms() {
        let err = SearchQuery::from_untrusted(&json!({"$regex": ".*"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let query = SearchQuery::from_untrusted(&json!("rust")).unwrap();
        assert_eq!(query.term(), "rust");
    }
}

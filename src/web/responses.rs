//! # Shared Response Types
//!
//! The service renders pages and forms as JSON documents. A [`FormView`]
//! is the JSON analog of a server-rendered form: current field values plus
//! per-field error messages. Handlers re-render it with a 200 on
//! validation failure instead of mutating anything.

use std::collections::BTreeMap;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Key used for errors that belong to the whole form rather than a field.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A rendered form: field values and field-level validation errors.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormView {
    pub fields: BTreeMap<String, Value>,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl FormView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its current value (builder style).
    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }

    /// Attach a validation error to a field.
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A `302 Found` redirect.
///
/// `axum::response::Redirect` only offers 303/307/308; the original
/// contract for both successful mutations and login bounces is the
/// classic 302, so the response is assembled by hand.
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_view_collects_errors_per_field() {
        let mut form = FormView::new().field("text", "hello");
        assert!(!form.has_errors());

        form.add_error("text", "first");
        form.add_error("text", "second");
        assert!(form.has_errors());
        assert_eq!(form.errors["text"].len(), 2);
    }

    #[test]
    fn redirect_found_sets_status_and_location() {
        let response = redirect_found("/auth/login?next=/notes");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/auth/login?next=/notes"
        );
    }
}

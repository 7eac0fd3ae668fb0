//! Form controllers and the page surface they read from and write to.
//!
//! The page itself is out of reach: controllers only see a [`FormSurface`]
//! (values and inline errors by element id), a [`Notifier`](crate::notify::Notifier)
//! for toasts and a [`Confirm`] prompt.

/// Admin CRUD panel over the entry store.
pub mod admin;
/// Contact form composing a `mailto:` link.
pub mod contact;
/// Contest registration form composing a `mailto:` link.
pub mod registration;

use hashbrown::{HashMap, HashSet};
use thiserror::Error;

use crate::{
    core::store::StoreError,
    types::FieldId,
    validate::{Rule, Validation, validate},
};

/// A form field, the element holding its inline error, and its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Input element id.
    pub id: FieldId,
    /// Error element id.
    pub error_id: FieldId,
    /// Rule the value must satisfy; `None` for free-form fields.
    pub rule: Option<Rule>,
}

impl FieldSpec {
    /// Field checked against `rule`.
    pub const fn checked(id: FieldId, error_id: FieldId, rule: Rule) -> Self {
        Self {
            id,
            error_id,
            rule: Some(rule),
        }
    }

    /// Field without a rule.
    pub const fn free(id: FieldId) -> Self {
        Self {
            id,
            error_id: "",
            rule: None,
        }
    }
}

/// One failed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Input element id.
    pub field: FieldId,
    /// Message written next to the field.
    pub message: &'static str,
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("contest rules were not accepted")]
    RulesNotAccepted,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Element access the controllers need from the page.
pub trait FormSurface {
    /// Current value of an input; empty when the element has none.
    fn value(&self, field: FieldId) -> String;
    fn set_value(&mut self, field: FieldId, value: &str);
    fn is_checked(&self, field: FieldId) -> bool;
    /// Marks `field` as invalid and writes `message` into `error_id`.
    fn set_error(&mut self, field: FieldId, error_id: FieldId, message: &str);
    fn clear_error(&mut self, field: FieldId, error_id: FieldId);
    /// Replaces the text of a non-input element such as a heading.
    fn set_text(&mut self, _element: FieldId, _text: &str) {}
    fn set_visible(&mut self, _element: FieldId, _visible: bool) {}
    /// Clears the listed inputs and any checkbox state.
    fn reset(&mut self, fields: &[FieldId]) {
        for field in fields {
            self.set_value(*field, "");
        }
    }
}

/// Yes/no question put to the user before destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Validates every ruled field, writing or clearing inline errors.
pub fn validate_fields<F: FormSurface + ?Sized>(form: &mut F, specs: &[FieldSpec]) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for spec in specs {
        let Some(rule) = spec.rule else { continue };
        match validate(&form.value(spec.id), rule) {
            Validation::Pass => form.clear_error(spec.id, spec.error_id),
            Validation::Fail(message) => {
                form.set_error(spec.id, spec.error_id, message);
                errors.push(FieldError {
                    field: spec.id,
                    message,
                });
            }
        }
    }
    errors
}

/// Blur handler: checks a non-empty field and updates its inline error.
pub fn check_field<F: FormSurface + ?Sized>(form: &mut F, spec: &FieldSpec) -> Option<Validation> {
    let rule = spec.rule?;
    let value = form.value(spec.id);
    if value.is_empty() {
        return None;
    }
    let outcome = validate(&value, rule);
    match outcome {
        Validation::Pass => form.clear_error(spec.id, spec.error_id),
        Validation::Fail(message) => form.set_error(spec.id, spec.error_id, message),
    }
    Some(outcome)
}

/// Input handler: editing a field drops its stale error.
pub fn clear_on_input<F: FormSurface + ?Sized>(form: &mut F, spec: &FieldSpec) {
    form.clear_error(spec.id, spec.error_id);
}

/// Map-backed [`FormSurface`], used by the CLI and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryForm {
    values: HashMap<String, String>,
    checked: HashSet<String>,
    errors: HashMap<String, String>,
    invalid: HashSet<String>,
    texts: HashMap<String, String>,
    hidden: HashSet<String>,
}

impl MemoryForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style value setter.
    pub fn with(mut self, field: FieldId, value: &str) -> Self {
        self.set_value(field, value);
        self
    }

    pub fn set_checked(&mut self, field: FieldId, checked: bool) {
        if checked {
            self.checked.insert(field.to_string());
        } else {
            self.checked.remove(field);
        }
    }

    /// Text currently shown in an error element.
    pub fn error(&self, error_id: FieldId) -> Option<&str> {
        self.errors.get(error_id).map(String::as_str)
    }

    /// Non-empty error texts keyed by error element id.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(id, msg)| (id.as_str(), msg.as_str()))
    }

    pub fn is_invalid(&self, field: FieldId) -> bool {
        self.invalid.contains(field)
    }

    pub fn text(&self, element: FieldId) -> Option<&str> {
        self.texts.get(element).map(String::as_str)
    }

    pub fn is_visible(&self, element: FieldId) -> bool {
        !self.hidden.contains(element)
    }
}

impl FormSurface for MemoryForm {
    fn value(&self, field: FieldId) -> String {
        self.values.get(field).cloned().unwrap_or_default()
    }

    fn set_value(&mut self, field: FieldId, value: &str) {
        self.values.insert(field.to_string(), value.to_string());
    }

    fn is_checked(&self, field: FieldId) -> bool {
        self.checked.contains(field)
    }

    fn set_error(&mut self, field: FieldId, error_id: FieldId, message: &str) {
        self.invalid.insert(field.to_string());
        self.errors.insert(error_id.to_string(), message.to_string());
    }

    fn clear_error(&mut self, field: FieldId, error_id: FieldId) {
        self.invalid.remove(field);
        self.errors.remove(error_id);
    }

    fn set_text(&mut self, element: FieldId, text: &str) {
        self.texts.insert(element.to_string(), text.to_string());
    }

    fn set_visible(&mut self, element: FieldId, visible: bool) {
        if visible {
            self.hidden.remove(element);
        } else {
            self.hidden.insert(element.to_string());
        }
    }

    fn reset(&mut self, fields: &[FieldId]) {
        for field in fields {
            self.values.remove(*field);
            self.checked.remove(*field);
        }
    }
}

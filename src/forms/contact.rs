use crate::{
    mailto::MailtoLink,
    notify::{Notification, Notifier},
    types::FieldId,
    validate::Rule,
};

use super::{FieldSpec, FormError, FormSurface, validate_fields};

pub const NAME: FieldId = "name";
pub const EMAIL: FieldId = "email";
pub const SUBJECT: FieldId = "subject";
pub const MESSAGE: FieldId = "message";

pub const FIELDS: [FieldSpec; 4] = [
    FieldSpec::checked(NAME, "nameError", Rule::Name),
    FieldSpec::checked(EMAIL, "emailError", Rule::Email),
    FieldSpec::free(SUBJECT),
    FieldSpec::checked(MESSAGE, "messageError", Rule::Required),
];

pub const DEFAULT_SUBJECT: &str = "Contact Form Submission - Lens & Light 2025";

/// Contact form: validates, then composes a message to the organisers.
#[derive(Debug, Clone)]
pub struct ContactForm {
    recipient: String,
}

impl ContactForm {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }

    /// Handles submit; on success the form is cleared and the link returned.
    pub fn submit<F, N>(&self, form: &mut F, notifier: &mut N) -> Result<MailtoLink, FormError>
    where
        F: FormSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        let errors = validate_fields(form, &FIELDS);
        if !errors.is_empty() {
            notifier.notify(Notification::error("Please fix the errors in the form"));
            return Err(FormError::Invalid(errors));
        }

        let subject = form.value(SUBJECT);
        let link = MailtoLink::new(
            self.recipient.clone(),
            if subject.is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                subject.clone()
            },
            contact_body(
                &form.value(NAME),
                &form.value(EMAIL),
                &subject,
                &form.value(MESSAGE),
            ),
        );

        form.reset(&[NAME, EMAIL, SUBJECT, MESSAGE]);
        Ok(link)
    }
}

fn contact_body(name: &str, email: &str, subject: &str, message: &str) -> String {
    let subject = if subject.is_empty() { "N/A" } else { subject };
    format!(
        "Contact Form Submission\n\
         Lens & Light Photography Contest 2025\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         Subject: {subject}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         This email was sent via the Lens & Light Contest website contact form."
    )
}

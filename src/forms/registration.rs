use std::time::Duration;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    mailto::MailtoLink,
    notify::{Notification, Notifier},
    types::FieldId,
    validate::Rule,
};

use super::{FieldSpec, FormError, FormSurface, validate_fields};

pub const NAME: FieldId = "reg-name";
pub const EMAIL: FieldId = "reg-email";
pub const PHONE: FieldId = "reg-phone";
pub const DEPARTMENT: FieldId = "reg-department";
pub const CATEGORY: FieldId = "reg-category";
pub const TITLE: FieldId = "reg-title";
pub const DESCRIPTION: FieldId = "reg-description";
pub const AGREE_RULES: FieldId = "agree-rules";
pub const AGREE_ERROR: FieldId = "agreeError";

pub const FIELDS: [FieldSpec; 7] = [
    FieldSpec::checked(NAME, "regNameError", Rule::Name),
    FieldSpec::checked(EMAIL, "regEmailError", Rule::Email),
    FieldSpec::checked(PHONE, "regPhoneError", Rule::Phone),
    FieldSpec::checked(DEPARTMENT, "regDeptError", Rule::Required),
    FieldSpec::checked(CATEGORY, "regCategoryError", Rule::Required),
    FieldSpec::checked(TITLE, "regTitleError", Rule::Required),
    FieldSpec::free(DESCRIPTION),
];

const ALL_INPUTS: [FieldId; 8] = [
    NAME,
    EMAIL,
    PHONE,
    DEPARTMENT,
    CATEGORY,
    TITLE,
    DESCRIPTION,
    AGREE_RULES,
];

/// Contest registration form.
///
/// A valid submission is turned into a pre-filled email; the participant
/// attaches photos in their own mail client.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    recipient: String,
    redirect_delay: Duration,
}

impl RegistrationForm {
    pub fn new(recipient: impl Into<String>, redirect_delay: Duration) -> Self {
        Self {
            recipient: recipient.into(),
            redirect_delay,
        }
    }

    /// Validates and composes the registration email dated `today`.
    pub fn submit<F, N>(
        &self,
        form: &mut F,
        notifier: &mut N,
        today: NaiveDate,
    ) -> Result<MailtoLink, FormError>
    where
        F: FormSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        let errors = validate_fields(form, &FIELDS);

        if !form.is_checked(AGREE_RULES) {
            notifier.notify(Notification::error("Please agree to the contest rules"));
            form.set_error(AGREE_RULES, AGREE_ERROR, "You must agree to the rules");
            return Err(FormError::RulesNotAccepted);
        }
        form.clear_error(AGREE_RULES, AGREE_ERROR);

        if !errors.is_empty() {
            notifier.notify(Notification::error("Please fix the errors in the form"));
            return Err(FormError::Invalid(errors));
        }

        let details = Registration {
            name: form.value(NAME),
            email: form.value(EMAIL),
            phone: form.value(PHONE),
            department: form.value(DEPARTMENT),
            category: form.value(CATEGORY),
            title: form.value(TITLE),
            description: form.value(DESCRIPTION),
        };

        notifier.notify(Notification::success("Redirecting to email client..."));
        Ok(MailtoLink::new(
            self.recipient.clone(),
            format!("Contest Registration: {} - {}", details.title, details.name),
            details.body(today),
        ))
    }

    /// Waits out the redirect delay, hands `link` to the mail client and clears
    /// the form.
    pub async fn hand_off<F, N, M>(&self, link: &MailtoLink, form: &mut F, notifier: &mut N, open_mail_client: M)
    where
        F: FormSurface + ?Sized,
        N: Notifier + ?Sized,
        M: FnOnce(&str),
    {
        if !self.redirect_delay.is_zero() {
            tokio::time::sleep(self.redirect_delay).await;
        }
        let uri = link.to_uri();
        debug!(len = uri.len(), "opening mail client");
        open_mail_client(&uri);
        notifier.notify(Notification::success(
            "Please attach your photo(s) and send the email",
        ));
        form.reset(&ALL_INPUTS);
    }
}

struct Registration {
    name: String,
    email: String,
    phone: String,
    department: String,
    category: String,
    title: String,
    description: String,
}

impl Registration {
    fn body(&self, today: NaiveDate) -> String {
        let phone = or_not_provided(&self.phone);
        let description = or_not_provided(&self.description);
        let date = today.format("%-m/%-d/%Y");
        format!(
            "Contest Registration\n\
             Lens & Light Photography Contest 2025\n\
             \n\
             PARTICIPANT INFORMATION:\n\
             -------------------------\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Department: {department}\n\
             \n\
             SUBMISSION DETAILS:\n\
             ------------------\n\
             Category: {category}\n\
             Photo Title: {title}\n\
             Description: {description}\n\
             \n\
             IMPORTANT: Please attach your photograph(s) to this email.\n\
             - Maximum 3 photos per participant\n\
             - Format: JPEG or PNG\n\
             - Maximum file size: 10MB per image\n\
             - Theme: Nature Through the Lens\n\
             \n\
             The participant has agreed to the contest rules and confirmed that the submitted work is original.\n\
             \n\
             ---\n\
             Registration submitted via Lens & Light Contest website on {date}",
            name = self.name,
            email = self.email,
            department = self.department,
            category = self.category,
            title = self.title,
        )
    }
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() { "Not provided" } else { value }
}

use tracing::info;

use crate::{
    core::store::{EntryStore, StoreError},
    entry::{ContestEntry, EntryDraft},
    notify::{Notification, Notifier},
    op::Change,
    persist::KvStorage,
    render::{RowAction, TableView},
    types::{EntryId, FieldId},
    validate::{MIN_TEXT_LEN, Rule},
};

use super::{Confirm, FieldSpec, FormError, FormSurface, validate_fields};

pub const ENTRY_ID: FieldId = "entry-id";
pub const NAME: FieldId = "crud-name";
pub const DEPARTMENT: FieldId = "crud-dept";
pub const PHOTO_TITLE: FieldId = "crud-title";
pub const FORM_TITLE: FieldId = "form-title";
pub const SUBMIT_BUTTON: FieldId = "submit-btn";
pub const CANCEL_BUTTON: FieldId = "cancel-btn";

pub const FIELDS: [FieldSpec; 3] = [
    FieldSpec::checked(NAME, "crudNameError", Rule::Name),
    FieldSpec::checked(
        DEPARTMENT,
        "crudDeptError",
        Rule::MinLength {
            min: MIN_TEXT_LEN,
            message: "Department is required",
        },
    ),
    FieldSpec::checked(
        PHOTO_TITLE,
        "crudTitleError",
        Rule::MinLength {
            min: MIN_TEXT_LEN,
            message: "Photo title is required",
        },
    ),
];

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this entry? This action cannot be undone.";

/// Add/edit/delete controller for the admin page.
///
/// Borrows the one [`EntryStore`] for its lifetime; the store stays the only
/// writer of the collection.
pub struct AdminPanel<'a, S: KvStorage> {
    store: &'a mut EntryStore<S>,
    editing: Option<EntryId>,
}

impl<'a, S: KvStorage> AdminPanel<'a, S> {
    pub fn new(store: &'a mut EntryStore<S>) -> Self {
        Self {
            store,
            editing: None,
        }
    }

    /// Entry currently loaded into the form, if any.
    pub fn editing(&self) -> Option<EntryId> {
        self.editing
    }

    pub fn table(&self) -> TableView {
        TableView::from_entries(&self.store.load())
    }

    /// Handles the form's submit event.
    ///
    /// A form carrying the id of an entry that no longer exists is reported as
    /// not found and nothing is written.
    pub fn submit<F, N>(&mut self, form: &mut F, notifier: &mut N) -> Result<Change, FormError>
    where
        F: FormSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        let errors = validate_fields(form, &FIELDS);
        if !errors.is_empty() {
            notifier.notify(Notification::error("Please fill all required fields"));
            return Err(FormError::Invalid(errors));
        }

        let draft = EntryDraft {
            id: form.value(ENTRY_ID).trim().parse().ok(),
            name: form.value(NAME),
            department: form.value(DEPARTMENT),
            photo_title: form.value(PHOTO_TITLE),
        }
        .trimmed();

        // The entry under edit may have been deleted since it was loaded.
        if let Some(id) = draft.id.filter(|&id| self.store.get(id).is_none()) {
            notifier.notify(Notification::error("Entry not found"));
            return Err(StoreError::NotFound(id).into());
        }

        let applied = match self.store.upsert(draft) {
            Ok(applied) => applied,
            Err(err) => {
                notifier.notify(Notification::error("Failed to save entries"));
                return Err(err.into());
            }
        };

        match &applied.change {
            Change::Updated { after, .. } => {
                info!(id = after.id, "entry updated");
                notifier.notify(Notification::success("Entry updated successfully"));
            }
            change => {
                info!(id = change.id(), "entry added");
                notifier.notify(Notification::success("Entry added successfully"));
            }
        }
        self.reset(form);
        Ok(applied.change)
    }

    /// Loads an entry into the form for editing.
    pub fn begin_edit<F, N>(
        &mut self,
        id: EntryId,
        form: &mut F,
        notifier: &mut N,
    ) -> Result<ContestEntry, FormError>
    where
        F: FormSurface + ?Sized,
        N: Notifier + ?Sized,
    {
        let entry = match self.store.find(id) {
            Ok(entry) => entry,
            Err(err) => {
                notifier.notify(Notification::error("Entry not found"));
                return Err(err.into());
            }
        };

        form.set_value(ENTRY_ID, &entry.id.to_string());
        form.set_value(NAME, &entry.name);
        form.set_value(DEPARTMENT, &entry.department);
        form.set_value(PHOTO_TITLE, &entry.photo_title);
        form.set_text(FORM_TITLE, "Edit Entry");
        form.set_text(SUBMIT_BUTTON, "Update Entry");
        form.set_visible(CANCEL_BUTTON, true);
        self.editing = Some(entry.id);
        Ok(entry)
    }

    /// Deletes an entry once the user confirms.
    ///
    /// Returns `Ok(None)` when the user declines. An unknown id is reported
    /// through `notifier` and returned as [`Change::Missing`].
    pub fn delete<C, N>(
        &mut self,
        id: EntryId,
        confirm: &mut C,
        notifier: &mut N,
    ) -> Result<Option<Change>, FormError>
    where
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        if !confirm.confirm(DELETE_PROMPT) {
            return Ok(None);
        }

        let applied = match self.store.remove(id) {
            Ok(applied) => applied,
            Err(err) => {
                notifier.notify(Notification::error("Failed to save entries"));
                return Err(err.into());
            }
        };

        if applied.change.is_mutation() {
            info!(id, "entry deleted");
            notifier.notify(Notification::success("Entry deleted successfully"));
            if self.editing == Some(id) {
                self.editing = None;
            }
        } else {
            notifier.notify(Notification::error("Entry not found"));
        }
        Ok(Some(applied.change))
    }

    /// Runs the action bound to a table row.
    pub fn dispatch<F, C, N>(
        &mut self,
        action: RowAction,
        form: &mut F,
        confirm: &mut C,
        notifier: &mut N,
    ) -> Result<(), FormError>
    where
        F: FormSurface + ?Sized,
        C: Confirm + ?Sized,
        N: Notifier + ?Sized,
    {
        match action {
            RowAction::Edit(id) => self.begin_edit(id, form, notifier).map(|_| ()),
            RowAction::Delete(id) => {
                let change = self.delete(id, confirm, notifier)?;
                if matches!(change, Some(Change::Removed { .. })) && form.value(ENTRY_ID) == id.to_string() {
                    self.reset(form);
                }
                Ok(())
            }
        }
    }

    /// Returns the form to "add" mode with no values or errors.
    pub fn reset<F: FormSurface + ?Sized>(&mut self, form: &mut F) {
        form.reset(&[ENTRY_ID, NAME, DEPARTMENT, PHOTO_TITLE]);
        form.set_value(ENTRY_ID, "");
        form.set_text(FORM_TITLE, "Add New Entry");
        form.set_text(SUBMIT_BUTTON, "Add Entry");
        form.set_visible(CANCEL_BUTTON, false);
        for spec in &FIELDS {
            form.clear_error(spec.id, spec.error_id);
        }
        self.editing = None;
    }
}

//! Table view of the stored entries.

use crate::{entry::ContestEntry, types::EntryId};

/// Action bound to one rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    /// Load the row's entry into the form.
    Edit(EntryId),
    /// Delete the row's entry after confirmation.
    Delete(EntryId),
}

impl RowAction {
    /// Entry the action targets.
    pub fn id(&self) -> EntryId {
        match self {
            RowAction::Edit(id) | RowAction::Delete(id) => *id,
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: EntryId,
    pub name: String,
    pub department: String,
    pub photo_title: String,
    pub actions: [RowAction; 2],
}

/// Entry count plus rows in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub count: usize,
    pub rows: Vec<RowView>,
}

impl TableView {
    pub fn from_entries(entries: &[ContestEntry]) -> Self {
        let rows = entries
            .iter()
            .map(|e| RowView {
                id: e.id,
                name: e.name.clone(),
                department: e.department.clone(),
                photo_title: e.photo_title.clone(),
                actions: [RowAction::Edit(e.id), RowAction::Delete(e.id)],
            })
            .collect();
        Self {
            count: entries.len(),
            rows,
        }
    }

    /// True when the "no entries" message should replace the table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Table body markup; actions are carried as `data-action`/`data-id`
    /// attributes for listeners bound per row.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str("<tr>");
            for cell in [&row.name, &row.department, &row.photo_title] {
                out.push_str("<td>");
                out.push_str(&escape_html(cell));
                out.push_str("</td>");
            }
            out.push_str("<td class=\"actions-column\">");
            for action in &row.actions {
                let (kind, label) = match action {
                    RowAction::Edit(_) => ("edit", "Edit entry"),
                    RowAction::Delete(_) => ("delete", "Delete entry"),
                };
                out.push_str(&format!(
                    "<button class=\"action-btn {kind}-btn\" data-action=\"{kind}\" data-id=\"{}\" title=\"{label}\"></button>",
                    action.id()
                ));
            }
            out.push_str("</td></tr>");
        }
        out
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        if self.is_empty() {
            return "No entries yet.\n".to_string();
        }
        let mut out = format!("{} entr{}\n", self.count, if self.count == 1 { "y" } else { "ies" });
        for row in &self.rows {
            out.push_str(&format!(
                "{:>15}  {:<24}  {:<20}  {}\n",
                row.id, row.name, row.department, row.photo_title
            ));
        }
        out
    }
}

/// Escapes text for use inside HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

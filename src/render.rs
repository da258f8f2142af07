//! Renderer
//!
//! Turns todos into plain view descriptions for the components: truncated
//! and escaped text, CSS classes, links, empty-state copy.

use chrono::{DateTime, NaiveDateTime};

use crate::config::{NOTE_PREVIEW_CHARS, TITLE_PREVIEW_CHARS};
use crate::models::Todo;
use crate::route::Page;
use crate::view_model::DisplayList;

const ELLIPSIS: &str = "...";

/// One list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowView {
    pub id: u64,
    pub title: String,
    pub note: Option<String>,
    pub completed: bool,
    pub class: &'static str,
    pub href: String,
}

impl TodoRowView {
    pub fn from_todo(todo: &Todo) -> Self {
        let note = Some(todo.note.as_str())
            .filter(|n| !n.is_empty())
            .map(|n| truncate(n, NOTE_PREVIEW_CHARS));
        Self {
            id: todo.id,
            title: truncate(&todo.title, TITLE_PREVIEW_CHARS),
            note,
            completed: todo.completed,
            class: if todo.completed { "todo-item completed" } else { "todo-item" },
            href: Page::Detail(todo.id).href(),
        }
    }
}

/// Cut to `max` characters, appending `...` when something was dropped
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full note for the detail view, escaped, line breaks kept
pub fn note_html(note: &str) -> String {
    if note.trim().is_empty() {
        return "<em class=\"muted\">No notes</em>".to_string();
    }
    escape_html(note).replace("\r\n", "\n").replace('\n', "<br>")
}

/// Copy for the two empty states; `None` when there are rows to show
pub fn empty_message(list: &DisplayList) -> Option<String> {
    match list {
        DisplayList::NoTodos => Some("No todos yet. Add your first task above! 🎯".to_string()),
        DisplayList::NoMatches { query } => Some(format!("No todos found matching \"{}\" 🔍", query)),
        DisplayList::Items(_) => None,
    }
}

pub fn rows(list: &DisplayList) -> Vec<TodoRowView> {
    match list {
        DisplayList::Items(items) => items.iter().map(TodoRowView::from_todo).collect(),
        _ => Vec::new(),
    }
}

/// (label, class) for the detail view's status badge
pub fn completed_badge(completed: bool) -> (&'static str, &'static str) {
    if completed {
        ("✓ Completed", "completed-badge yes")
    } else {
        ("○ Not Completed", "completed-badge no")
    }
}

/// Server timestamps come as RFC 3339 or zone-less ISO; anything else is shown raw
pub fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return "-".to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return parsed.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_string()
}

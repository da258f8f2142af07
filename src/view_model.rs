//! Filter/Sort View Model
//!
//! Derives the display list from the cache. Pure: nothing here touches the
//! network or the DOM, and the cache is never reordered in place.

use std::cmp::Ordering;

use crate::models::Todo;

/// Sort options offered by the list toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Server order
    #[default]
    Default,
    TitleAsc,
    TitleDesc,
    /// Completed first
    Completed,
    /// Incomplete first
    Uncompleted,
}

/// (value, label) pairs for the sort `<select>`
pub const SORT_OPTIONS: &[(SortKey, &str)] = &[
    (SortKey::Default, "Default order"),
    (SortKey::TitleAsc, "Title (A-Z)"),
    (SortKey::TitleDesc, "Title (Z-A)"),
    (SortKey::Completed, "Completed first"),
    (SortKey::Uncompleted, "Uncompleted first"),
];

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::Completed => "completed",
            SortKey::Uncompleted => "uncompleted",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "title-asc" => SortKey::TitleAsc,
            "title-desc" => SortKey::TitleDesc,
            "completed" => SortKey::Completed,
            "uncompleted" => SortKey::Uncompleted,
            _ => SortKey::Default,
        }
    }
}

/// What the list area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayList {
    /// The account has no todos at all
    NoTodos,
    /// Todos exist but none match the query
    NoMatches { query: String },
    Items(Vec<Todo>),
}

/// Case-insensitive substring match on title or note. Empty query matches everything.
pub fn matches_query(todo: &Todo, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    todo.title.to_lowercase().contains(&needle) || todo.note.to_lowercase().contains(&needle)
}

/// Filter then stable-sort a copy of `todos`.
pub fn compute(todos: &[Todo], query: &str, sort_key: SortKey) -> Vec<Todo> {
    let mut result: Vec<Todo> = todos.iter().filter(|t| matches_query(t, query)).cloned().collect();

    // slice::sort_by is stable, so ties keep server order
    match sort_key {
        SortKey::Default => {}
        SortKey::TitleAsc => result.sort_by(|a, b| compare_titles(&a.title, &b.title)),
        SortKey::TitleDesc => result.sort_by(|a, b| compare_titles(&b.title, &a.title)),
        SortKey::Completed => result.sort_by_key(|t| !t.completed),
        SortKey::Uncompleted => result.sort_by_key(|t| t.completed),
    }
    result
}

/// `compute` plus the two distinct empty states
pub fn display(todos: &[Todo], query: &str, sort_key: SortKey) -> DisplayList {
    if todos.is_empty() {
        return DisplayList::NoTodos;
    }
    let items = compute(todos, query, sort_key);
    if items.is_empty() {
        DisplayList::NoMatches { query: query.to_string() }
    } else {
        DisplayList::Items(items)
    }
}

// ========================
// Title Collation
// ========================

/// Locale-style ordering: compare on base letters first (case and common
/// Latin diacritics folded), then break ties on the raw text so that
/// distinct titles never compare equal.
pub fn compare_titles(left: &str, right: &str) -> Ordering {
    primary_key(left)
        .cmp(&primary_key(right))
        .then_with(|| tertiary_key(left).cmp(&tertiary_key(right)))
        .then_with(|| left.cmp(right))
}

fn primary_key(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).map(fold_diacritic).collect()
}

/// Lowercase before uppercase on otherwise-equal text
fn tertiary_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

fn fold_diacritic(ch: char) -> char {
    match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'æ' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => ch,
    }
}

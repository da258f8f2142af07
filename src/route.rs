//! Page Routing
//!
//! Two pages share one bundle: the list, and the detail view selected by
//! `?id=<todo id>`.

use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    List,
    Detail(u64),
}

impl Page {
    /// Parse `location.search` (with or without the leading `?`).
    ///
    /// An `id` that is present but not a number still routes to the list.
    pub fn from_search(search: &str) -> Self {
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "id")
            .and_then(|(_, value)| percent_decode_str(value).decode_utf8().ok()?.trim().parse().ok())
            .map(Page::Detail)
            .unwrap_or(Page::List)
    }

    pub fn href(&self) -> String {
        match self {
            Page::List => "./".to_string(),
            Page::Detail(id) => format!("?id={}", id),
        }
    }

    /// Only the list page needs the todo collection
    pub fn shows_list(&self) -> bool {
        matches!(self, Page::List)
    }

    /// The page the browser is currently on
    pub fn current() -> Self {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .map(|search| Page::from_search(&search))
            .unwrap_or(Page::List)
    }
}

/// Full page navigation
pub fn navigate(page: Page) {
    let Some(window) = web_sys::window() else { return };
    if let Err(e) = window.location().set_href(&page.href()) {
        log::warn!("[ROUTE] navigation failed: {:?}", e);
    }
}

//! UI Components
//!
//! Leptos components for the list page and the detail/edit page.

mod auth_panel;
mod delete_confirm_button;
mod flash_banner;
mod header_bar;
mod list_toolbar;
mod new_todo_form;
mod todo_detail;
mod todo_list;
mod todo_row;

pub use auth_panel::AuthPanel;
pub use delete_confirm_button::DeleteConfirmButton;
pub use flash_banner::FlashBanner;
pub use header_bar::HeaderBar;
pub use list_toolbar::ListToolbar;
pub use new_todo_form::NewTodoForm;
pub use todo_detail::TodoDetail;
pub use todo_list::TodoList;
pub use todo_row::TodoRow;

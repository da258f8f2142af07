//! Todo Frontend Entry Point

mod api;
mod app;
mod cache;
mod components;
mod config;
mod context;
mod edit_session;
mod error;
mod logging;
mod models;
mod render;
mod route;
mod session;
mod store;
mod view_model;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info });
    mount_to_body(App);
}

//! Todo Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod store;
mod time;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    // Only fails if a logger is already installed
    let _ = console_log::init_with_level(level);
    mount_to_body(App);
}

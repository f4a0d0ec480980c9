//! PriceLens - Dioxus Fullstack Web Application
//!
//! Scan or search a product and compare prices across retailers. The UI is
//! a single screen driven by the search session state machine; the model
//! calls run server-side behind `#[server]` functions.
//!
//! ## Running
//!
//! Development (with hot reload):
//! ```bash
//! dx serve --features web,server
//! ```
//!
//! Production build:
//! ```bash
//! dx build --release --features web,server
//! ```

#![allow(non_snake_case)]

mod app;
mod capture;
mod components;
mod lookup;
mod server_fns;
mod session;
mod types;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Launch the Dioxus app
    // In fullstack mode, this handles both server and client
    dioxus::launch(app::App);
}

//! # Bazaar Desktop Application Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Desktop                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Tauri WebView                               │  │
//! │  │  pages, layouts, alert banner, login modal                       │  │
//! │  │                              │                                   │  │
//! │  │        invoke('command')     │     listen('store://transition')  │  │
//! │  └──────────────────────────────┼───────────────────────────────────┘  │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  lib.rs ─────► logging, config, builder                         │  │
//! │  │  plugins.rs ─► UI host → router → store                         │  │
//! │  │  commands/ ──► ui, alert, session, router                       │  │
//! │  │  state/ ─────► ConfigState, RouterState, StoreState             │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

// Prevents an additional console window on Windows in release
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

fn main() {
    bazaar_desktop_lib::run();
}

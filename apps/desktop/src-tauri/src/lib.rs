//! # Bazaar Desktop Library
//!
//! Configures and runs the Tauri app hosting the marketplace webview.
//!
//! ## Module Organization
//! ```text
//! bazaar_desktop_lib/
//! ├── lib.rs          ◄─── You are here (Tauri setup & run)
//! ├── plugins.rs      ◄─── UI host, router and store registration
//! ├── emitter.rs      ◄─── Forwards store transitions to the webview
//! ├── state/
//! │   └── mod.rs      ◄─── ConfigState, RouterState, StoreState
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── ui.rs       ◄─── Drawer, modal, product, snapshot
//! │   ├── alert.rs    ◄─── Alert banner
//! │   ├── session.rs  ◄─── Login, OTP, customer info
//! │   └── router.rs   ◄─── Route resolution and recovery
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod emitter;
pub mod error;
pub mod plugins;
pub mod state;

use bazaar_shell::ShellConfig;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Runs the Tauri application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Tracing ───────────────────────────────────────────────► │
/// │     • RUST_LOG overrides the default filter                             │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → bazaar.toml → BAZAAR_* environment                     │
/// │     • invalid configuration falls back to defaults                      │
/// │                                                                         │
/// │  3. Register Plugins (in setup) ──────────────────────────────────────► │
/// │     • UI host: config state, main window                                │
/// │     • Router: route table, persistent local storage                     │
/// │     • Store: application state, dismiss timers, event forwarding        │
/// │                                                                         │
/// │  4. Build & Run Tauri App ────────────────────────────────────────────► │
/// │     • Register all commands                                             │
/// │     • Launch window                                                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() {
    init_tracing();

    info!("Starting Bazaar Desktop Application");

    let config = ShellConfig::load_or_default(None);

    plugins::register_plugins(tauri::Builder::default(), config)
        .invoke_handler(tauri::generate_handler![
            // UI flag commands
            commands::ui::get_state,
            commands::ui::get_backend_url,
            commands::ui::toggle_drawer,
            commands::ui::set_modal_open,
            commands::ui::set_modal_type,
            commands::ui::set_modal_message,
            commands::ui::get_show_product,
            commands::ui::set_show_product,
            // Alert commands
            commands::alert::show_alert,
            commands::alert::reopen_alert,
            commands::alert::set_alert_open,
            commands::alert::set_button_alert_visible,
            // Session commands
            commands::session::set_logged_in,
            commands::session::set_otp_valid,
            commands::session::load_customer_info,
            commands::session::get_customer_info,
            commands::session::set_session_item,
            commands::session::remove_session_item,
            // Router commands
            commands::router::get_routes,
            commands::router::resolve_route,
            commands::router::report_navigation_error,
            commands::router::router_ready,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_shell=trace` - Trace the runtime layer only
/// - Default: INFO, DEBUG for bazaar crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar_shell=debug,bazaar_desktop_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

//! # Tauri Commands
//!
//! Commands the webview calls via `invoke()`. Store mutations return the
//! snapshot right after the mutation; the same snapshot is also emitted as a
//! `store://transition` event.
//!
//! ## Command Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ui.rs        get_state, get_backend_url, toggle_drawer,                │
//! │               set_modal_open, set_modal_type, set_modal_message,        │
//! │               get_show_product, set_show_product                        │
//! │                                                                         │
//! │  alert.rs     show_alert, reopen_alert, set_alert_open,                 │
//! │               set_button_alert_visible                                  │
//! │                                                                         │
//! │  session.rs   set_logged_in, set_otp_valid, load_customer_info,         │
//! │               get_customer_info, set_session_item, remove_session_item  │
//! │                                                                         │
//! │  router.rs    get_routes, resolve_route, report_navigation_error,       │
//! │               router_ready                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod alert;
pub mod router;
pub mod session;
pub mod ui;

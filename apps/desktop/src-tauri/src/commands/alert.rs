//! # Alert Commands
//!
//! The banner auto-dismisses after the configured delay. Rapid repeated
//! `show_alert` calls keep only the latest timer, so the banner closes one
//! full delay after the last call.

use bazaar_core::StateSnapshot;
use tauri::State;

use crate::error::ApiError;
use crate::state::StoreState;

/// Opens the banner with `alert_type` / `message` and (re)starts its timer.
#[tauri::command]
pub async fn show_alert(
    store: State<'_, StoreState>,
    alert_type: String,
    message: String,
) -> Result<StateSnapshot, ApiError> {
    store.show_alert(alert_type, message);
    Ok(store.snapshot())
}

/// Re-shows the last alert with a fresh timer.
#[tauri::command]
pub async fn reopen_alert(store: State<'_, StoreState>) -> Result<StateSnapshot, ApiError> {
    store.reopen_alert();
    Ok(store.snapshot())
}

/// Sets the open flag directly; a running timer keeps running.
#[tauri::command]
pub async fn set_alert_open(
    store: State<'_, StoreState>,
    open: bool,
) -> Result<StateSnapshot, ApiError> {
    store.set_alert_open(open);
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn set_button_alert_visible(
    store: State<'_, StoreState>,
    visible: bool,
) -> Result<StateSnapshot, ApiError> {
    store.set_button_alert_visible(visible);
    Ok(store.snapshot())
}

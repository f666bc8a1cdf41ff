//! # Session Commands
//!
//! The webview mirrors its login response into session storage under
//! `userInformation`; `load_customer_info` then derives the customer profile
//! from it.
//!
//! ```text
//! login ok ──► set_session_item("userInformation", json)
//!          ──► set_logged_in(true)
//!          ──► load_customer_info() ──► customerInfo
//!                                   └─► (missing/corrupt) login modal
//! ```

use bazaar_core::{CustomerProfile, StateSnapshot};
use tauri::State;

use crate::error::ApiError;
use crate::state::StoreState;

#[tauri::command]
pub async fn set_logged_in(
    store: State<'_, StoreState>,
    logged_in: bool,
) -> Result<StateSnapshot, ApiError> {
    store.set_logged_in(logged_in);
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn set_otp_valid(
    store: State<'_, StoreState>,
    valid: bool,
) -> Result<StateSnapshot, ApiError> {
    store.set_otp_valid(valid);
    Ok(store.snapshot())
}

/// Refreshes `customerInfo` from session storage.
///
/// Never fails: a missing or unreadable record clears the profile and opens
/// the login-required modal, which the returned snapshot reflects.
#[tauri::command]
pub async fn load_customer_info(store: State<'_, StoreState>) -> Result<StateSnapshot, ApiError> {
    store.load_customer_info();
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn get_customer_info(
    store: State<'_, StoreState>,
) -> Result<Option<CustomerProfile>, ApiError> {
    Ok(store.customer_info())
}

#[tauri::command]
pub async fn set_session_item(
    store: State<'_, StoreState>,
    key: String,
    value: String,
) -> Result<(), ApiError> {
    if key.is_empty() {
        return Err(ApiError::validation("key must not be empty"));
    }
    store.set_session_item(&key, &value)?;
    Ok(())
}

#[tauri::command]
pub async fn remove_session_item(
    store: State<'_, StoreState>,
    key: String,
) -> Result<(), ApiError> {
    store.remove_session_item(&key)?;
    Ok(())
}

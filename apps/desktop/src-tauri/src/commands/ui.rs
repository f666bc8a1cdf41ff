//! UI flag commands: drawer, modal, product-detail buffer.

use bazaar_core::{ProductSummary, StateSnapshot};
use tauri::State;

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Full state snapshot, used by the webview on startup.
#[tauri::command]
pub async fn get_state(store: State<'_, StoreState>) -> Result<StateSnapshot, ApiError> {
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn get_backend_url(config: State<'_, ConfigState>) -> Result<String, ApiError> {
    Ok(config.config().backend_url.clone())
}

#[tauri::command]
pub async fn toggle_drawer(store: State<'_, StoreState>) -> Result<StateSnapshot, ApiError> {
    store.toggle_drawer();
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn set_modal_open(
    store: State<'_, StoreState>,
    open: bool,
) -> Result<StateSnapshot, ApiError> {
    store.set_modal_open(open);
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn set_modal_type(
    store: State<'_, StoreState>,
    modal_type: String,
) -> Result<StateSnapshot, ApiError> {
    store.set_modal_type(modal_type);
    Ok(store.snapshot())
}

#[tauri::command]
pub async fn set_modal_message(
    store: State<'_, StoreState>,
    message: String,
) -> Result<StateSnapshot, ApiError> {
    store.set_modal_message(message);
    Ok(store.snapshot())
}

/// `getShowProduct`: the product record staged for the detail view.
#[tauri::command]
pub async fn get_show_product(store: State<'_, StoreState>) -> Result<ProductSummary, ApiError> {
    Ok(store.show_product())
}

/// Replaces the staged product wholesale.
#[tauri::command]
pub async fn set_show_product(
    store: State<'_, StoreState>,
    product: ProductSummary,
) -> Result<ProductSummary, ApiError> {
    store.set_show_product(product);
    Ok(store.show_product())
}

//! # Router Commands
//!
//! The webview asks the route table what to render and reports navigation
//! failures back. A stale page chunk after a redeploy triggers one reload;
//! if that does not help, the error is surfaced.

use bazaar_core::router::{Recovery, Route, RouteMatch};
use tauri::State;

use crate::error::ApiError;
use crate::state::RouterState;

#[tauri::command]
pub async fn get_routes(router: State<'_, RouterState>) -> Result<Vec<Route>, ApiError> {
    Ok(router.routes().to_vec())
}

/// Resolves a location; unknown paths resolve to `NotFound` with
/// `props.invalidPath` set.
#[tauri::command]
pub async fn resolve_route(
    router: State<'_, RouterState>,
    full_path: String,
) -> Result<RouteMatch, ApiError> {
    Ok(router.resolve(&full_path))
}

/// Decides how to recover from a failed navigation to `to_full_path`.
#[tauri::command]
pub async fn report_navigation_error(
    router: State<'_, RouterState>,
    message: String,
    to_full_path: String,
) -> Result<Recovery, ApiError> {
    Ok(router.on_error(&message, &to_full_path)?)
}

/// Called once the initial navigation succeeded.
#[tauri::command]
pub async fn router_ready(router: State<'_, RouterState>) -> Result<(), ApiError> {
    router.on_ready()?;
    Ok(())
}

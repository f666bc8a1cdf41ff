//! # Navigation Guard
//!
//! Owns the route table and the local storage holding the reload flag, and
//! logs what the webview's router reports back.
//!
//! ```text
//! webview router                         NavigationGuard
//! ──────────────                         ───────────────
//! resolve("/posts/3")  ───────────────►  RouteMatch (NotFound fallback)
//! onError(err, to)     ───────────────►  Recovery::{Reload, GiveUp, Report}
//! isReady()            ───────────────►  clear reload flag
//! ```

use std::sync::{Mutex, PoisonError};

use bazaar_core::router::{self, Recovery, Route, RouteMatch, Router};
use bazaar_core::KeyValueStorage;
use tracing::{debug, error, info};

use crate::error::{ShellError, ShellResult};

pub struct NavigationGuard<S: KeyValueStorage> {
    router: Router,
    local: Mutex<S>,
}

impl<S: KeyValueStorage> NavigationGuard<S> {
    pub fn new(router: Router, local: S) -> Self {
        info!(routes = router.routes().len(), "Route table ready");
        NavigationGuard {
            router,
            local: Mutex::new(local),
        }
    }

    pub fn routes(&self) -> &[Route] {
        self.router.routes()
    }

    pub fn resolve(&self, full_path: &str) -> RouteMatch {
        let matched = self.router.resolve(full_path);
        if matched.is_not_found() {
            debug!(path = %matched.path, "No route matched, rendering NotFound");
        }
        matched
    }

    /// Handles a failed navigation to `to_full_path`.
    pub fn on_error(&self, message: &str, to_full_path: &str) -> ShellResult<Recovery> {
        let recovery = {
            let mut local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
            router::recover_from_navigation_error(&mut *local, message, to_full_path)
                .map_err(ShellError::storage)?
        };

        match &recovery {
            Recovery::Reload { full_path } => {
                info!(%full_path, "Reloading page to fix dynamic import error");
            }
            Recovery::GiveUp => {
                error!(%message, "Dynamic import error, reloading page did not fix it");
            }
            Recovery::Report => {
                error!(%message, to = %to_full_path, "Navigation failed");
            }
        }

        Ok(recovery)
    }

    /// Called once the router finished its initial navigation.
    pub fn on_ready(&self) -> ShellResult<()> {
        let mut local = self.local.lock().unwrap_or_else(PoisonError::into_inner);
        router::mark_router_ready(&mut *local).map_err(ShellError::storage)?;
        debug!("Router ready, reload flag cleared");
        Ok(())
    }
}

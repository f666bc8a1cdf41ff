//! # Plugin Registration
//!
//! Installs the app's collaborators into the Tauri builder in a fixed order:
//!
//! ```text
//! register_plugins(builder)
//!   │
//!   ├─► 1. UI host   ConfigState, main window
//!   ├─► 2. Router    RouterState (route table + local storage)
//!   └─► 3. Store     StoreState (+ tracing and webview observers)
//! ```
//!
//! The store comes last: its observers emit through the app handle, and the
//! webview may only receive transitions once routing is available.

use std::error::Error;
use std::sync::Arc;

use bazaar_core::router::Router;
use bazaar_core::MemoryStorage;
use bazaar_shell::{FileStorage, NavigationGuard, ShellConfig, Store, TracingObserver};
use tauri::{App, Builder, Manager, Runtime};
use tracing::{info, warn};

use crate::emitter::TauriEmitter;
use crate::state::{ConfigState, RouterState, StoreState};

/// Page files shipped with the frontend bundle, relative to `src/pages`.
pub const PAGES: &[&str] = &[
    "index.vue",
    "login.vue",
    "signup.vue",
    "posts/index.vue",
    "posts/[id].vue",
    "posts/register.vue",
    "posts/[id]/edit.vue",
    "my/index.vue",
    "my/likes.vue",
    "my/posts.vue",
    "chat/index.vue",
    "chat/[roomId].vue",
];

type SetupResult = Result<(), Box<dyn Error>>;

/// Returns `builder` with UI host, router and store installed at setup.
pub fn register_plugins<R: Runtime>(builder: Builder<R>, config: ShellConfig) -> Builder<R> {
    builder.setup(move |app| {
        install_ui_host(app, &config)?;
        install_router(app, &config)?;
        install_store(app, &config)?;
        info!("Plugins registered");
        Ok(())
    })
}

fn install_ui_host<R: Runtime>(app: &mut App<R>, config: &ShellConfig) -> SetupResult {
    if app.get_webview_window("main").is_none() {
        warn!("Main window not found; UI host running headless");
    }
    app.manage(ConfigState::new(config.clone()));
    Ok(())
}

fn install_router<R: Runtime>(app: &mut App<R>, config: &ShellConfig) -> SetupResult {
    let path = config
        .local_storage_file()
        .ok_or("Could not determine app data directory")?;
    info!(?path, "Local storage path determined");

    let local = FileStorage::open(path)?;
    let router = Router::new(PAGES.iter(), &config.layouts).with_base(config.base_path.as_str());

    let guard: RouterState = NavigationGuard::new(router, local);
    app.manage(guard);
    Ok(())
}

fn install_store<R: Runtime>(app: &mut App<R>, config: &ShellConfig) -> SetupResult {
    // Dismiss timers run on Tauri's tokio runtime.
    let runtime = tauri::async_runtime::block_on(async { tokio::runtime::Handle::current() });

    let store: StoreState = Store::with_runtime(config, MemoryStorage::new(), runtime);
    store.add_observer(Arc::new(TracingObserver));
    store.add_observer(Arc::new(TauriEmitter::new(app.handle().clone())));

    app.manage(store);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bazaar_core::router::Layouts;

    #[test]
    fn test_pages_produce_unique_route_names() {
        let router = Router::new(PAGES.iter(), &Layouts::default());
        let mut names: Vec<_> = router.routes().iter().map(|r| r.name.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn test_page_table_resolves_dynamic_routes() {
        let router = Router::new(PAGES.iter(), &Layouts::default());
        assert_eq!(router.resolve("/posts/12").params.get("id").map(String::as_str), Some("12"));
        assert_eq!(router.resolve("/posts/register").component, "posts/register");
        assert!(router.resolve("/cart").is_not_found());
    }
}

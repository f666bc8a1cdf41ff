//! # bazaar-shell: Runtime Layer for the Bazaar Shell
//!
//! Runs the pure state logic of `bazaar-core` inside a real process: tokio
//! timers for alert dismissal, storage backends, logging, configuration.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        bazaar-shell                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │ Store                        │   │ NavigationGuard              │   │
//! │  │                              │   │                              │   │
//! │  │ Mutex<ApplicationState>      │   │ Router (pages + NotFound)    │   │
//! │  │ one tokio dismiss task       │   │ local storage (reload flag)  │   │
//! │  │ session storage              │   │                              │   │
//! │  └──────────────┬───────────────┘   └──────────────────────────────┘   │
//! │                 │ Transition                                            │
//! │                 ▼                                                       │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │ TransitionObserver           │   │ ShellConfig                  │   │
//! │  │ TracingObserver / Tauri emit │   │ defaults → toml → env        │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use bazaar_core::MemoryStorage;
//! use bazaar_shell::{ShellConfig, Store, TracingObserver};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), bazaar_shell::ShellError> {
//! let config = ShellConfig::load_or_default(None);
//! let store = Store::new(&config, MemoryStorage::new())?;
//! store.add_observer(Arc::new(TracingObserver));
//!
//! store.show_alert("success", "게시글이 등록되었습니다.");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod navigation;
pub mod observer;
pub mod storage;
pub mod store;

pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use navigation::NavigationGuard;
pub use observer::{TracingObserver, Transition, TransitionObserver};
pub use storage::FileStorage;
pub use store::Store;

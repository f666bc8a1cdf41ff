//! # State Module
//!
//! Managed state for the Tauri desktop app. Each plugin registers its own
//! type, so commands declare exactly what they touch.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌────────────────────────┐  ┌────────────────────┐  │
//! │  │ ConfigState  │  │ RouterState            │  │ StoreState         │  │
//! │  │              │  │                        │  │                    │  │
//! │  │ ShellConfig  │  │ NavigationGuard<       │  │ Store<             │  │
//! │  │ (read-only)  │  │   FileStorage>         │  │   MemoryStorage>   │  │
//! │  └──────────────┘  └────────────────────────┘  └────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: read-only after setup                                  │
//! │  • RouterState: local storage behind a Mutex                           │
//! │  • StoreState: one Mutex over state + dismiss timer                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bazaar_core::MemoryStorage;
use bazaar_shell::{FileStorage, NavigationGuard, ShellConfig, Store};

/// Application store. Session storage lives as long as the window.
pub type StoreState = Store<MemoryStorage>;

/// Route table plus local storage persisted across reloads.
pub type RouterState = NavigationGuard<FileStorage>;

/// Configuration the app was started with.
#[derive(Debug, Clone)]
pub struct ConfigState {
    config: ShellConfig,
}

impl ConfigState {
    pub fn new(config: ShellConfig) -> Self {
        ConfigState { config }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}

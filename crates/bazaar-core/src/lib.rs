//! # bazaar-core: Pure State Logic for the Bazaar Shell
//!
//! This crate holds the application state of the Bazaar desktop shell and
//! every rule that changes it. It performs no I/O: no timers, no files, no
//! logging.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Shell Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Webview (pages, modals, alerts)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Tauri IPC                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Tauri Commands (apps/desktop)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        bazaar-shell (Store facade, timers, storage, config)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   state   │  │   alert   │  │  session  │  │  router   │  │   │
//! │  │   │ Mutation  │  │  tickets  │  │  records  │  │  routes   │  │   │
//! │  │   │ Snapshot  │  │  phases   │  │  customer │  │  recovery │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOGGING • DETERMINISTIC              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`] - `ApplicationState`, the `Mutation` set and `StateSnapshot`
//! - [`alert`] - Alert visibility state machine with dismiss tickets
//! - [`session`] - Parsing of the stored user-information record
//! - [`router`] - Page-to-route generation, path resolution, reload recovery
//! - [`storage`] - Key-value storage trait and an in-memory backend
//! - [`types`] - Opaque payload types (customer profile, product summary)
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{ApplicationState, FollowUp, Mutation};
//!
//! let mut state = ApplicationState::new("http://localhost:3000");
//!
//! let follow_up = state.commit(Mutation::ShowAlert {
//!     alert_type: "success".into(),
//!     message: "Saved".into(),
//! });
//!
//! // The caller is expected to schedule the dismiss for this ticket.
//! assert!(matches!(follow_up, Some(FollowUp::ScheduleDismiss(_))));
//! assert!(state.snapshot().is_alert_open);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod alert;
pub mod error;
pub mod router;
pub mod session;
pub mod state;
pub mod storage;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use alert::{AlertTimer, DismissTicket};
pub use error::{CoreError, CoreResult};
pub use state::{ApplicationState, FollowUp, Mutation, StateSnapshot};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use types::{CustomerProfile, ProductSummary};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Backend URL used when configuration does not provide one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";

/// Delay before an alert opened by `ShowAlert` closes itself.
pub const ALERT_DISMISS_DELAY_MS: u64 = 2000;

/// Session storage key holding the serialized user-information record.
pub const USER_INFORMATION_KEY: &str = "userInformation";

/// Modal message shown when a page needs a logged-in customer.
pub const LOGIN_REQUIRED_MESSAGE: &str = "로그인이 필요한 서비스입니다.";

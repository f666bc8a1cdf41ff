//! # Transition Observers
//!
//! Every committed mutation is reported to the registered observers after the
//! state lock is released. Observers receive the mutation name, never its
//! payload, so raw session data does not end up in logs or events.

use bazaar_core::StateSnapshot;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// One committed state transition.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Increases by one per commit; lets consumers drop out-of-order events.
    pub sequence: u64,

    /// Mutation name, e.g. `SHOW_ALERT`.
    pub mutation: &'static str,

    pub at: DateTime<Utc>,

    /// State right after the mutation.
    pub snapshot: StateSnapshot,
}

/// Trait for reacting to state transitions (implemented by Tauri integration).
pub trait TransitionObserver: Send + Sync {
    fn on_transition(&self, transition: &Transition);
}

/// Logs every transition at debug level.
pub struct TracingObserver;

impl TransitionObserver for TracingObserver {
    fn on_transition(&self, transition: &Transition) {
        debug!(
            sequence = transition.sequence,
            mutation = transition.mutation,
            alert_open = transition.snapshot.is_alert_open,
            modal_open = transition.snapshot.is_modal_open,
            "State transition"
        );
    }
}

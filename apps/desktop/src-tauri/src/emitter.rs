//! Forwards store transitions to the webview as `store://transition` events.

use bazaar_shell::{Transition, TransitionObserver};
use tauri::{AppHandle, Emitter, Runtime};
use tracing::warn;

/// Event name the webview listens on.
pub const TRANSITION_EVENT: &str = "store://transition";

pub struct TauriEmitter<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriEmitter<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        TauriEmitter { app }
    }
}

impl<R: Runtime> TransitionObserver for TauriEmitter<R> {
    fn on_transition(&self, transition: &Transition) {
        if let Err(e) = self.app.emit(TRANSITION_EVENT, transition) {
            warn!(
                error = %e,
                sequence = transition.sequence,
                "Failed to emit store transition"
            );
        }
    }
}

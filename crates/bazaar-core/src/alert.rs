//! # Alert State Machine
//!
//! Tracks whether the transient alert is visible and which dismiss timer, if
//! any, is allowed to close it.
//!
//! ## States
//! ```text
//!                    show()                      fire(pending ticket)
//!   ┌────────┐ ─────────────────► ┌──────────────┐ ─────────────────► ┌────────┐
//!   │ Closed │                    │ Open(ticket) │                    │ Closed │
//!   └────────┘ ◄───────────────── └──────────────┘                    └────────┘
//!               set_open(false)          │  ▲
//!               (ticket stays             └──┘ show(): new ticket, old one void
//!                pending, fires
//!                as a no-op)
//! ```
//!
//! The core never owns a real timer. Each `show()` issues a fresh
//! [`DismissTicket`]; the runtime schedules a timer carrying that ticket and
//! reports back with [`AlertTimer::fire`]. Only the pending ticket closes the
//! alert, so a timer that outlived its replacement cannot close a newer alert.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Opaque handle identifying one scheduled dismiss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DismissTicket(u64);

/// Alert visibility plus the pending dismiss ticket.
#[derive(Debug, Clone, Default)]
pub struct AlertTimer {
    open: bool,
    pending: Option<DismissTicket>,
    next_ticket: u64,
}

impl AlertTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the alert and issues a ticket that replaces any pending one.
    pub fn show(&mut self) -> DismissTicket {
        self.next_ticket += 1;
        let ticket = DismissTicket(self.next_ticket);
        self.open = true;
        self.pending = Some(ticket);
        ticket
    }

    /// Handles an elapsed timer.
    ///
    /// Returns `true` when `ticket` was the pending one; the alert is then
    /// closed and the ticket cleared. Any other ticket is ignored.
    pub fn fire(&mut self, ticket: DismissTicket) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }
        self.pending = None;
        self.open = false;
        true
    }

    /// Manual override. Leaves the pending ticket untouched.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn pending(&self) -> Option<DismissTicket> {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_closed() {
        let timer = AlertTimer::new();
        assert!(!timer.is_open());
        assert!(timer.pending().is_none());
    }

    #[test]
    fn test_show_then_fire_closes() {
        let mut timer = AlertTimer::new();
        let ticket = timer.show();
        assert!(timer.is_open());
        assert_eq!(timer.pending(), Some(ticket));

        assert!(timer.fire(ticket));
        assert!(!timer.is_open());
        assert!(timer.pending().is_none());
    }

    #[test]
    fn test_reshow_voids_previous_ticket() {
        let mut timer = AlertTimer::new();
        let first = timer.show();
        let second = timer.show();
        assert_ne!(first, second);

        // The older timer elapses first and must not close the newer alert.
        assert!(!timer.fire(first));
        assert!(timer.is_open());
        assert_eq!(timer.pending(), Some(second));

        assert!(timer.fire(second));
        assert!(!timer.is_open());
    }

    #[test]
    fn test_manual_close_keeps_ticket_pending() {
        let mut timer = AlertTimer::new();
        let ticket = timer.show();

        timer.set_open(false);
        assert!(!timer.is_open());
        assert_eq!(timer.pending(), Some(ticket));

        // Stale timer fires later as a redundant close.
        assert!(timer.fire(ticket));
        assert!(!timer.is_open());
    }

    #[test]
    fn test_fire_twice_is_noop() {
        let mut timer = AlertTimer::new();
        let ticket = timer.show();
        assert!(timer.fire(ticket));
        assert!(!timer.fire(ticket));
    }

    #[test]
    fn test_at_most_one_pending_ticket() {
        let mut timer = AlertTimer::new();
        let tickets: Vec<_> = (0..10).map(|_| timer.show()).collect();
        let last = *tickets.last().unwrap();

        for ticket in &tickets[..9] {
            assert!(!timer.fire(*ticket));
        }
        assert_eq!(timer.pending(), Some(last));
    }
}

//! # Application State
//!
//! The single mutable record behind every screen of the shell, and the
//! closed set of [`Mutation`]s allowed to change it.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Store facade ──► commit(Mutation) ──► ApplicationState changes        │
//! │        ▲                   │                                            │
//! │        │                   ▼                                            │
//! │        │           Option<FollowUp>                                     │
//! │        │             ├── ScheduleDismiss(ticket) → start a timer        │
//! │        └─────────────┴── ShowModal { message }   → commit two more      │
//! │                                                    mutations            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `commit` never performs a side effect itself. Anything that needs the
//! outside world (a timer, another mutation) is returned as a [`FollowUp`] for
//! the caller to carry out.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::alert::{AlertTimer, DismissTicket};
use crate::error::CoreError;
use crate::session::parse_user_information;
use crate::types::{CustomerProfile, ProductSummary};
use crate::LOGIN_REQUIRED_MESSAGE;

// =============================================================================
// Mutations
// =============================================================================

/// A named state transition.
///
/// Serialized adjacently tagged, e.g.
/// `{"type":"SHOW_ALERT","payload":{"alertType":"error","message":"X"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Mutation {
    ToggleDrawer,
    SetModalOpen(bool),
    SetModalType(String),
    SetModalMessage(String),
    /// Sets type and message, opens the alert and restarts the dismiss timer.
    ShowAlert {
        #[serde(rename = "alertType")]
        alert_type: String,
        message: String,
    },
    /// Reopens the alert with its current type and message.
    ReopenAlert,
    SetAlertOpen(bool),
    SetButtonAlertVisible(bool),
    /// A dismiss timer elapsed.
    DismissAlert(DismissTicket),
    SetOtpValid(bool),
    SetLoggedIn(bool),
    /// Refreshes `customerInfo` from the raw session-storage value.
    LoadCustomerInfo { stored: Option<String> },
    SetShowProduct(ProductSummary),
}

impl Mutation {
    /// Stable name used in logs and transition events.
    ///
    /// Logs carry only this name: `LoadCustomerInfo` holds raw session data.
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::ToggleDrawer => "TOGGLE_DRAWER",
            Mutation::SetModalOpen(_) => "SET_MODAL_OPEN",
            Mutation::SetModalType(_) => "SET_MODAL_TYPE",
            Mutation::SetModalMessage(_) => "SET_MODAL_MESSAGE",
            Mutation::ShowAlert { .. } => "SHOW_ALERT",
            Mutation::ReopenAlert => "REOPEN_ALERT",
            Mutation::SetAlertOpen(_) => "SET_ALERT_OPEN",
            Mutation::SetButtonAlertVisible(_) => "SET_BUTTON_ALERT_VISIBLE",
            Mutation::DismissAlert(_) => "DISMISS_ALERT",
            Mutation::SetOtpValid(_) => "SET_OTP_VALID",
            Mutation::SetLoggedIn(_) => "SET_LOGGED_IN",
            Mutation::LoadCustomerInfo { .. } => "LOAD_CUSTOMER_INFO",
            Mutation::SetShowProduct(_) => "SET_SHOW_PRODUCT",
        }
    }
}

/// Work a mutation hands back to its caller.
#[derive(Debug)]
pub enum FollowUp {
    /// Start a dismiss timer for this ticket, cancelling any previous one.
    ScheduleDismiss(DismissTicket),

    /// Open the modal with `message`. `cause` explains why, for logging.
    ShowModal { message: String, cause: CoreError },
}

// =============================================================================
// Application State
// =============================================================================

/// The process-wide UI and session state.
///
/// Fields are private: reads go through [`snapshot`](Self::snapshot) or the
/// accessors, writes go through [`commit`](Self::commit).
#[derive(Debug, Clone)]
pub struct ApplicationState {
    backend_url: String,

    is_drawer_open: bool,

    is_logged_in: bool,
    is_otp_valid: bool,
    customer_info: Option<CustomerProfile>,

    is_modal_open: bool,
    modal_type: String,
    modal_message: String,

    alert: AlertTimer,
    is_btn_alert_visible: bool,
    alert_type: String,
    alert_message: String,

    show_product: ProductSummary,
}

impl ApplicationState {
    /// Creates the startup state. `backend_url` is fixed for the lifetime
    /// of the state.
    pub fn new(backend_url: impl Into<String>) -> Self {
        ApplicationState {
            backend_url: backend_url.into(),
            is_drawer_open: false,
            is_logged_in: false,
            is_otp_valid: false,
            customer_info: None,
            is_modal_open: false,
            modal_type: String::new(),
            modal_message: String::new(),
            alert: AlertTimer::new(),
            is_btn_alert_visible: false,
            alert_type: String::new(),
            alert_message: String::new(),
            show_product: ProductSummary::default(),
        }
    }

    /// Applies one mutation.
    pub fn commit(&mut self, mutation: Mutation) -> Option<FollowUp> {
        match mutation {
            Mutation::ToggleDrawer => {
                self.is_drawer_open = !self.is_drawer_open;
                None
            }
            Mutation::SetModalOpen(open) => {
                self.is_modal_open = open;
                None
            }
            Mutation::SetModalType(modal_type) => {
                self.modal_type = modal_type;
                None
            }
            Mutation::SetModalMessage(message) => {
                self.modal_message = message;
                None
            }
            Mutation::ShowAlert {
                alert_type,
                message,
            } => {
                self.alert_type = alert_type;
                self.alert_message = message;
                Some(FollowUp::ScheduleDismiss(self.alert.show()))
            }
            Mutation::ReopenAlert => Some(FollowUp::ScheduleDismiss(self.alert.show())),
            Mutation::SetAlertOpen(open) => {
                self.alert.set_open(open);
                None
            }
            Mutation::SetButtonAlertVisible(visible) => {
                self.is_btn_alert_visible = visible;
                None
            }
            Mutation::DismissAlert(ticket) => {
                self.alert.fire(ticket);
                None
            }
            Mutation::SetOtpValid(valid) => {
                self.is_otp_valid = valid;
                None
            }
            Mutation::SetLoggedIn(logged_in) => {
                self.is_logged_in = logged_in;
                None
            }
            Mutation::LoadCustomerInfo { stored } => {
                match parse_user_information(stored.as_deref()) {
                    Ok(profile) => {
                        self.customer_info = Some(profile);
                        None
                    }
                    Err(cause) => {
                        self.customer_info = None;
                        Some(FollowUp::ShowModal {
                            message: LOGIN_REQUIRED_MESSAGE.to_string(),
                            cause,
                        })
                    }
                }
            }
            Mutation::SetShowProduct(product) => {
                self.show_product = product;
                None
            }
        }
    }

    /// Read-only copy of the externally visible fields.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            backend_url: self.backend_url.clone(),
            is_drawer_open: self.is_drawer_open,
            is_logged_in: self.is_logged_in,
            is_otp_valid: self.is_otp_valid,
            customer_info: self.customer_info.clone(),
            is_modal_open: self.is_modal_open,
            modal_type: self.modal_type.clone(),
            modal_message: self.modal_message.clone(),
            is_alert_open: self.alert.is_open(),
            is_btn_alert_visible: self.is_btn_alert_visible,
            alert_type: self.alert_type.clone(),
            alert_message: self.alert_message.clone(),
            show_product: self.show_product.clone(),
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// The selected product, as last set.
    pub fn show_product(&self) -> &ProductSummary {
        &self.show_product
    }

    pub fn customer_info(&self) -> Option<&CustomerProfile> {
        self.customer_info.as_ref()
    }

    /// Ticket of the dismiss timer that currently governs the alert.
    pub fn pending_dismiss(&self) -> Option<DismissTicket> {
        self.alert.pending()
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// What the webview renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StateSnapshot {
    pub backend_url: String,
    pub is_drawer_open: bool,
    pub is_logged_in: bool,
    #[serde(rename = "isOTPValid")]
    pub is_otp_valid: bool,
    pub customer_info: Option<CustomerProfile>,
    pub is_modal_open: bool,
    pub modal_type: String,
    pub modal_message: String,
    pub is_alert_open: bool,
    pub is_btn_alert_visible: bool,
    pub alert_type: String,
    pub alert_message: String,
    pub show_product: ProductSummary,
}

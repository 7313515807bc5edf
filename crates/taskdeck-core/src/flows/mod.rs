//! Form submission flows (login, registration, logout).
//!
//! A flow validates its form, sends exactly one request, and turns whatever
//! comes back into UI state: a navigation target or a single message. Errors
//! never escape a flow.
//!
//! Both form flows release the submit gate before publishing a failure, so a
//! front end re-enables its submit control and then shows the message.

mod login;
mod logout;
mod register;

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

pub use login::LoginFlow;
pub use logout::{LogoutFlow, LogoutOutcome};
pub use register::RegisterFlow;

use crate::api::ApiResponse;
use crate::forms::FieldErrors;
use crate::routes::Route;

/// Message shown when the server gives no usable explanation.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Observable state of a form flow.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowState {
    #[default]
    Idle,
    Submitting,
    Succeeded(Route),
    Failed(String),
}

impl FlowState {
    /// Returns the error line to display, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            FlowState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of a single submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The request succeeded; go here.
    Navigate(Route),
    /// Input was rejected locally; nothing was sent.
    Invalid(FieldErrors),
    /// The request was rejected or could not be completed.
    Failed(String),
    /// A submission for this form is already in flight.
    Busy,
}

/// Submit gate plus observable state for one form instance.
pub struct FormStatus {
    submitting: AtomicBool,
    state: watch::Sender<FlowState>,
}

impl Default for FormStatus {
    fn default() -> Self {
        let (state, _) = watch::channel(FlowState::Idle);
        Self {
            submitting: AtomicBool::new(false),
            state,
        }
    }
}

impl FormStatus {
    /// Returns true while a request for this form is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn state(&self) -> FlowState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    /// Closes the gate and enters `Submitting`. Returns `None` if the gate is
    /// already closed.
    fn begin(&self) -> Option<SubmitGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.state.send_replace(FlowState::Submitting);
        Some(SubmitGuard {
            status: self,
            finished: false,
        })
    }

    /// Reopens the gate, then publishes the final state.
    fn finish(&self, mut guard: SubmitGuard<'_>, state: FlowState) {
        guard.finished = true;
        self.submitting.store(false, Ordering::Release);
        self.state.send_replace(state);
    }
}

/// Holds the submit gate closed.
///
/// Dropped without [`FormStatus::finish`] (the submit future was cancelled),
/// it reopens the gate and returns the form to `Idle`.
struct SubmitGuard<'a> {
    status: &'a FormStatus,
    finished: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.status.submitting.store(false, Ordering::Release);
        self.status.state.send_replace(FlowState::Idle);
    }
}

/// Message for a non-ok response: the body's `field`, else the fallback.
fn rejection_message(response: &ApiResponse, field: &str) -> String {
    response
        .str_field(field)
        .filter(|m| !m.trim().is_empty())
        .map_or_else(|| FALLBACK_MESSAGE.to_string(), ToString::to_string)
}

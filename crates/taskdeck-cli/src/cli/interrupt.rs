//! Ctrl+C handling for in-flight requests.
//!
//! The handler only sets a flag and wakes waiters; the command that owns the
//! request decides how to stop.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static INTERRUPT_NOTIFY: OnceLock<Notify> = OnceLock::new();

#[derive(Debug)]
pub struct InterruptedError;

impl std::fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

/// Installs the Ctrl+C handler.
///
/// A second Ctrl+C exits immediately.
pub fn init() {
    if let Err(err) = ctrlc::set_handler(trigger_ctrl_c) {
        tracing::warn!(error = %err, "failed to install Ctrl+C handler");
    }
}

fn notify() -> &'static Notify {
    INTERRUPT_NOTIFY.get_or_init(Notify::new)
}

fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        std::process::exit(130);
    }
    notify().notify_waiters();
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Waits until an interrupt is triggered.
pub async fn wait_for_interrupt() {
    loop {
        let notified = notify().notified();
        tokio::pin!(notified);
        // Register before checking the flag so a trigger in between isn't lost.
        notified.as_mut().enable();
        if is_interrupted() {
            return;
        }
        notified.await;
    }
}

/// Runs `fut` unless Ctrl+C arrives first.
///
/// # Errors
/// Returns [`InterruptedError`] when interrupted; `fut` is dropped.
pub async fn or_interrupt<F: Future>(fut: F) -> anyhow::Result<F::Output> {
    tokio::select! {
        out = fut => Ok(out),
        () = wait_for_interrupt() => Err(InterruptedError.into()),
    }
}

//! Scoped default SIGINT disposition.
//!
//! A host that installs its own interrupt handler can temporarily hand SIGINT
//! back to the default disposition (terminate the process) while running a
//! unit of work, for example a blocking retry loop that should die on Ctrl-C
//! instead of being caught by the host's handler.

#![allow(unsafe_code)]

use nix::errno::Errno;
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while changing the SIGINT disposition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// The kernel rejected the new action
    #[error("failed to install default SIGINT handler: {0}")]
    Install(#[from] Errno),
}

/// Restores the SIGINT action that was in place when it was created.
///
/// Restoration happens in `Drop`, so it runs on normal return, on early
/// return through `?`, and while unwinding from a panic.
///
/// # Examples
///
/// ```rust
/// use retriable::signal::default_sigint;
///
/// # fn main() -> Result<(), retriable::signal::SignalError> {
/// {
///     let _guard = default_sigint()?;
///     // Ctrl-C terminates the process here.
/// }
/// // The previous handler is back.
/// # Ok(())
/// # }
/// ```
#[must_use = "the previous handler is restored as soon as the guard is dropped"]
pub struct SigintGuard {
    previous: SigAction,
}

impl SigintGuard {
    /// The handler that will be restored on drop.
    pub fn previous_handler(&self) -> SigHandler {
        self.previous.handler()
    }
}

impl fmt::Debug for SigintGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigintGuard")
            .field("previous_handler", &self.previous.handler())
            .finish()
    }
}

impl Drop for SigintGuard {
    fn drop(&mut self) {
        // SAFETY: reinstalls an action previously returned by sigaction(2).
        if let Err(errno) = unsafe { sigaction(Signal::SIGINT, &self.previous) } {
            tracing::warn!("failed to restore previous SIGINT handler: {}", errno);
        }
    }
}

/// Install the default SIGINT disposition until the returned guard drops.
pub fn default_sigint() -> Result<SigintGuard, SignalError> {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    // SAFETY: SIG_DFL runs no user code, so no async-signal-safety concerns.
    let previous = unsafe { sigaction(Signal::SIGINT, &default) }?;
    tracing::debug!("SIGINT reset to default disposition");
    Ok(SigintGuard { previous })
}

/// Run `f` with the default SIGINT disposition, restoring the previous one
/// afterwards.
pub fn with_default_sigint<T>(f: impl FnOnce() -> T) -> Result<T, SignalError> {
    let _guard = default_sigint()?;
    Ok(f())
}

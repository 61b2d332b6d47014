//! Spinner coordination for interactive output
//!
//! The TTY writer wraps every direct terminal write in a hold: the first
//! holder erases the animated frame, the last one to release redraws it.
//! Holds are reference counted, so overlapping writes from concurrent
//! reporters neither leave the spinner paused nor resume it early.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";
const TICK_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawTarget {
    Stderr,
    Hidden,
}

#[derive(Debug, Default)]
struct SpinnerState {
    holders: usize,
    /// Message of the running spinner, kept while it is held
    message: Option<String>,
    bar: Option<ProgressBar>,
}

/// Reference-counted suspend/resume over an `indicatif` spinner
#[derive(Debug)]
pub struct SpinnerController {
    enabled: bool,
    target: DrawTarget,
    state: Mutex<SpinnerState>,
}

impl SpinnerController {
    /// Spinner drawing to stderr; `enabled` is fixed for its whole life
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            target: DrawTarget::Stderr,
            state: Mutex::new(SpinnerState::default()),
        }
    }

    /// Spinner with hidden output (for testing)
    pub fn hidden(enabled: bool) -> Self {
        Self {
            enabled,
            target: DrawTarget::Hidden,
            state: Mutex::new(SpinnerState::default()),
        }
    }

    /// A spinner that never animates
    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Whether this spinner may animate at all
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start the spinner, or change its message when already running.
    ///
    /// While held, the message is recorded and the frame appears on release.
    pub fn start(&self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        let message = message.into();
        let mut state = self.lock();
        if let Some(bar) = &state.bar {
            bar.set_message(message.clone());
        } else if state.holders == 0 {
            state.bar = Some(self.create_bar(&message));
        }
        state.message = Some(message);
    }

    /// Stop and erase the spinner
    pub fn stop(&self) {
        let mut state = self.lock();
        state.message = None;
        if let Some(bar) = state.bar.take() {
            bar.finish_and_clear();
        }
    }

    /// Whether a spinner is running or waiting to resume after a hold
    pub fn is_active(&self) -> bool {
        self.lock().message.is_some()
    }

    /// Whether the frame is currently drawn
    pub fn is_drawn(&self) -> bool {
        self.lock().bar.is_some()
    }

    /// Number of outstanding holds
    pub fn holders(&self) -> usize {
        self.lock().holders
    }

    /// Pause rendering until the returned guard is dropped
    pub fn hold(&self) -> SpinnerHold<'_> {
        let mut state = self.lock();
        state.holders += 1;
        if state.holders == 1 {
            if let Some(bar) = state.bar.take() {
                bar.finish_and_clear();
            }
        }
        SpinnerHold { spinner: self }
    }

    fn unhold(&self) {
        let mut state = self.lock();
        state.holders = state.holders.saturating_sub(1);
        if state.holders > 0 || state.bar.is_some() {
            return;
        }
        if let Some(message) = state.message.clone() {
            state.bar = Some(self.create_bar(&message));
        }
    }

    fn create_bar(&self, message: &str) -> ProgressBar {
        let target = match self.target {
            DrawTarget::Stderr => ProgressDrawTarget::stderr(),
            DrawTarget::Hidden => ProgressDrawTarget::hidden(),
        };
        let bar = ProgressBar::with_draw_target(None, target);
        bar.set_style(spinner_style());
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        bar
    }

    fn lock(&self) -> MutexGuard<'_, SpinnerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SpinnerController {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Guard returned by [`SpinnerController::hold`]
#[must_use = "the spinner resumes as soon as the hold is dropped"]
#[derive(Debug)]
pub struct SpinnerHold<'a> {
    spinner: &'a SpinnerController,
}

impl Drop for SpinnerHold<'_> {
    fn drop(&mut self) {
        self.spinner.unhold();
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_never_starts() {
        let spinner = SpinnerController::hidden(false);
        spinner.start("Loading");
        assert!(!spinner.is_active());
        assert!(!spinner.is_drawn());
    }

    #[test]
    fn test_start_and_stop() {
        let spinner = SpinnerController::hidden(true);
        spinner.start("Loading");
        assert!(spinner.is_active());
        assert!(spinner.is_drawn());

        spinner.start("Still loading");
        assert!(spinner.is_drawn());

        spinner.stop();
        assert!(!spinner.is_active());
        assert!(!spinner.is_drawn());
    }

    #[test]
    fn test_hold_erases_and_release_redraws() {
        let spinner = SpinnerController::hidden(true);
        spinner.start("Building");

        let hold = spinner.hold();
        assert!(!spinner.is_drawn());
        assert!(spinner.is_active());
        drop(hold);

        assert!(spinner.is_drawn());
        assert_eq!(spinner.holders(), 0);
    }

    #[test]
    fn test_nested_holds_resume_only_after_last_release() {
        let spinner = SpinnerController::hidden(true);
        spinner.start("Syncing");

        let first = spinner.hold();
        let second = spinner.hold();
        assert_eq!(spinner.holders(), 2);

        drop(first);
        assert!(!spinner.is_drawn());
        assert_eq!(spinner.holders(), 1);

        drop(second);
        assert!(spinner.is_drawn());
        assert_eq!(spinner.holders(), 0);
    }

    #[test]
    fn test_start_while_held_is_deferred() {
        let spinner = SpinnerController::hidden(true);
        let hold = spinner.hold();
        spinner.start("Waiting");
        assert!(spinner.is_active());
        assert!(!spinner.is_drawn());

        drop(hold);
        assert!(spinner.is_drawn());
    }

    #[test]
    fn test_stop_while_held_does_not_resume() {
        let spinner = SpinnerController::hidden(true);
        spinner.start("Deploying");
        let hold = spinner.hold();
        spinner.stop();
        drop(hold);
        assert!(!spinner.is_drawn());
        assert!(!spinner.is_active());
    }

    #[test]
    fn test_concurrent_holds_balance() {
        use std::sync::Arc;
        use std::thread;

        let spinner = Arc::new(SpinnerController::hidden(true));
        spinner.start("Working");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let spinner = Arc::clone(&spinner);
                thread::spawn(move || {
                    for _ in 0..100 {
                        let _hold = spinner.hold();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(spinner.holders(), 0);
        assert!(spinner.is_drawn());
    }
}

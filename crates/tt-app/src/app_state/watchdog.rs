//! Attach handshake: decides once per run when the splash closes and
//! whether the UI opens automatically.

use std::time::{Duration, Instant};

use tt_rpc::TrayStatus;

/// Outcome of the handshake, produced exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Settled {
    /// Run focus-or-launch.
    pub open_ui: bool,
    pub timed_out: bool,
}

#[derive(Debug)]
pub(super) struct Handshake {
    deadline: Instant,
    completed: bool,
    start_hidden: bool,
    auto_open_requested: bool,
    ui_attached: bool,
    user_closed_ui: bool,
}

impl Handshake {
    pub(super) fn new(started: Instant, timeout: Duration, auto_open: bool, start_hidden: bool) -> Self {
        Self {
            deadline: started + timeout,
            completed: false,
            start_hidden,
            auto_open_requested: auto_open && !start_hidden,
            ui_attached: false,
            user_closed_ui: false,
        }
    }

    pub(super) fn deadline(&self) -> Instant {
        self.deadline
    }

    pub(super) fn is_completed(&self) -> bool {
        self.completed
    }

    /// Whether the daemon last reported an attached UI.
    pub(super) fn ui_attached(&self) -> bool {
        self.ui_attached
    }

    pub(super) fn set_detached(&mut self) {
        self.ui_attached = false;
    }

    pub(super) fn user_closed_ui(&self) -> bool {
        self.user_closed_ui
    }

    pub(super) fn set_user_closed_ui(&mut self, closed: bool) {
        self.user_closed_ui = closed;
    }

    /// Fold in one poll result. `None` is an unreachable daemon.
    pub(super) fn observe(&mut self, status: Option<&TrayStatus>, now: Instant) -> Option<Settled> {
        match status {
            Some(s) => {
                self.ui_attached = s.ui_attached;
                if !self.start_hidden {
                    self.auto_open_requested = s.ui.auto_open;
                }
            }
            None => self.ui_attached = false,
        }
        self.settle(now)
    }

    /// Check the deadline with no new status.
    pub(super) fn tick(&mut self, now: Instant) -> Option<Settled> {
        self.settle(now)
    }

    fn settle(&mut self, now: Instant) -> Option<Settled> {
        if self.completed {
            return None;
        }
        let timed_out = now >= self.deadline;
        if !self.ui_attached && !timed_out {
            return None;
        }
        self.completed = true;
        Some(Settled {
            open_ui: self.auto_open_requested && !self.user_closed_ui,
            timed_out: timed_out && !self.ui_attached,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

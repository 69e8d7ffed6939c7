//! The display surface and its timed error revert.
//!
//! Every update bumps a sequence number. An error schedules a revert tagged
//! with the sequence number it was shown under; the revert only lands if no
//! other update happened in between, so fast typing never gets overwritten
//! by a stale value.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct PendingRevert {
    seq: u64,
    due: Instant,
    restore: String,
}

#[derive(Clone, Debug)]
pub struct Display {
    shown: String,
    seq: u64,
    pending: Option<PendingRevert>,
    error_hold: Duration,
}

impl Display {
    pub fn new(initial: impl Into<String>, error_hold: Duration) -> Self {
        Self {
            shown: initial.into(),
            seq: 0,
            pending: None,
            error_hold,
        }
    }

    pub fn text(&self) -> &str {
        &self.shown
    }

    pub fn is_showing_error(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| p.seq == self.seq)
    }

    /// Show `text`, superseding any pending revert.
    pub fn show(&mut self, text: impl Into<String>) {
        self.seq += 1;
        self.shown = text.into();
        self.pending = None;
    }

    /// Show an error now and schedule `restore` for after the hold time.
    pub fn show_error(&mut self, message: impl Into<String>, restore: impl Into<String>, now: Instant) {
        self.seq += 1;
        self.shown = message.into();
        self.pending = Some(PendingRevert {
            seq: self.seq,
            due: now + self.error_hold,
            restore: restore.into(),
        });
    }

    /// When the next revert is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Apply a due revert. Returns `true` if the shown text changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if now < pending.due => {
                self.pending = Some(pending);
                false
            }
            Some(pending) if pending.seq == self.seq => {
                self.seq += 1;
                self.shown = pending.restore;
                true
            }
            _ => false,
        }
    }
}

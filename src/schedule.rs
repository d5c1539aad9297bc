//! Recompute scheduling: debounced regeneration and fixed-rate redraw
//!
//! Nothing here reads the clock. Every operation takes the current
//! [`Instant`] so the owner decides what "now" is, and tests can step time
//! deterministically.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::EditorConfig;
use crate::gradient::GradientKeySet;
use crate::shape::ShapeSettings;

/// Holds the most recent value until edits stop arriving
///
/// Every [`push`](Self::push) replaces the pending value and restarts the
/// quiet period. [`poll`](Self::poll) releases the value once the quiet
/// period has elapsed since the last push, so a burst of edits produces one
/// release carrying the final state.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Create an idle debouncer
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    /// Quiet period after the last push
    #[inline]
    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Replace the pending value and restart the quiet period
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Whether a value is waiting to be released
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Release the pending value if its quiet period is over
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = matches!(self.pending, Some((_, deadline)) if now >= deadline);
        if due {
            self.flush()
        } else {
            None
        }
    }

    /// Release the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

/// Fires at a fixed period without ever catching up
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
    next: Instant,
}

impl FixedInterval {
    /// First tick is due one interval after `start`
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval,
            next: start + interval,
        }
    }

    /// Period between ticks
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true at most once per call when a tick is due
    ///
    /// If several periods were missed the schedule re-anchors at
    /// `now + interval` instead of firing the backlog.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        let following = self.next + self.interval;
        self.next = if following > now {
            following
        } else {
            now + self.interval
        };
        true
    }
}

/// Work that became due during one [`RecomputeScheduler::poll`]
#[derive(Debug, Clone, Default)]
pub struct DueWork {
    /// Shape snapshot to rebuild the mesh from
    pub shape: Option<Arc<ShapeSettings>>,
    /// Key snapshot to resynthesize the ramp from
    pub gradient: Option<Arc<GradientKeySet>>,
    /// Whether a frame should be drawn
    pub redraw: bool,
}

impl DueWork {
    /// Nothing to do
    pub fn is_idle(&self) -> bool {
        self.shape.is_none() && self.gradient.is_none() && !self.redraw
    }
}

/// Coalesces editing snapshots and paces redraws
#[derive(Debug, Clone)]
pub struct RecomputeScheduler {
    shape: Debouncer<Arc<ShapeSettings>>,
    gradient: Debouncer<Arc<GradientKeySet>>,
    redraw: FixedInterval,
}

impl RecomputeScheduler {
    /// Create a scheduler with the session's debounce and redraw periods
    pub fn new(config: &EditorConfig, start: Instant) -> Self {
        Self {
            shape: Debouncer::new(config.debounce),
            gradient: Debouncer::new(config.debounce),
            redraw: FixedInterval::new(config.redraw_interval, start),
        }
    }

    /// Record a new shape snapshot
    pub fn push_shape(&mut self, settings: Arc<ShapeSettings>, now: Instant) {
        self.shape.push(settings, now);
    }

    /// Record a new gradient key snapshot
    pub fn push_gradient(&mut self, keys: Arc<GradientKeySet>, now: Instant) {
        self.gradient.push(keys, now);
    }

    /// Whether any regeneration is still waiting for its quiet period
    pub fn has_pending(&self) -> bool {
        self.shape.is_pending() || self.gradient.is_pending()
    }

    /// Collect everything due at `now`
    pub fn poll(&mut self, now: Instant) -> DueWork {
        DueWork {
            shape: self.shape.poll(now),
            gradient: self.gradient.poll(now),
            redraw: self.redraw.poll(now),
        }
    }
}

//! Container resize debouncing.
//!
//! Window resizes arrive in bursts. The host feeds every notification to a
//! [`ResizeDebouncer`] and forwards only the settled size to the editor as a
//! `ContainerResized` event. Normalized box geometry never depends on this.

use std::time::Duration;
use web_time::Instant;

use crate::config::EditorPreferences;
use crate::geometry::Size;

/// Coalesces container resize notifications.
#[derive(Debug)]
pub struct ResizeDebouncer {
    /// Quiet period after the last notification.
    delay: Duration,

    /// Most recent size that has not been released yet.
    pending: Option<Size>,

    /// Time of the most recent notification.
    last_change: Option<Instant>,
}

impl ResizeDebouncer {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(crate::constants::RESIZE_DEBOUNCE_MS);

    pub fn new() -> Self {
        Self {
            delay: Self::DEFAULT_DELAY,
            pending: None,
            last_change: None,
        }
    }

    /// Debouncer using the configured quiet period.
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        Self::new().with_delay(Duration::from_millis(preferences.resize_debounce_ms))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Record a new container size.
    pub fn notify(&mut self, size: Size) {
        self.notify_at(size, Instant::now());
    }

    pub fn notify_at(&mut self, size: Size, now: Instant) {
        self.pending = Some(size);
        self.last_change = Some(now);
        log::trace!("Resize: pending {:.0}x{:.0}", size.width, size.height);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the settled size if the quiet period has passed.
    pub fn poll(&mut self) -> Option<Size> {
        self.poll_at(Instant::now())
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<Size> {
        let last_change = self.last_change?;
        if now.saturating_duration_since(last_change) < self.delay {
            return None;
        }
        self.last_change = None;
        self.pending.take()
    }

    /// Drop any pending size.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_change = None;
    }
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new()
    }
}

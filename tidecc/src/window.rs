//! Host-owned transmission variables.
//!
//! The congestion window and slow-start threshold belong to the host stack;
//! strategies read and adjust them through the callbacks but never own them.

/// Default initial congestion window: 10 segments (per RFC 6928).
pub const INITIAL_CWND: u32 = 10;

/// Send-side window variables for one connection, in whole segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Congestion window: cap on unacknowledged in-flight segments.
    pub cwnd: u32,
    /// Slow-start threshold separating exponential growth from the
    /// avoidance curve.
    pub ssthresh: u32,
}

impl Window {
    pub fn new(cwnd: u32, ssthresh: u32) -> Self {
        Self { cwnd, ssthresh }
    }

    /// Whether acknowledgments are currently handled by the slow-start rule.
    pub fn in_slow_start(&self) -> bool {
        self.cwnd <= self.ssthresh
    }

    /// The host's slow-start rule: one segment of window per acknowledged
    /// segment, which doubles the window every round trip.
    ///
    /// The window may overshoot the threshold by up to `acked`; the next
    /// acknowledgment then falls through to the avoidance path. A hard cap
    /// at the threshold would pin the window there for good once a loss sets
    /// `cwnd == ssthresh`.
    pub fn slow_start(&mut self, acked: u32) {
        self.cwnd = self.cwnd.saturating_add(acked);
    }

    /// Apply a loss verdict: the returned threshold becomes both the new
    /// window and the new threshold.
    pub fn apply_loss(&mut self, new_ssthresh: u32) {
        self.cwnd = new_ssthresh;
        self.ssthresh = new_ssthresh;
    }
}

impl Default for Window {
    fn default() -> Self {
        // A fresh connection starts in slow start with no meaningful
        // threshold yet.
        Self::new(INITIAL_CWND, u32::MAX)
    }
}

//! Process-wide usage counters.
//!
//! One `StackStats` instance outlives every connection and is mutated from
//! all of them at once, so every access goes through an atomic operation.
//! The two counters are independent: nothing orders one against the other,
//! and a pair of reads is not a consistent cross-counter snapshot.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Totals accumulated across every connection using the stack.
///
/// Always passed around explicitly (typically in an `Arc`) rather than held
/// as a process global, so each call site shows the sharing and tests can
/// inject a fresh instance.
#[derive(Debug, Default)]
pub struct StackStats {
    /// Net count of logical connections: opens and forks minus releases.
    connections: AtomicI64,
    /// Acknowledged-segment units seen across all connections. Never
    /// decremented.
    packets: AtomicU64,
}

impl StackStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one new logical connection (an open or a fork).
    pub fn connection_opened(&self) {
        self.connections.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one connection teardown.
    pub fn connection_closed(&self) {
        self.connections.fetch_sub(1, Ordering::Relaxed);
    }

    /// Add `acked` acknowledged-segment units to the packet total.
    pub fn record_acked(&self, acked: u32) {
        self.packets.fetch_add(u64::from(acked), Ordering::Relaxed);
    }

    /// Net connection count.
    pub fn connections(&self) -> i64 {
        self.connections.load(Ordering::Relaxed)
    }

    /// Total acknowledged-segment units.
    pub fn packets(&self) -> u64 {
        self.packets.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of both counters, for the shutdown report. The two
    /// loads are independent atomic reads, not a transaction.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            connections: self.connections(),
            packets: self.packets(),
        }
    }
}

/// Plain copy of the counter values at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub connections: i64,
    pub packets: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_and_closes_net_out() {
        let stats = StackStats::new();
        stats.connection_opened();
        stats.connection_opened();
        stats.connection_closed();
        assert_eq!(stats.connections(), 1);
    }

    #[test]
    fn packet_total_accumulates() {
        let stats = StackStats::new();
        stats.record_acked(3);
        stats.record_acked(0);
        stats.record_acked(7);
        assert_eq!(stats.packets(), 10);
    }

    #[test]
    fn snapshot_copies_both() {
        let stats = StackStats::new();
        stats.connection_opened();
        stats.record_acked(42);
        let snap = stats.snapshot();
        assert_eq!(snap.connections, 1);
        assert_eq!(snap.packets, 42);
    }

    #[test]
    fn connections_can_go_negative() {
        // Releases racing ahead of a reader are legal; the counter is a net,
        // not a gauge of currently-open connections.
        let stats = StackStats::new();
        stats.connection_closed();
        assert_eq!(stats.connections(), -1);
    }
}

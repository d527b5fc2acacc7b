//! Pluggable congestion control.
//!
//! Defines the `CongestionStrategy` lifecycle trait and provides the
//! `custom_cubic` strategy as the default algorithm.

pub mod cubic;

use std::fmt;

use crate::window::Window;

/// Lifecycle callbacks for one connection's congestion control.
///
/// The host transport stack owns the socket and decides when each callback
/// fires. It serializes calls for a single connection; distinct connections
/// drive their own strategy instances from any number of threads at once.
/// Implementations must not block or suspend: every callback is bounded,
/// constant-time arithmetic.
pub trait CongestionStrategy: Send + fmt::Debug {
    /// Token the strategy was registered under.
    fn name(&self) -> &'static str;

    /// A connection opened with initial window `win`.
    fn on_init(&mut self, win: &Window);

    /// The connection forked. Returns the strategy state for the child, a
    /// field-for-field copy of this one: a fork continues an existing flow's
    /// bandwidth estimate rather than probing from scratch. The host keeps
    /// the parent quiescent for the duration of the copy.
    fn on_fork(&self) -> Box<dyn CongestionStrategy>;

    /// `acked` segment units were acknowledged at tick `now`.
    fn on_ack(&mut self, win: &mut Window, acked: u32, now: u32);

    /// Loss was detected while the window stood at `win`. Returns the new
    /// slow-start threshold; shrinking the window to it is the host's job.
    fn on_loss(&mut self, win: &Window) -> u32;

    /// The connection is going away. Scrub bookkeeping before the host
    /// reclaims the slot.
    fn on_release(&mut self);
}

/// Factory for per-connection strategy instances, one per registered
/// algorithm.
pub trait StrategyBuilder: Send + Sync {
    /// Token new connections select the algorithm by.
    fn name(&self) -> &'static str;

    /// Mint the strategy state for one new connection.
    fn build(&self) -> Box<dyn CongestionStrategy>;
}

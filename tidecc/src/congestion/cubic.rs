//! The `custom_cubic` congestion strategy.
//!
//! Slow start: delegated to the host rule while `cwnd <= ssthresh`.
//! Avoidance:  target(t) = origin_point + cubic_root(t), at most one segment
//!             of growth per acknowledgment while below target.
//! On loss:    ssthresh = max(cwnd * beta / 1024, 2) and the epoch restarts.
//!
//! Every instance also feeds the shared [`StackStats`] totals.

use std::sync::Arc;

use tracing::{debug, info};

use crate::congestion::{CongestionStrategy, StrategyBuilder};
use crate::error::Result;
use crate::registry::StrategyRegistry;
use crate::stats::StackStats;
use crate::window::Window;

/// Token the strategy registers under.
pub const CUBIC_NAME: &str = "custom_cubic";

/// Multiplicative-decrease numerator over [`BETA_SCALE`]: 717/1024 ≈ 0.70,
/// a roughly 30% reduction on loss.
const BETA: u32 = 717;
/// Fixed-point scale for `beta`.
const BETA_SCALE: u32 = 1024;
/// The post-loss threshold never drops below two segments.
const MIN_SSTHRESH: u32 = 2;

/// Integer square root standing in for the true cube root of the cubic
/// curve. The flatter growth this yields is deliberate, and the function is
/// total: zero maps to zero, and it is monotone over the whole input range.
fn cubic_root(t: u64) -> u32 {
    t.isqrt() as u32
}

/// Tunables for [`CustomCubic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubicConfig {
    /// Multiplicative-decrease numerator over a 1024 scale.
    pub beta: u32,
    /// Floor for the post-loss threshold, in segments.
    pub min_ssthresh: u32,
}

impl Default for CubicConfig {
    fn default() -> Self {
        Self {
            beta: BETA,
            min_ssthresh: MIN_SSTHRESH,
        }
    }
}

/// Per-connection growth-curve bookkeeping.
///
/// Owned by exactly one connection and touched only from that connection's
/// serialized event stream, so no locking is involved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CubicState {
    /// Window observed at the last loss event; 0 until the first loss.
    last_max_cwnd: u32,
    /// Tick the current avoidance epoch began; 0 means no epoch yet.
    epoch_start: u32,
    /// Window the growth curve is measured from.
    origin_point: u32,
    /// Reserved curve-shape offset (time at which the curve would cross
    /// `last_max_cwnd`); not consulted by the current curve.
    k: u32,
}

impl CubicState {
    /// Window observed at the last loss event.
    pub fn last_max_cwnd(&self) -> u32 {
        self.last_max_cwnd
    }

    /// Tick the current avoidance epoch began; 0 while no epoch is open.
    pub fn epoch_start(&self) -> u32 {
        self.epoch_start
    }

    /// Window the growth curve is measured from.
    pub fn origin_point(&self) -> u32 {
        self.origin_point
    }

    /// Reserved curve-shape offset.
    pub fn k(&self) -> u32 {
        self.k
    }
}

/// Cubic-style congestion strategy with process-wide usage accounting.
#[derive(Debug)]
pub struct CustomCubic {
    cfg: CubicConfig,
    state: CubicState,
    stats: Arc<StackStats>,
}

impl CustomCubic {
    pub fn new(cfg: CubicConfig, stats: Arc<StackStats>) -> Self {
        Self {
            cfg,
            state: CubicState::default(),
            stats,
        }
    }

    /// Current curve bookkeeping.
    pub fn state(&self) -> CubicState {
        self.state
    }
}

impl CongestionStrategy for CustomCubic {
    fn name(&self) -> &'static str {
        CUBIC_NAME
    }

    fn on_init(&mut self, win: &Window) {
        self.state = CubicState {
            origin_point: win.cwnd,
            ..CubicState::default()
        };
        self.stats.connection_opened();
    }

    fn on_fork(&self) -> Box<dyn CongestionStrategy> {
        // The clone counts as a new logical connection.
        self.stats.connection_opened();
        Box::new(Self {
            cfg: self.cfg,
            state: self.state,
            stats: Arc::clone(&self.stats),
        })
    }

    fn on_ack(&mut self, win: &mut Window, acked: u32, now: u32) {
        self.stats.record_acked(acked);

        if win.in_slow_start() {
            win.slow_start(acked);
            return;
        }

        if self.state.epoch_start == 0 {
            // First acknowledgment above threshold this epoch: anchor the
            // curve at the current window. Tick 0 reads as "no epoch", so an
            // epoch starting exactly there re-anchors one acknowledgment
            // later.
            self.state.epoch_start = now;
            self.state.origin_point = win.cwnd;
        }

        // Ticks wrap; the elapsed time must not.
        let t = now.wrapping_sub(self.state.epoch_start);
        let target = self
            .state
            .origin_point
            .saturating_add(cubic_root(u64::from(t)));
        if target > win.cwnd {
            win.cwnd += 1;
        }
    }

    fn on_loss(&mut self, win: &Window) -> u32 {
        self.state.last_max_cwnd = win.cwnd;
        // The next avoidance acknowledgment re-anchors the curve at the
        // post-loss window instead of continuing the stale epoch.
        self.state.epoch_start = 0;

        let reduced =
            (u64::from(win.cwnd) * u64::from(self.cfg.beta) / u64::from(BETA_SCALE)) as u32;
        let thresh = reduced.max(self.cfg.min_ssthresh);
        debug!(cwnd = win.cwnd, ssthresh = thresh, "loss detected");
        thresh
    }

    fn on_release(&mut self) {
        self.stats.connection_closed();
        // Scrub so a reused slot never sees a dead connection's bookkeeping.
        self.state = CubicState::default();
    }
}

/// Builds one [`CustomCubic`] per connection, all sharing the same counters.
#[derive(Debug)]
pub struct CustomCubicBuilder {
    cfg: CubicConfig,
    stats: Arc<StackStats>,
}

impl CustomCubicBuilder {
    pub fn new(cfg: CubicConfig, stats: Arc<StackStats>) -> Self {
        Self { cfg, stats }
    }
}

impl StrategyBuilder for CustomCubicBuilder {
    fn name(&self) -> &'static str {
        CUBIC_NAME
    }

    fn build(&self) -> Box<dyn CongestionStrategy> {
        Box::new(CustomCubic::new(self.cfg, Arc::clone(&self.stats)))
    }
}

/// Register the strategy with `registry`.
///
/// A name collision is fatal to startup: the caller must abort
/// initialization rather than run half-registered.
pub fn install(registry: &StrategyRegistry, stats: Arc<StackStats>) -> Result<()> {
    registry.register(Arc::new(CustomCubicBuilder::new(
        CubicConfig::default(),
        stats,
    )))?;
    info!(strategy = CUBIC_NAME, "congestion strategy loaded");
    Ok(())
}

/// Unregister the strategy and report the totals it accumulated.
pub fn remove(registry: &StrategyRegistry, stats: &StackStats) -> Result<()> {
    registry.unregister(CUBIC_NAME)?;
    let totals = stats.snapshot();
    info!(
        strategy = CUBIC_NAME,
        connections = totals.connections,
        packets = totals.packets,
        "congestion strategy unloaded"
    );
    Ok(())
}

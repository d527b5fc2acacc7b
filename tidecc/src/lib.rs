//! TideCC -- pluggable TCP congestion control for the Tide transport stack.
//!
//! The host stack owns sockets, retransmission timers, and the receive
//! window. This crate answers the two questions the host asks per event: how
//! large the congestion window may grow, and where the slow-start threshold
//! falls after loss.
//!
//! - [`CongestionStrategy`]: the five lifecycle callbacks a connection's
//!   event stream drives (open, fork, acknowledgment, loss, teardown).
//! - [`congestion::cubic`]: the `custom_cubic` strategy -- host slow start
//!   below the threshold, square-root-approximated cubic growth above it,
//!   717/1024 multiplicative decrease on loss.
//! - [`StackStats`]: process-wide connection and packet totals, maintained
//!   atomically from every connection at once.
//! - [`StrategyRegistry`] and [`ControlSurface`]: registration plus the
//!   operator-facing switch naming the strategy for new connections.

pub mod congestion;
pub mod control;
pub mod error;
pub mod registry;
pub mod stats;
pub mod window;

// Re-export key public types at crate root.
pub use congestion::cubic::{CubicConfig, CubicState, CustomCubic, CustomCubicBuilder, CUBIC_NAME};
pub use congestion::{CongestionStrategy, StrategyBuilder};
pub use control::{ControlSurface, RegistryControl, SysctlControl, TCP_CC_CONTROL};
pub use error::{Result, TideCcError};
pub use registry::StrategyRegistry;
pub use stats::{StackStats, StatsSnapshot};
pub use window::Window;

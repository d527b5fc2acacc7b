use thiserror::Error;

/// All errors produced by the TideCC control plane.
///
/// The data path itself is total: window arithmetic is bounded integer math
/// with no failure case, so only registration and the control surface can
/// fail.
#[derive(Debug, Error)]
pub enum TideCcError {
    #[error("congestion strategy {0:?} is already registered")]
    StrategyExists(String),

    #[error("congestion strategy {0:?} is not registered")]
    UnknownStrategy(String),

    #[error("no congestion strategy is active")]
    NoActiveStrategy,

    #[error("permission denied writing {0}")]
    PermissionDenied(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TideCcError>;

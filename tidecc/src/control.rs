//! The operator-facing control surface: one readable/writable setting naming
//! the strategy that handles new connections.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Result, TideCcError};
use crate::registry::StrategyRegistry;

/// Control entry exposed by the kernel's IPv4 stack.
pub const TCP_CC_CONTROL: &str = "/proc/sys/net/ipv4/tcp_congestion_control";

/// Read/write access to the single active-strategy setting.
pub trait ControlSurface {
    /// The active strategy's token.
    fn read(&self) -> Result<String>;

    /// Select `name` for all connections opened from now on. On failure the
    /// previous selection is untouched.
    fn write(&self, name: &str) -> Result<()>;
}

/// In-process surface over a shared [`StrategyRegistry`].
pub struct RegistryControl {
    registry: Arc<StrategyRegistry>,
}

impl RegistryControl {
    pub fn new(registry: Arc<StrategyRegistry>) -> Self {
        Self { registry }
    }
}

impl ControlSurface for RegistryControl {
    fn read(&self) -> Result<String> {
        self.registry
            .active()
            .map(str::to_string)
            .ok_or(TideCcError::NoActiveStrategy)
    }

    fn write(&self, name: &str) -> Result<()> {
        self.registry.set_active(name)
    }
}

/// File-backed surface over a sysctl-style control entry.
#[derive(Debug, Clone)]
pub struct SysctlControl {
    path: PathBuf,
}

impl SysctlControl {
    /// Surface over the stock kernel entry.
    pub fn new() -> Self {
        Self::at(TCP_CC_CONTROL)
    }

    /// Surface over an arbitrary control file.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for SysctlControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlSurface for SysctlControl {
    fn read(&self) -> Result<String> {
        // The kernel reports a newline-terminated token.
        let raw = fs::read_to_string(&self.path)?;
        Ok(raw.split_whitespace().next().unwrap_or_default().to_string())
    }

    fn write(&self, name: &str) -> Result<()> {
        fs::write(&self.path, name).map_err(|err| match err.kind() {
            ErrorKind::PermissionDenied => {
                TideCcError::PermissionDenied(self.path.display().to_string())
            }
            _ => err.into(),
        })
    }
}

//! Registered strategies and active-algorithm selection.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::congestion::{CongestionStrategy, StrategyBuilder};
use crate::error::{Result, TideCcError};

/// Table of registered congestion strategies and the token new connections
/// select by.
///
/// Registration and selection are control-plane operations behind a lock;
/// the per-acknowledgment data path never touches this type.
#[derive(Default)]
pub struct StrategyRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    builders: HashMap<&'static str, Arc<dyn StrategyBuilder>>,
    active: Option<Arc<dyn StrategyBuilder>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy. The first registration becomes the active one.
    ///
    /// A name collision leaves the table unchanged; callers treat it as
    /// fatal to startup.
    pub fn register(&self, builder: Arc<dyn StrategyBuilder>) -> Result<()> {
        let name = builder.name();
        let mut inner = self.inner.write();
        if inner.builders.contains_key(name) {
            return Err(TideCcError::StrategyExists(name.to_string()));
        }
        inner.builders.insert(name, Arc::clone(&builder));
        if inner.active.is_none() {
            inner.active = Some(builder);
        }
        debug!(strategy = name, "congestion strategy registered");
        Ok(())
    }

    /// Remove a strategy. If it was active, selection falls to any other
    /// registered strategy, or to none.
    pub fn unregister(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.builders.remove(name).is_none() {
            return Err(TideCcError::UnknownStrategy(name.to_string()));
        }
        if inner.active.as_ref().is_some_and(|b| b.name() == name) {
            inner.active = inner.builders.values().next().map(Arc::clone);
        }
        debug!(strategy = name, "congestion strategy unregistered");
        Ok(())
    }

    /// Make `name` the strategy for connections opened from now on.
    ///
    /// Unknown names are rejected and the previous selection stays in place.
    pub fn set_active(&self, name: &str) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.builders.get(name) {
            Some(builder) => {
                inner.active = Some(Arc::clone(builder));
                Ok(())
            }
            None => Err(TideCcError::UnknownStrategy(name.to_string())),
        }
    }

    /// Token of the active strategy, if any is registered.
    pub fn active(&self) -> Option<&'static str> {
        self.inner.read().active.as_ref().map(|b| b.name())
    }

    /// Mint strategy state for one new connection from the active algorithm.
    pub fn build_active(&self) -> Result<Box<dyn CongestionStrategy>> {
        self.inner
            .read()
            .active
            .as_ref()
            .map(|b| b.build())
            .ok_or(TideCcError::NoActiveStrategy)
    }

    /// Registered tokens, in no particular order.
    pub fn names(&self) -> Vec<&'static str> {
        self.inner.read().builders.keys().copied().collect()
    }
}

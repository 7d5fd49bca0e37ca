//! Store configuration.

use std::borrow::Cow;

/// How a `set_state` issued from inside a watcher or listener is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reentrancy {
    /// Queue the update and apply it after the current notification pass.
    ///
    /// Every queued update still gets its own commit and notification pass,
    /// in the order it was issued.
    ///
    /// A callback that reads the state and then sets a value computed from
    /// it sees the state as of the current pass, not the updates it has
    /// already queued. Issue such updates with
    /// [`Store::set_with`](crate::Store::set_with), which resolves against
    /// the state at the time the update is applied.
    #[default]
    Queue,
    /// Apply the update at once, running its whole cascade before the outer
    /// pass resumes.
    Immediate,
}

/// Configuration for a [`Store`](crate::Store).
///
/// # Example
///
/// ```
/// use cubby::{Reentrancy, StoreConfig};
///
/// let config = StoreConfig::new("counter")
///     .with_reentrancy(Reentrancy::Immediate)
///     .with_drain_limit(16);
/// assert_eq!(config.name(), "counter");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    name: Cow<'static, str>,
    reentrancy: Reentrancy,
    drain_limit: Option<usize>,
}

impl StoreConfig {
    /// Create a configuration with the given store name and default policies.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the reentrancy policy.
    #[must_use]
    pub fn with_reentrancy(mut self, reentrancy: Reentrancy) -> Self {
        self.reentrancy = reentrancy;
        self
    }

    /// Cap how many queued reentrant updates are drained per outer call.
    /// Updates past the cap are dropped.
    ///
    /// Unlimited by default. Only meaningful with [`Reentrancy::Queue`].
    #[must_use]
    pub fn with_drain_limit(mut self, limit: usize) -> Self {
        self.drain_limit = Some(limit);
        self
    }

    /// Name used in log records.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Policy for updates issued during a notification pass.
    pub fn reentrancy(&self) -> Reentrancy {
        self.reentrancy
    }

    /// Drain cap, if one was set.
    pub fn drain_limit(&self) -> Option<usize> {
        self.drain_limit
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("store"),
            reentrancy: Reentrancy::Queue,
            drain_limit: None,
        }
    }
}

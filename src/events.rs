//! Host lifecycle events and the per-run batch context.

use serde::{Deserialize, Serialize};

use crate::manifest::Package;

/// Host lifecycle notifications the bridge wants to receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscribedEvent {
    PostPackageInstall,
    PostPackageUpdate,
    PostUpdateCmd,
}

/// Events to register with the host tool, in declaration order.
pub const SUBSCRIBED_EVENTS: &[SubscribedEvent] = &[
    SubscribedEvent::PostPackageInstall,
    SubscribedEvent::PostPackageUpdate,
    SubscribedEvent::PostUpdateCmd,
];

impl SubscribedEvent {
    /// Event name as the host tool spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostPackageInstall => "post-package-install",
            Self::PostPackageUpdate => "post-package-update",
            Self::PostUpdateCmd => "post-update-cmd",
        }
    }

    /// Which bridge handler serves this event.
    pub fn handler(self) -> &'static str {
        match self {
            Self::PostPackageInstall | Self::PostPackageUpdate => "on_package_operation",
            Self::PostUpdateCmd => "on_run_complete",
        }
    }
}

/// A single dependency operation processed by the host tool.
#[derive(Debug, Clone)]
pub enum PackageOperation {
    Install {
        package: Package,
    },
    Update {
        /// Version being replaced. Not consulted for classification.
        initial: Package,
        target: Package,
    },
}

impl PackageOperation {
    /// The package this operation leaves installed: the new package for
    /// an install, the update's target otherwise.
    pub fn subject(&self) -> &Package {
        match self {
            Self::Install { package } => package,
            Self::Update { target, .. } => target,
        }
    }
}

/// Pending plugin list for one update run.
///
/// Owned by the caller and passed into the bridge's handlers; append-only
/// while operations are processed, consumed exactly once when the run
/// completes. Recording is deliberately duplicate-preserving: a package
/// operated on twice in one run is dispatched twice.
#[derive(Debug, Default)]
pub struct Batch {
    pending: Vec<Package>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Plugins recorded so far, in observation order.
    pub fn pending(&self) -> &[Package] {
        &self.pending
    }

    pub(crate) fn record(&mut self, package: Package) {
        self.pending.push(package);
    }

    pub(crate) fn drain(mut self) -> Vec<Package> {
        std::mem::take(&mut self.pending)
    }
}

impl Drop for Batch {
    fn drop(&mut self) {
        // A long-lived host must not carry one run's pending list into the
        // next; dropping an undrained batch is almost always a wiring bug.
        if !self.pending.is_empty() {
            tracing::warn!(
                pending = self.pending.len(),
                "batch dropped without running completion handler"
            );
        }
    }
}

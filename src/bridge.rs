//! Event subscriber bridging host package events to plugin dispatch.

use crate::dispatch::{DispatchPolicy, DispatchReport, Dispatcher};
use crate::events::{Batch, PackageOperation};
use crate::manifest::{Extras, Package};
use crate::registry::{HookRegistry, HostIo};

/// Subscribes to the host tool's package lifecycle events and, once the
/// run completes, invokes every recorded plugin's install hook.
///
/// The bridge holds the hook registry and the root project's `gantry`
/// extras; the per-run pending list lives in a caller-owned [`Batch`].
#[derive(Debug)]
pub struct PluginBridge {
    registry: HookRegistry,
    root_extras: Extras,
    policy: DispatchPolicy,
}

impl PluginBridge {
    /// Activate the bridge against the root project's package.
    pub fn new(registry: HookRegistry, root: &Package) -> Self {
        Self {
            registry,
            root_extras: root.plugin_extras(),
            policy: DispatchPolicy::default(),
        }
    }

    /// Activate with an explicit root extras mapping.
    pub fn with_root_extras(registry: HookRegistry, root_extras: Extras) -> Self {
        Self {
            registry,
            root_extras,
            policy: DispatchPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Handle a package install/update event: classify the operation's
    /// subject and record it if it declares itself a Gantry plugin.
    /// Non-plugins are silently skipped.
    pub fn on_package_operation(&self, batch: &mut Batch, operation: &PackageOperation) {
        let package = operation.subject();
        if package.is_plugin() {
            tracing::debug!(package = %package.name, "recorded gantry plugin");
            batch.record(package.clone());
        }
    }

    /// Handle the run-completion event: drain the batch and dispatch
    /// every recorded plugin in observation order.
    ///
    /// Hooks run strictly after the whole batch was classified, never
    /// interleaved with package operations.
    pub fn on_run_complete(&mut self, batch: Batch, io: &mut dyn HostIo) -> DispatchReport {
        let pending = batch.drain();
        if pending.is_empty() {
            return DispatchReport::default();
        }

        tracing::info!(count = pending.len(), "dispatching gantry plugin install hooks");
        let report = Dispatcher {
            registry: &mut self.registry,
            root_extras: &self.root_extras,
            policy: self.policy,
        }
        .run(pending, io);

        io.write(&report.summary());
        report
    }
}

//! Install-hook dispatch for one completed operation batch.

use serde::{Deserialize, Serialize};

use crate::error::BridgeError;
use crate::manifest::{CallableRef, Extras, OP_INSTALL, Package};
use crate::registry::{HookRegistry, HostIo};

/// What to do when a plugin's install fails.
///
/// Plugins are independent, so the default keeps going and reports all
/// failures together at the end of the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    #[default]
    CollectFailures,
    FailFast,
}

/// Outcome of dispatching one batch.
#[derive(Debug, Default)]
pub struct DispatchReport {
    installed: Vec<(String, String)>,
    skipped: Vec<String>,
    failures: Vec<BridgeError>,
}

impl DispatchReport {
    /// Successfully installed plugins as `(package, callable)` pairs, in
    /// dispatch order.
    pub fn installed(&self) -> &[(String, String)] {
        &self.installed
    }

    /// Packages that classified as plugins but declared no install
    /// operation. Not an error.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn failures(&self) -> &[BridgeError] {
        &self.failures
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line outcome for host output.
    pub fn summary(&self) -> String {
        format!(
            "gantry plugins: {} installed, {} skipped, {} failed",
            self.installed.len(),
            self.skipped.len(),
            self.failures.len()
        )
    }
}

/// Runs the install hooks for a drained batch, in recorded order.
pub(crate) struct Dispatcher<'a> {
    pub registry: &'a mut HookRegistry,
    pub root_extras: &'a Extras,
    pub policy: DispatchPolicy,
}

impl Dispatcher<'_> {
    pub(crate) fn run(mut self, pending: Vec<Package>, io: &mut dyn HostIo) -> DispatchReport {
        let mut report = DispatchReport::default();

        for package in pending {
            match self.install_or_update(&package, io) {
                Ok(Some(callable)) => {
                    tracing::info!(package = %package.name, %callable, "plugin installed");
                    report.installed.push((package.name, callable));
                }
                Ok(None) => {
                    tracing::debug!(package = %package.name, "no install operation declared");
                    report.skipped.push(package.name);
                }
                Err(err) => {
                    tracing::warn!(package = %package.name, "plugin install failed: {err}");
                    io.write(&err.to_string());
                    report.failures.push(err);
                    if self.policy == DispatchPolicy::FailFast {
                        break;
                    }
                }
            }
        }

        report
    }

    /// Dispatch one plugin's install hook.
    ///
    /// Returns `Ok(None)` when the package declares no install operation
    /// (a no-op, not an error). Every failure names the package and its
    /// declared callable.
    fn install_or_update(
        &mut self,
        package: &Package,
        io: &mut dyn HostIo,
    ) -> Result<Option<String>, BridgeError> {
        let Some(declaration) = package.plugin_declaration() else {
            return Ok(None);
        };
        let Some(raw) = declaration.operation(OP_INSTALL) else {
            return Ok(None);
        };

        let callable = CallableRef::parse(raw).ok_or_else(|| BridgeError::MalformedCallable {
            package: package.name.clone(),
            callable: raw.to_string(),
        })?;

        let class = self.registry.resolve_mut(&callable.class).ok_or_else(|| {
            BridgeError::UnresolvedClass {
                package: package.name.clone(),
                callable: raw.to_string(),
            }
        })?;

        class
            .ensure_loaded(io)
            .map_err(|err| BridgeError::LoadFailed {
                package: package.name.clone(),
                callable: raw.to_string(),
                message: format!("{err:#}"),
            })?;

        let hook = class
            .hook(&callable.method)
            .ok_or_else(|| BridgeError::UnknownMethod {
                package: package.name.clone(),
                callable: raw.to_string(),
            })?;

        hook(io, self.root_extras).map_err(|err| BridgeError::HookFailed {
            package: package.name.clone(),
            callable: raw.to_string(),
            message: format!("{err:#}"),
        })?;

        Ok(Some(raw.to_string()))
    }
}

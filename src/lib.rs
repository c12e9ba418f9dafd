//! gantry-bridge — package-manager integration for Gantry task-runner
//! plugins.
//!
//! The bridge subscribes to the host tool's package install/update events,
//! records every package that declares itself a Gantry plugin under the
//! reserved `extra.gantry` manifest key, and, once the update run
//! completes, resolves each recorded plugin's declared install callable
//! against an in-process [`HookRegistry`] and invokes it with the host io
//! handle and the root project's `gantry` extras.
//!
//! ```no_run
//! use gantry_bridge::{Batch, HookClass, HookRegistry, PackageOperation, PluginBridge};
//! use gantry_bridge::registry::TracingIo;
//! # let root = gantry_bridge::Package::new("acme/root", Default::default());
//! # let operation = PackageOperation::Install { package: root.clone() };
//!
//! let mut registry = HookRegistry::new();
//! registry.register(
//!     "Acme\\Widgets",
//!     HookClass::new().method("install", |io, _extras| {
//!         io.write("widgets ready");
//!         Ok(())
//!     }),
//! );
//!
//! let mut bridge = PluginBridge::new(registry, &root);
//! let mut batch = Batch::new();
//! bridge.on_package_operation(&mut batch, &operation);
//! let report = bridge.on_run_complete(batch, &mut TracingIo);
//! assert!(report.is_success());
//! ```

pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod manifest;
pub mod registry;

pub use bridge::PluginBridge;
pub use dispatch::{DispatchPolicy, DispatchReport};
pub use error::BridgeError;
pub use events::{Batch, PackageOperation, SUBSCRIBED_EVENTS, SubscribedEvent};
pub use manifest::{CallableRef, Extras, OP_INSTALL, PLUGIN_KEY, Package, PluginDeclaration};
pub use registry::{HookClass, HookRegistry, HostIo, InstallHook};

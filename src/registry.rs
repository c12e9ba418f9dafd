//! In-process hook registry.
//!
//! Plugin manifests reference their install entry point by a
//! fully-qualified name such as `Acme\Widgets::install`. Instead of
//! resolving that name reflectively at dispatch time, the embedding
//! application registers a [`HookClass`] for each name it ships, and the
//! dispatcher treats the manifest string as an opaque lookup key. All
//! resolution error paths live here.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;

use crate::manifest::Extras;

/// The host tool's interaction handle, passed to every install hook.
pub trait HostIo {
    fn write(&mut self, message: &str);
}

/// Default io sink: forwards plugin output to the tracing log.
#[derive(Debug, Default)]
pub struct TracingIo;

impl HostIo for TracingIo {
    fn write(&mut self, message: &str) {
        tracing::info!(target: "gantry_bridge::io", "{message}");
    }
}

/// Install-hook calling convention: receives the host io handle and the
/// root project's `gantry` extras (empty mapping when the root declares
/// none).
pub type InstallHook = Box<dyn Fn(&mut dyn HostIo, &Extras) -> Result<()>>;

/// One-time initialization run before a class's first hook invocation,
/// the analog of loading the class's source file.
type ClassLoader = Box<dyn FnMut(&mut dyn HostIo) -> Result<()>>;

/// A named hook provider: its methods, plus an optional one-time loader.
#[derive(Default)]
pub struct HookClass {
    methods: HashMap<String, InstallHook>,
    loader: Option<ClassLoader>,
    loaded: bool,
}

impl HookClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a loader to run once before the first invocation. A class
    /// referenced twice in one batch loads at most once.
    pub fn with_loader(loader: impl FnMut(&mut dyn HostIo) -> Result<()> + 'static) -> Self {
        Self {
            methods: HashMap::new(),
            loader: Some(Box::new(loader)),
            loaded: false,
        }
    }

    /// Register a method on this class. Builder-style.
    pub fn method(
        mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut dyn HostIo, &Extras) -> Result<()> + 'static,
    ) -> Self {
        self.methods.insert(name.into(), Box::new(hook));
        self
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub(crate) fn ensure_loaded(&mut self, io: &mut dyn HostIo) -> Result<()> {
        if self.loaded {
            return Ok(());
        }
        if let Some(loader) = self.loader.as_mut() {
            loader(io)?;
        }
        self.loaded = true;
        Ok(())
    }

    pub(crate) fn hook(&self, method: &str) -> Option<&InstallHook> {
        self.methods.get(method)
    }
}

impl fmt::Debug for HookClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("HookClass")
            .field("methods", &methods)
            .field("loaded", &self.loaded)
            .finish()
    }
}

/// Class-name → hook-class table, populated at application start.
#[derive(Debug, Default)]
pub struct HookRegistry {
    classes: HashMap<String, HookClass>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook class under its fully-qualified name. A second
    /// registration under the same name replaces the first.
    pub fn register(&mut self, class: impl Into<String>, hooks: HookClass) {
        let class = class.into();
        if self.classes.insert(class.clone(), hooks).is_some() {
            tracing::warn!(%class, "hook class re-registered, replacing previous entry");
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub(crate) fn resolve_mut(&mut self, class: &str) -> Option<&mut HookClass> {
        self.classes.get_mut(class)
    }
}

//! Package manifests and Gantry plugin metadata.
//!
//! A package marks itself as a Gantry plugin by carrying a non-empty value
//! under the reserved `"gantry"` key of its manifest's `extra` block:
//!
//! ```json
//! { "extra": { "gantry": { "operations": { "install": "Acme\\Widgets::install" } } } }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::BridgeError;

/// Reserved `extra` key marking a package as a Gantry plugin.
///
/// Matched case-sensitively; the canonical spelling is lowercase. A
/// capitalized `"Gantry"` key is not a plugin marker.
pub const PLUGIN_KEY: &str = "gantry";

/// Lifecycle name of the install operation inside a plugin declaration.
pub const OP_INSTALL: &str = "install";

/// Arbitrary manifest metadata, as parsed from the `extra` block.
pub type Extras = Map<String, Value>;

/// An installed dependency as resolved by the host tool.
///
/// Immutable once constructed; the bridge only ever reads it.
#[derive(Debug, Clone, Deserialize)]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default, rename = "extra")]
    pub extras: Extras,
}

impl Package {
    pub fn new(name: impl Into<String>, extras: Extras) -> Self {
        Self {
            name: name.into(),
            version: None,
            extras,
        }
    }

    /// Parse a package from its manifest JSON document.
    pub fn from_manifest_str(raw: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Read and parse a manifest file from disk.
    pub fn from_manifest_path(path: &Path) -> Result<Self, BridgeError> {
        let raw = fs::read_to_string(path)
            .map_err(|err| BridgeError::Manifest(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|err| BridgeError::Manifest(format!("{}: {err}", path.display())))
    }

    /// Whether this package declares itself as a Gantry plugin.
    ///
    /// True iff the reserved key holds a non-empty value. The value's
    /// internal shape is not validated here; malformed declarations are
    /// only discovered at dispatch time.
    pub fn is_plugin(&self) -> bool {
        self.extras.get(PLUGIN_KEY).is_some_and(is_non_empty)
    }

    /// The reserved-key declaration block, if it decodes to the expected
    /// shape. Returns `None` for absent or malformed blocks.
    pub fn plugin_declaration(&self) -> Option<PluginDeclaration> {
        let value = self.extras.get(PLUGIN_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// The reserved-key block as a plain mapping, for passing to install
    /// hooks as configuration. Empty when absent or not an object.
    pub fn plugin_extras(&self) -> Extras {
        match self.extras.get(PLUGIN_KEY) {
            Some(Value::Object(map)) => map.clone(),
            _ => Extras::new(),
        }
    }
}

/// Truthiness test for the plugin marker: `null`, `false`, `0`, `""`,
/// `[]` and `{}` do not count as a declaration.
fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// The `"gantry"` block of a plugin package's manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginDeclaration {
    /// Lifecycle name → fully-qualified callable string. Lifecycles other
    /// than `install` are carried but not dispatched.
    #[serde(default)]
    pub operations: Map<String, Value>,
}

impl PluginDeclaration {
    /// The callable declared for a lifecycle, if present and a string.
    pub fn operation(&self, lifecycle: &str) -> Option<&str> {
        self.operations.get(lifecycle)?.as_str()
    }
}

/// A parsed `Fully\Qualified\Class::method` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableRef {
    pub class: String,
    pub method: String,
}

impl CallableRef {
    /// Parse a callable string, tolerating one leading `\` namespace
    /// separator. Returns `None` when the `::` separator is missing or
    /// either side is empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.strip_prefix('\\').unwrap_or(raw);
        let (class, method) = normalized.split_once("::")?;
        if class.is_empty() || method.is_empty() {
            return None;
        }
        Some(Self {
            class: class.to_string(),
            method: method.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn package_with_gantry(value: Value) -> Package {
        let mut extras = Extras::new();
        extras.insert(PLUGIN_KEY.to_string(), value);
        Package::new("acme/widgets", extras)
    }

    // ── Classification ──────────────────────────────────────────────

    #[test]
    fn plugin_with_operations_block_is_plugin() {
        let package =
            package_with_gantry(json!({"operations": {"install": "Acme\\Widgets::install"}}));
        assert!(package.is_plugin());
    }

    #[test]
    fn missing_reserved_key_is_not_plugin() {
        let package = Package::new("acme/widgets", Extras::new());
        assert!(!package.is_plugin());
    }

    #[test]
    fn empty_values_are_not_plugin_markers() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!([]), json!({})] {
            assert!(!package_with_gantry(value.clone()).is_plugin(), "{value}");
        }
    }

    #[test]
    fn truthy_scalar_still_marks_plugin() {
        // The marker need not be well-formed to classify; dispatch sorts
        // that out later.
        assert!(package_with_gantry(json!(true)).is_plugin());
        assert!(package_with_gantry(json!("yes")).is_plugin());
    }

    #[test]
    fn reserved_key_is_case_sensitive() {
        let mut extras = Extras::new();
        extras.insert("Gantry".to_string(), json!({"operations": {}}));
        assert!(!Package::new("acme/widgets", extras).is_plugin());
    }

    #[test]
    fn other_extras_do_not_affect_classification() {
        let mut extras = Extras::new();
        extras.insert("branch-alias".to_string(), json!({"dev-main": "1.x-dev"}));
        assert!(!Package::new("acme/widgets", extras).is_plugin());
    }

    // ── Declarations & extras ───────────────────────────────────────

    #[test]
    fn declaration_exposes_install_callable() {
        let package =
            package_with_gantry(json!({"operations": {"install": "Acme\\Widgets::install"}}));
        let declaration = package.plugin_declaration().unwrap();
        assert_eq!(
            declaration.operation(OP_INSTALL),
            Some("Acme\\Widgets::install")
        );
        assert_eq!(declaration.operation("uninstall"), None);
    }

    #[test]
    fn scalar_marker_has_no_declaration() {
        assert!(package_with_gantry(json!("yes")).plugin_declaration().is_none());
    }

    #[test]
    fn plugin_extras_default_to_empty_mapping() {
        assert!(Package::new("acme/root", Extras::new()).plugin_extras().is_empty());
        assert!(package_with_gantry(json!("yes")).plugin_extras().is_empty());
    }

    #[test]
    fn plugin_extras_pass_block_verbatim() {
        let package = package_with_gantry(json!({"foo": 1}));
        assert_eq!(Value::Object(package.plugin_extras()), json!({"foo": 1}));
    }

    // ── Manifest parsing ────────────────────────────────────────────

    #[test]
    fn manifest_parses_name_version_and_extra() {
        let package = Package::from_manifest_str(
            r#"{
                "name": "acme/widgets",
                "version": "2.1.0",
                "extra": {"gantry": {"operations": {"install": "Acme\\Widgets::install"}}}
            }"#,
        )
        .unwrap();
        assert_eq!(package.name, "acme/widgets");
        assert_eq!(package.version.as_deref(), Some("2.1.0"));
        assert!(package.is_plugin());
    }

    #[test]
    fn manifest_without_extra_is_valid() {
        let package = Package::from_manifest_str(r#"{"name": "acme/plain"}"#).unwrap();
        assert!(!package.is_plugin());
    }

    #[test]
    fn manifest_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{"name": "acme/widgets", "extra": {{"gantry": {{"operations": {{}}}}}}}}"#
        )
        .unwrap();

        let package = Package::from_manifest_path(&path).unwrap();
        assert_eq!(package.name, "acme/widgets");
        assert!(package.is_plugin());
    }

    #[test]
    fn manifest_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Package::from_manifest_path(&path).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    // ── Callable parsing ────────────────────────────────────────────

    #[test]
    fn callable_splits_class_and_method() {
        let callable = CallableRef::parse("Acme\\Widgets::install").unwrap();
        assert_eq!(callable.class, "Acme\\Widgets");
        assert_eq!(callable.method, "install");
    }

    #[test]
    fn leading_namespace_separator_is_stripped() {
        let callable = CallableRef::parse("\\Acme\\Widgets::install").unwrap();
        assert_eq!(callable.class, "Acme\\Widgets");
    }

    #[test]
    fn malformed_callables_are_rejected() {
        assert!(CallableRef::parse("NoSeparator").is_none());
        assert!(CallableRef::parse("::install").is_none());
        assert!(CallableRef::parse("Acme\\Widgets::").is_none());
        assert!(CallableRef::parse("").is_none());
    }
}

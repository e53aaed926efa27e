use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved attribute holding the version identifier.
pub const VERSION_KEY: &str = "version";

/// Attribute consulted by the classification filters.
pub const CLASSIFICATION_KEY: &str = "classification";

/// One version of a machine image.
///
/// The record is open: besides the reserved `version` key it carries whatever
/// attributes the catalog (or a provider override) supplies, e.g. `arch`,
/// `classification` or `cri`. Equality is structural over every attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineImageVersion {
    attributes: Map<String, Value>,
}

impl MachineImageVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self::default().with(VERSION_KEY, Value::String(version.into()))
    }

    /// Builder-style insert, handy for fixtures and provider records.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// The version identifier, if present and a string.
    pub fn version(&self) -> Option<&str> {
        self.attributes.get(VERSION_KEY).and_then(Value::as_str)
    }

    pub fn classification(&self) -> Option<&str> {
        self.attributes.get(CLASSIFICATION_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Copy every attribute of `other` into `self`, overwriting on collision.
    pub fn merge(&mut self, other: &MachineImageVersion) {
        for (key, value) in &other.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn version_accessor_reads_reserved_key() {
        let version = MachineImageVersion::new("20.04");
        assert_eq!(version.version(), Some("20.04"));
    }

    #[test]
    fn version_accessor_ignores_non_string_values() {
        let version = MachineImageVersion::default().with(VERSION_KEY, 20.04);
        assert_eq!(version.version(), None);
        assert_eq!(MachineImageVersion::default().version(), None);
    }

    #[test]
    fn merge_overwrites_and_extends() {
        let mut version = MachineImageVersion::new("1.0").with("arch", "arm64");
        let config = MachineImageVersion::new("1.0")
            .with("arch", "amd64")
            .with("cri", json!([{"name": "containerd"}]));

        version.merge(&config);

        assert_eq!(version.get("arch"), Some(&json!("amd64")));
        assert_eq!(version.get("cri"), Some(&json!([{"name": "containerd"}])));
        assert_eq!(version.version(), Some("1.0"));
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let version = MachineImageVersion::new("1.0").with("classification", "preview");
        let value = serde_json::to_value(&version).unwrap();
        assert_eq!(value, json!({"version": "1.0", "classification": "preview"}));

        let back: MachineImageVersion = serde_json::from_value(value).unwrap();
        assert_eq!(back.classification(), Some("preview"));
    }
}

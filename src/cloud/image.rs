use serde::{Deserialize, Serialize};

use super::MachineImageVersion;

/// A named machine image with its ordered list of versions, the unit every
/// catalog (landscape, LSS, provider, provider-landscape) is made of.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineImage {
    pub name: String,
    #[serde(default)]
    pub versions: Vec<MachineImageVersion>,
}

impl MachineImage {
    pub fn new(name: impl Into<String>, versions: Vec<MachineImageVersion>) -> Self {
        Self {
            name: name.into(),
            versions,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn versions(&self) -> &[MachineImageVersion] {
        &self.versions
    }

    /// Find the version whose identifier equals `version`.
    pub fn find_version(&self, version: &str) -> Option<&MachineImageVersion> {
        self.versions.iter().find(|v| v.version() == Some(version))
    }
}

/// A single (name, version) pair pulled out of a catalog.
///
/// Two `OsImage`s are equal only if the names match and every attribute of
/// the version record matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsImage {
    pub name: String,
    pub version: MachineImageVersion,
}

impl OsImage {
    pub fn new(name: impl Into<String>, version: MachineImageVersion) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

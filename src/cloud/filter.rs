use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::OsImage;

/// Classification assumed for versions that do not declare one.
const DEFAULT_CLASSIFICATION: &str = "supported";

/// Filter category applied to flattened OS images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum OsImagesFilterKind {
    /// No restriction.
    All,
    Supported,
    Preview,
    Deprecated,
}

impl OsImagesFilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsImagesFilterKind::All => "all",
            OsImagesFilterKind::Supported => "supported",
            OsImagesFilterKind::Preview => "preview",
            OsImagesFilterKind::Deprecated => "deprecated",
        }
    }

    /// Whether `image` falls into this category.
    ///
    /// Classification kinds compare against the version's `classification`
    /// attribute, case-insensitively; a missing classification counts as
    /// `supported`.
    pub fn matches(&self, image: &OsImage) -> bool {
        match self {
            OsImagesFilterKind::All => true,
            kind => image
                .version
                .classification()
                .unwrap_or(DEFAULT_CLASSIFICATION)
                .eq_ignore_ascii_case(kind.as_str()),
        }
    }
}

impl fmt::Display for OsImagesFilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown filter kind '{0}' (expected one of: all, supported, preview, deprecated)")]
pub struct UnknownFilterKind(pub String);

impl FromStr for OsImagesFilterKind {
    type Err = UnknownFilterKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(OsImagesFilterKind::All),
            "supported" => Ok(OsImagesFilterKind::Supported),
            "preview" => Ok(OsImagesFilterKind::Preview),
            "deprecated" => Ok(OsImagesFilterKind::Deprecated),
            _ => Err(UnknownFilterKind(s.to_string())),
        }
    }
}

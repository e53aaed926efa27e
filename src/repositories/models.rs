use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cloud::OsImagesFilterKind;

/// Which input of the computation a catalog feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogKind {
    Landscape,
    Lss,
    Provider,
    ProviderLandscape,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Landscape => "landscape",
            CatalogKind::Lss => "lss",
            CatalogKind::Provider => "provider",
            CatalogKind::ProviderLandscape => "providerLandscape",
        }
    }
}

/// One catalog document to load; `location` is a path or an http(s) URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSource {
    pub(crate) kind: CatalogKind,
    pub(crate) location: String,
}

impl CatalogSource {
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Landscape configuration: where the catalogs live and how to filter them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LandscapeConfig {
    #[serde(default)]
    pub(crate) sources: Vec<CatalogSource>,
    #[serde(default)]
    pub(crate) disabled_machine_images: Vec<String>,
    #[serde(default)]
    pub(crate) include_filters: Vec<OsImagesFilterKind>,
    #[serde(default)]
    pub(crate) exclude_filters: Vec<OsImagesFilterKind>,
    /// Directory relative source paths are resolved against.
    #[serde(skip)]
    pub(crate) base_dir: Option<PathBuf>,
}

impl LandscapeConfig {
    pub fn sources(&self) -> &[CatalogSource] {
        &self.sources
    }

    pub fn disabled_machine_images(&self) -> &[String] {
        &self.disabled_machine_images
    }

    pub fn include_filters(&self) -> &[OsImagesFilterKind] {
        &self.include_filters
    }

    pub fn exclude_filters(&self) -> &[OsImagesFilterKind] {
        &self.exclude_filters
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    pub fn set_include_filters(&mut self, filters: Vec<OsImagesFilterKind>) {
        self.include_filters = filters;
    }

    pub fn set_exclude_filters(&mut self, filters: Vec<OsImagesFilterKind>) {
        self.exclude_filters = filters;
    }

    pub fn disable(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            if !self.disabled_machine_images.contains(&name) {
                self.disabled_machine_images.push(name);
            }
        }
    }
}

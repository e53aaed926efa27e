use anyhow::{Context, Result};
use futures::future::try_join_all;
use indicatif::ProgressBar;
use log::info;

use super::catalog_reader::{
    CatalogLocation, CatalogReader, FileCatalogReader, HttpCatalogReader, parse_catalog,
};
use crate::cloud::MachineImage;
use crate::repositories::{CatalogKind, CatalogSource, LandscapeConfig};

/// The four catalogs the computation consumes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Catalogs {
    pub lss: Vec<MachineImage>,
    pub landscape: Vec<MachineImage>,
    pub provider: Vec<MachineImage>,
    pub provider_landscape: Vec<MachineImage>,
}

impl Catalogs {
    fn slot(&mut self, kind: CatalogKind) -> &mut Vec<MachineImage> {
        match kind {
            CatalogKind::Lss => &mut self.lss,
            CatalogKind::Landscape => &mut self.landscape,
            CatalogKind::Provider => &mut self.provider,
            CatalogKind::ProviderLandscape => &mut self.provider_landscape,
        }
    }
}

/// Dispatches catalog sources to the matching reader.
pub struct CatalogLoader {
    file_reader: Box<dyn CatalogReader>,
    remote_reader: Box<dyn CatalogReader>,
}

impl CatalogLoader {
    pub fn new(file_reader: Box<dyn CatalogReader>, remote_reader: Box<dyn CatalogReader>) -> Self {
        Self {
            file_reader,
            remote_reader,
        }
    }

    /// Local files plus HTTP with the temp-dir cache.
    pub fn with_defaults(use_cache: bool) -> Result<Self> {
        Ok(Self::new(
            Box::new(FileCatalogReader),
            Box::new(HttpCatalogReader::new(use_cache)?),
        ))
    }

    async fn load_source(
        &self,
        source: &CatalogSource,
        config: &LandscapeConfig,
    ) -> Result<Vec<MachineImage>> {
        let location = CatalogLocation::parse(source.location(), config.base_dir());
        let reader = match location {
            CatalogLocation::File(_) => &self.file_reader,
            CatalogLocation::Remote(_) => &self.remote_reader,
        };

        let bytes = reader
            .fetch(&location)
            .await
            .with_context(|| format!("load {} catalog from {location}", source.kind().as_str()))?;
        parse_catalog(&bytes, &location)
    }

    /// Load every configured source concurrently. Sources of the same kind
    /// are concatenated in configuration order.
    pub async fn load(&self, config: &LandscapeConfig, progress: &ProgressBar) -> Result<Catalogs> {
        let loaded = try_join_all(config.sources().iter().map(|source| async move {
            let images = self.load_source(source, config).await?;
            progress.inc(1);
            Ok::<_, anyhow::Error>((source.kind(), images))
        }))
        .await?;

        let mut catalogs = Catalogs::default();
        for (kind, images) in loaded {
            info!("Loaded {} {} machine images", images.len(), kind.as_str());
            catalogs.slot(kind).extend(images);
        }
        Ok(catalogs)
    }
}

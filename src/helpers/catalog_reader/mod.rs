use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use url::Url;

use crate::cloud::{Catalog, MachineImage};

const USER_AGENT: &str = concat!("machine-images/", env!("CARGO_PKG_VERSION"));

/// Where a catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    File(PathBuf),
    Remote(Url),
}

impl CatalogLocation {
    /// `http(s)://` locations are remote, `file://` URLs and anything else
    /// are paths. Relative paths are joined onto `base_dir` when given.
    pub fn parse(location: &str, base_dir: Option<&Path>) -> Self {
        if let Ok(url) = Url::parse(location) {
            match url.scheme() {
                "http" | "https" => return CatalogLocation::Remote(url),
                "file" => {
                    if let Ok(path) = url.to_file_path() {
                        return CatalogLocation::File(path);
                    }
                }
                _ => {}
            }
        }

        let path = PathBuf::from(location);
        match base_dir {
            Some(base) if path.is_relative() => CatalogLocation::File(base.join(path)),
            _ => CatalogLocation::File(path),
        }
    }

    /// Last path segment, used for format detection.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            CatalogLocation::File(path) => path.file_name().and_then(|n| n.to_str()),
            CatalogLocation::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn is_json(&self) -> bool {
        self.file_name()
            .and_then(|name| name.rsplit_once('.'))
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("json"))
    }
}

impl std::fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogLocation::File(path) => write!(f, "{}", path.display()),
            CatalogLocation::Remote(url) => write!(f, "{url}"),
        }
    }
}

/// Fetches the raw bytes of a catalog document.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn fetch(&self, location: &CatalogLocation) -> Result<Vec<u8>>;
}

/// Reads catalogs from the local filesystem.
#[derive(Debug, Default, Clone)]
pub struct FileCatalogReader;

#[async_trait]
impl CatalogReader for FileCatalogReader {
    async fn fetch(&self, location: &CatalogLocation) -> Result<Vec<u8>> {
        let CatalogLocation::File(path) = location else {
            bail!("{location} is not a local catalog");
        };
        fs::read(path).with_context(|| format!("read catalog {}", path.display()))
    }
}

/// Downloads catalogs over HTTP(S), caching each document under the system
/// temp directory so later runs can reuse it.
#[derive(Debug, Clone)]
pub struct HttpCatalogReader {
    client: Client,
    cache_dir: PathBuf,
    use_cache: bool,
}

impl HttpCatalogReader {
    pub fn new(use_cache: bool) -> Result<Self> {
        Ok(Self::with_cache_dir(
            Client::builder().user_agent(USER_AGENT).build()?,
            std::env::temp_dir(),
            use_cache,
        ))
    }

    pub fn with_cache_dir(client: Client, cache_dir: impl Into<PathBuf>, use_cache: bool) -> Self {
        Self {
            client,
            cache_dir: cache_dir.into(),
            use_cache,
        }
    }

    /// Cache path for `url`, distinct for every distinct URL.
    ///
    /// The whole URL (scheme, host, port, path, query) is kept; characters
    /// other than ASCII alphanumerics, `.` and `-` are escaped as `_XX`.
    pub fn cache_path(&self, url: &Url) -> PathBuf {
        let mut key = String::with_capacity(url.as_str().len());
        for byte in url.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'.' || byte == b'-' {
                key.push(char::from(byte));
            } else {
                key.push_str(&format!("_{byte:02X}"));
            }
        }
        self.cache_dir.join(format!("machine-images-{key}"))
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let res = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = res.status();
        if !status.is_success() {
            bail!("HTTP {} for {}", status, url);
        }

        let bytes = res
            .bytes()
            .await
            .with_context(|| format!("read body from {url}"))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatalogReader for HttpCatalogReader {
    async fn fetch(&self, location: &CatalogLocation) -> Result<Vec<u8>> {
        let CatalogLocation::Remote(url) = location else {
            bail!("{location} is not a remote catalog");
        };

        let cache_path = self.cache_path(url);
        if self.use_cache && cache_path.exists() {
            debug!("Using cached catalog {} for {url}", cache_path.display());
            return fs::read(&cache_path)
                .with_context(|| format!("read cached file {}", cache_path.display()));
        }

        let bytes = self.download(url).await?;
        write_atomically(&cache_path, &bytes)?;
        debug!("Cached catalog {url} at {}", cache_path.display());
        Ok(bytes)
    }
}

/// Write to a sibling temp file, then rename into place.
fn write_atomically(dest_path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }

    let mut tmp_name = dest_path.as_os_str().to_owned();
    tmp_name.push(".download");
    let tmp = PathBuf::from(tmp_name);
    let mut file =
        fs::File::create(&tmp).with_context(|| format!("create file {}", tmp.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("write file {}", tmp.display()))?;
    drop(file);

    fs::rename(&tmp, dest_path)
        .with_context(|| format!("move {} -> {}", tmp.display(), dest_path.display()))?;
    Ok(())
}

/// Deserialize a catalog document; `.json` files as JSON, the rest as YAML.
pub fn parse_catalog(bytes: &[u8], location: &CatalogLocation) -> Result<Vec<MachineImage>> {
    let catalog: Catalog = if location.is_json() {
        serde_json::from_slice(bytes).with_context(|| format!("parse JSON from {location}"))?
    } else {
        serde_yaml::from_slice(bytes).with_context(|| format!("parse YAML from {location}"))?
    };
    Ok(catalog.into_machine_images())
}

mod models;

use std::{fs, path::Path};

pub use models::{CatalogKind, CatalogSource, LandscapeConfig};

// ---- Public API (serde hidden from callers) ----

/// Load a landscape configuration from a JSON (`.json`) or YAML file.
///
/// Relative catalog paths inside the file resolve against its directory.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<LandscapeConfig, LandscapeError> {
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| LandscapeError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut config = if is_json {
        from_json_str(&data)?
    } else {
        from_yaml_str(&data)?
    };
    config.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

/// Parse a landscape configuration from a JSON string.
pub fn from_json_str(json: &str) -> Result<LandscapeConfig, LandscapeError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a landscape configuration from a YAML string.
pub fn from_yaml_str(yaml: &str) -> Result<LandscapeConfig, LandscapeError> {
    Ok(serde_yaml::from_str(yaml)?)
}

// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum LandscapeError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::OsImagesFilterKind;
    use std::io::Write;

    const YAML: &str = r#"
sources:
  - kind: landscape
    location: landscape.yaml
  - kind: providerLandscape
    location: https://example.org/provider-landscape.json
  - kind: landscape
    location: extra.yaml
disabledMachineImages: [suse-chost]
includeFilters: [supported, preview]
excludeFilters: [deprecated]
"#;

    #[test]
    fn parses_yaml_config() {
        let config = from_yaml_str(YAML).unwrap();

        assert_eq!(config.sources().len(), 3);
        assert_eq!(config.sources()[1].kind(), CatalogKind::ProviderLandscape);
        assert_eq!(config.disabled_machine_images(), ["suse-chost".to_string()]);
        assert_eq!(
            config.include_filters(),
            [OsImagesFilterKind::Supported, OsImagesFilterKind::Preview]
        );
        assert_eq!(config.exclude_filters(), [OsImagesFilterKind::Deprecated]);
        assert!(config.base_dir().is_none());
    }

    #[test]
    fn empty_json_config_uses_defaults() {
        let config = from_json_str("{}").unwrap();
        assert_eq!(config, LandscapeConfig::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = from_json_str(r#"{"disabledImages": []}"#).unwrap_err();
        assert!(matches!(err, LandscapeError::Json(_)));
    }

    #[test]
    fn unknown_filter_kind_is_rejected() {
        assert!(from_yaml_str("includeFilters: [expired]").is_err());
    }

    #[test]
    fn load_from_file_records_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landscape.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"sources": [{"kind": "lss", "location": "lss.yaml"}]}"#)
            .unwrap();

        let config = load_from_file(&path).unwrap();

        assert_eq!(config.base_dir(), Some(dir.path()));
        assert_eq!(config.sources()[0].kind(), CatalogKind::Lss);
    }

    #[test]
    fn load_from_missing_file_fails() {
        let err = load_from_file("/does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, LandscapeError::Io { .. }));
        assert!(err.to_string().contains("/does/not/exist.yaml"));
    }

    #[test]
    fn malformed_yaml_reports_yaml_error() {
        let err = from_yaml_str("sources: [").unwrap_err();
        assert!(matches!(err, LandscapeError::Yaml(_)));
    }

    #[test]
    fn disable_appends_without_duplicates() {
        let mut config = from_yaml_str(YAML).unwrap();
        config.disable(vec!["suse-chost".to_string(), "ubuntu".to_string()]);
        assert_eq!(
            config.disabled_machine_images(),
            ["suse-chost".to_string(), "ubuntu".to_string()]
        );
    }
}

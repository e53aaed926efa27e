//! Computation of the machine images a landscape supports.
//!
//! The landscape and LSS catalogs are flattened into (name, version) pairs,
//! deduplicated, filtered by classification, regrouped per name, sorted and
//! finally enriched with provider specific configuration. Everything happens
//! in memory within one call.

mod enrich;
mod filters;
mod ordering;

pub use enrich::{enrich_machine_images, version_config};
pub use filters::{filter_os_images, validate_filters};
pub use ordering::{OS_NAME_GARDEN_LINUX, group_os_images, sort_machine_images};

use log::{debug, info};

use crate::cloud::{MachineImage, OsImage, OsImagesFilterKind};

/// Compute the final, sorted and provider-enriched list of machine images.
///
/// An empty `include_filters` means no restriction. Fails only when the
/// include and exclude filters overlap; every other irregularity (unknown
/// version, no provider config, nothing left after filtering) just shrinks
/// the result.
#[allow(clippy::too_many_arguments)]
pub fn compute_machine_images(
    lss_images: &[MachineImage],
    landscape_images: &[MachineImage],
    provider_images: &[MachineImage],
    provider_landscape_images: &[MachineImage],
    disabled_names: &[String],
    include_filters: &[OsImagesFilterKind],
    exclude_filters: &[OsImagesFilterKind],
) -> Result<Vec<MachineImage>, MachineImagesError> {
    info!("Computing machine images");

    let include_filters: Vec<OsImagesFilterKind> = if include_filters.is_empty() {
        vec![OsImagesFilterKind::All]
    } else {
        include_filters.to_vec()
    };

    validate_filters(&include_filters, exclude_filters)?;

    let mut os_images = flat_images(landscape_images);
    os_images.extend(flat_images(lss_images));
    let os_images = remove_duplicates(os_images);
    debug!("{} distinct os images after merging catalogs", os_images.len());

    let os_images = filter_os_images(os_images, &include_filters, exclude_filters)?;
    debug!("{} os images left after filtering", os_images.len());

    if os_images.is_empty() {
        return Ok(Vec::new());
    }

    let mut machine_images = group_os_images(os_images);
    sort_machine_images(&mut machine_images);

    let machine_images = enrich_machine_images(
        machine_images,
        disabled_names,
        provider_landscape_images,
        provider_images,
    );
    debug!("{} machine images computed", machine_images.len());

    Ok(machine_images)
}

/// One `OsImage` per (image, version) pair, in catalog order.
pub fn flat_images(images: &[MachineImage]) -> Vec<OsImage> {
    images
        .iter()
        .flat_map(|image| {
            image
                .versions
                .iter()
                .map(move |version| OsImage::new(image.name.clone(), version.clone()))
        })
        .collect()
}

/// Drop structurally identical entries, keeping the first occurrence.
///
/// The attribute maps hold arbitrary JSON values, so this is a plain
/// equality scan; catalogs are small.
pub fn remove_duplicates(images: Vec<OsImage>) -> Vec<OsImage> {
    let mut result: Vec<OsImage> = Vec::with_capacity(images.len());
    for image in images {
        if !result.contains(&image) {
            result.push(image);
        }
    }
    result
}

// ---- Errors ----
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MachineImagesError {
    #[error("exclude filter list contains element of include list: {}", format_kinds(.kinds))]
    ConflictingFilters { kinds: Vec<OsImagesFilterKind> },
}

fn format_kinds(kinds: &[OsImagesFilterKind]) -> String {
    kinds
        .iter()
        .map(OsImagesFilterKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::MachineImageVersion;

    fn image(name: &str, versions: &[&str]) -> MachineImage {
        MachineImage::new(
            name,
            versions.iter().map(|v| MachineImageVersion::new(*v)).collect(),
        )
    }

    #[test]
    fn flat_images_preserves_catalog_order() {
        let flat = flat_images(&[image("ubuntu", &["20.04", "22.04"]), image("gardenlinux", &["1.0"])]);

        let pairs: Vec<(&str, Option<&str>)> = flat
            .iter()
            .map(|i| (i.name.as_str(), i.version.version()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("ubuntu", Some("20.04")),
                ("ubuntu", Some("22.04")),
                ("gardenlinux", Some("1.0")),
            ]
        );
    }

    #[test]
    fn flat_images_of_empty_catalog_is_empty() {
        assert!(flat_images(&[]).is_empty());
        assert!(flat_images(&[image("ubuntu", &[])]).is_empty());
    }

    #[test]
    fn remove_duplicates_keeps_first_occurrence() {
        let images = vec![
            OsImage::new("ubuntu", MachineImageVersion::new("20.04")),
            OsImage::new("gardenlinux", MachineImageVersion::new("1.0")),
            OsImage::new("ubuntu", MachineImageVersion::new("20.04")),
        ];

        let result = remove_duplicates(images);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "ubuntu");
        assert_eq!(result[1].name, "gardenlinux");
    }

    #[test]
    fn remove_duplicates_compares_extra_attributes() {
        let images = vec![
            OsImage::new("ubuntu", MachineImageVersion::new("20.04").with("arch", "amd64")),
            OsImage::new("ubuntu", MachineImageVersion::new("20.04").with("arch", "arm64")),
        ];

        assert_eq!(remove_duplicates(images).len(), 2);
    }

    #[test]
    fn conflicting_filters_abort_before_anything_else() {
        let err = compute_machine_images(
            &[],
            &[image("ubuntu", &["20.04"])],
            &[image("ubuntu", &["20.04"])],
            &[],
            &[],
            &[OsImagesFilterKind::Supported, OsImagesFilterKind::Preview],
            &[OsImagesFilterKind::Preview],
        )
        .unwrap_err();

        assert_eq!(
            err,
            MachineImagesError::ConflictingFilters {
                kinds: vec![OsImagesFilterKind::Preview]
            }
        );
        assert_eq!(
            err.to_string(),
            "exclude filter list contains element of include list: preview"
        );
    }

    #[test]
    fn empty_include_filters_conflict_with_excluded_all() {
        let result = compute_machine_images(&[], &[], &[], &[], &[], &[], &[OsImagesFilterKind::All]);
        assert!(matches!(
            result,
            Err(MachineImagesError::ConflictingFilters { .. })
        ));
    }

    #[test]
    fn landscape_entries_come_before_lss_entries() {
        let landscape = vec![image("ubuntu", &["22.04"])];
        let lss = vec![image("ubuntu", &["20.04", "22.04"])];
        let provider = vec![image("ubuntu", &["20.04", "22.04"])];

        let result = compute_machine_images(&lss, &landscape, &provider, &[], &[], &[], &[]).unwrap();

        let versions: Vec<Option<&str>> = result[0].versions.iter().map(|v| v.version()).collect();
        assert_eq!(versions, vec![Some("22.04"), Some("20.04")]);
    }

    #[test]
    fn empty_catalogs_yield_empty_result() {
        let result = compute_machine_images(&[], &[], &[], &[], &[], &[], &[]).unwrap();
        assert!(result.is_empty());
    }
}

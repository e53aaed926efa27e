use log::debug;

use crate::cloud::{MachineImage, MachineImageVersion};

/// Drop disabled images and merge provider configuration into each version.
///
/// A version is kept only if a provider record with the same image name and
/// version identifier exists; images left without versions are dropped.
pub fn enrich_machine_images(
    machine_images: Vec<MachineImage>,
    disabled_names: &[String],
    provider_landscape_images: &[MachineImage],
    provider_images: &[MachineImage],
) -> Vec<MachineImage> {
    let mut enriched = Vec::with_capacity(machine_images.len());

    for image in machine_images {
        if disabled_names.iter().any(|name| *name == image.name) {
            debug!("Machine image '{}' is disabled", image.name);
            continue;
        }

        let mut versions_with_config = Vec::with_capacity(image.versions.len());
        for mut version in image.versions {
            let Some(version_number) = version.version() else {
                debug!("Skipping a version of '{}' without version identifier", image.name);
                continue;
            };

            match version_config(
                &image.name,
                version_number,
                provider_landscape_images,
                provider_images,
            ) {
                Some(config) => {
                    version.merge(config);
                    versions_with_config.push(version);
                }
                None => debug!(
                    "No provider config for '{}' version '{}'",
                    image.name, version_number
                ),
            }
        }

        if !versions_with_config.is_empty() {
            enriched.push(MachineImage::new(image.name, versions_with_config));
        }
    }

    enriched
}

/// Provider record for `(image_name, version)`, preferring the landscape
/// specific catalog over the global one.
pub fn version_config<'a>(
    image_name: &str,
    version: &str,
    provider_landscape_images: &'a [MachineImage],
    provider_images: &'a [MachineImage],
) -> Option<&'a MachineImageVersion> {
    find_version_config(image_name, version, provider_landscape_images)
        .or_else(|| find_version_config(image_name, version, provider_images))
}

fn find_version_config<'a>(
    image_name: &str,
    version: &str,
    images: &'a [MachineImage],
) -> Option<&'a MachineImageVersion> {
    images
        .iter()
        .filter(|image| image.name == image_name)
        .find_map(|image| image.find_version(version))
}

use std::collections::HashMap;

use crate::cloud::{MachineImage, MachineImageVersion, OsImage};

/// OS name that always sorts first.
pub const OS_NAME_GARDEN_LINUX: &str = "GardenLinux";

/// Regroup flat images by name; versions keep their first-seen order.
///
/// The order of the returned images is unspecified, run
/// [`sort_machine_images`] afterwards.
pub fn group_os_images(images: Vec<OsImage>) -> Vec<MachineImage> {
    let mut grouped: HashMap<String, Vec<MachineImageVersion>> = HashMap::new();

    for image in images {
        grouped.entry(image.name).or_default().push(image.version);
    }

    grouped
        .into_iter()
        .map(|(name, versions)| MachineImage::new(name, versions))
        .collect()
}

/// Sort alphabetically by name with [`OS_NAME_GARDEN_LINUX`] moved to the
/// front.
pub fn sort_machine_images(images: &mut [MachineImage]) {
    images.sort_by(|a, b| {
        let a_first = a.name == OS_NAME_GARDEN_LINUX;
        let b_first = b.name == OS_NAME_GARDEN_LINUX;
        b_first.cmp(&a_first).then_with(|| a.name.cmp(&b.name))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(images: &[MachineImage]) -> Vec<&str> {
        images.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn group_collects_versions_per_name_in_order() {
        let images = vec![
            OsImage::new("ubuntu", MachineImageVersion::new("20.04")),
            OsImage::new("GardenLinux", MachineImageVersion::new("1.0")),
            OsImage::new("ubuntu", MachineImageVersion::new("22.04")),
        ];

        let mut grouped = group_os_images(images);
        sort_machine_images(&mut grouped);

        assert_eq!(names(&grouped), vec!["GardenLinux", "ubuntu"]);
        let ubuntu: Vec<Option<&str>> = grouped[1].versions.iter().map(|v| v.version()).collect();
        assert_eq!(ubuntu, vec![Some("20.04"), Some("22.04")]);
    }

    #[test]
    fn garden_linux_goes_first_then_alphabetical() {
        let mut images = vec![
            MachineImage::new("suse-chost", vec![]),
            MachineImage::new("Alpine", vec![]),
            MachineImage::new(OS_NAME_GARDEN_LINUX, vec![]),
            MachineImage::new("flatcar", vec![]),
        ];

        sort_machine_images(&mut images);

        assert_eq!(
            names(&images),
            vec!["GardenLinux", "Alpine", "flatcar", "suse-chost"]
        );
    }

    #[test]
    fn sort_without_garden_linux_is_alphabetical() {
        let mut images = vec![
            MachineImage::new("ubuntu", vec![]),
            MachineImage::new("flatcar", vec![]),
        ];

        sort_machine_images(&mut images);

        assert_eq!(names(&images), vec!["flatcar", "ubuntu"]);
    }
}

use crate::cloud::{OsImage, OsImagesFilterKind};

use super::MachineImagesError;

/// Reject filter lists that name the same kind on both sides.
pub fn validate_filters(
    include_filters: &[OsImagesFilterKind],
    exclude_filters: &[OsImagesFilterKind],
) -> Result<(), MachineImagesError> {
    let mut conflicting: Vec<OsImagesFilterKind> = Vec::new();
    for kind in include_filters {
        if exclude_filters.contains(kind) && !conflicting.contains(kind) {
            conflicting.push(*kind);
        }
    }

    if conflicting.is_empty() {
        return Ok(());
    }

    Err(MachineImagesError::ConflictingFilters { kinds: conflicting })
}

/// Keep the images selected by `include_filters` and not hit by any of
/// `exclude_filters`.
///
/// An include list that is empty or contains [`OsImagesFilterKind::All`]
/// selects everything.
pub fn filter_os_images(
    images: Vec<OsImage>,
    include_filters: &[OsImagesFilterKind],
    exclude_filters: &[OsImagesFilterKind],
) -> Result<Vec<OsImage>, MachineImagesError> {
    validate_filters(include_filters, exclude_filters)?;

    let include_all =
        include_filters.is_empty() || include_filters.contains(&OsImagesFilterKind::All);

    Ok(images
        .into_iter()
        .filter(|image| include_all || include_filters.iter().any(|kind| kind.matches(image)))
        .filter(|image| !exclude_filters.iter().any(|kind| kind.matches(image)))
        .collect())
}

use serde::Deserialize;

use super::MachineImage;

/// Top-level container of a catalog document.
///
/// Catalogs come either as a bare list of machine images or, in cloud-profile
/// style, as an object carrying that list under `machineImages`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Catalog {
    List(Vec<MachineImage>),
    Document(CatalogDocument),
}

/// Object form of a catalog. The `machineImages` list is required and no
/// other keys are allowed, so a misspelled key fails instead of loading an
/// empty catalog.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    #[serde(rename = "machineImages")]
    machine_images: Vec<MachineImage>,
}

impl Catalog {
    pub fn into_machine_images(self) -> Vec<MachineImage> {
        match self {
            Catalog::List(images) => images,
            Catalog::Document(document) => document.machine_images,
        }
    }
}

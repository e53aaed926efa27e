mod catalog;
mod filter;
mod image;
mod version;

pub use catalog::{Catalog, CatalogDocument};
pub use filter::{OsImagesFilterKind, UnknownFilterKind};
pub use image::{MachineImage, OsImage};
pub use version::{CLASSIFICATION_KEY, MachineImageVersion, VERSION_KEY};

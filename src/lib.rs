//! Computes the machine images a landscape supports.
//!
//! Image lists from the landscape and LSS catalogs are merged, deduplicated,
//! filtered, grouped and sorted, then enriched with provider specific
//! configuration from the provider-landscape and provider catalogs.
//!
//! ```
//! use machine_images::cloud::{MachineImage, MachineImageVersion};
//! use machine_images::compute_machine_images;
//!
//! let landscape = vec![MachineImage::new("ubuntu", vec![MachineImageVersion::new("20.04")])];
//! let provider = vec![MachineImage::new(
//!     "ubuntu",
//!     vec![MachineImageVersion::new("20.04").with("arch", "amd64")],
//! )];
//!
//! let images = compute_machine_images(&[], &landscape, &provider, &[], &[], &[], &[]).unwrap();
//! assert_eq!(images[0].versions[0].get("arch"), Some(&serde_json::json!("amd64")));
//! ```

pub mod cloud;
pub mod helpers;
pub mod machine_images;
pub mod repositories;

pub use machine_images::{MachineImagesError, compute_machine_images};

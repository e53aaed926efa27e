pub mod catalog_loader;
pub mod catalog_reader;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for catalog loading, drawn on stderr so stdout stays clean
/// for the computed images.
pub fn catalog_progress_bar(len: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} catalogs",
    )
    .context("build progress style")?
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message("Loading catalogs");
    Ok(pb)
}

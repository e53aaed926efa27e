mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use cli::{Cli, OutputFormat};
use machine_images::cloud::MachineImage;
use machine_images::compute_machine_images;
use machine_images::helpers::{catalog_loader::CatalogLoader, catalog_progress_bar};
use machine_images::repositories;

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.parse_filters(level);
    }
    builder.init();
}

fn render(images: &[MachineImage], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(images)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(images)?,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut config = repositories::load_from_file(&cli.config)
        .with_context(|| format!("load landscape config {}", cli.config.display()))?;
    if !cli.include.is_empty() {
        config.set_include_filters(cli.include);
    }
    if !cli.exclude.is_empty() {
        config.set_exclude_filters(cli.exclude);
    }
    config.disable(cli.disable);

    let loader = CatalogLoader::with_defaults(!cli.no_cache)?;
    let progress = catalog_progress_bar(config.sources().len() as u64)?;
    let catalogs = loader.load(&config, &progress).await?;
    progress.finish_and_clear();

    let images = compute_machine_images(
        &catalogs.lss,
        &catalogs.landscape,
        &catalogs.provider,
        &catalogs.provider_landscape,
        config.disabled_machine_images(),
        config.include_filters(),
        config.exclude_filters(),
    )?;

    let rendered = render(&images, cli.format)?;
    match cli.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("write {}", path.display()))?;
            log::info!("Wrote {} machine images to {}", images.len(), path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

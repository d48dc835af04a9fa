use crate::config::Config;
use anyhow::{Context, Result};
use overlay_texture::{ColorEntry, OverlayKind, generate_overlay};
use rayon::prelude::*;
use std::{fs, path::PathBuf, time::Instant};

/// Write one texture per color table entry into the configured output
/// directory. Returned paths follow table order in both modes.
pub fn run(config: &Config) -> Result<Vec<PathBuf>> {
    let table = config.color_table()?;
    let overlay = config.overlay();

    let output_dir = prepare_output_dir(config)?;

    println!("Generating radiation overlay textures...");
    println!("Output directory: {}", output_dir.display());
    println!("Size: {}x{}", config.width, config.height);
    println!();

    let start = Instant::now();
    let paths = if config.parallel {
        table
            .entries()
            .par_iter()
            .map(|entry| generate_entry(config, &overlay, entry))
            .collect::<Result<Vec<_>>>()?
    } else {
        table
            .iter()
            .map(|entry| generate_entry(config, &overlay, entry))
            .collect::<Result<Vec<_>>>()?
    };
    log::info!("{} overlays generated in {:.2?}", paths.len(), start.elapsed());

    println!();
    println!("Done! Textures created successfully.");
    println!("The overlay system will control transparency via alpha parameter.");

    Ok(paths)
}

/// Create the output directory and return its absolute, resolved path
pub fn prepare_output_dir(config: &Config) -> Result<PathBuf> {
    let dir = &config.output_dir;
    fs::create_dir_all(dir)
        .with_context(|| format!("create output directory {} failed", dir.display()))?;

    fs::canonicalize(dir).with_context(|| format!("resolve output directory {} failed", dir.display()))
}

fn generate_entry(config: &Config, overlay: &OverlayKind, entry: &ColorEntry) -> Result<PathBuf> {
    let path = generate_overlay(
        overlay,
        &entry.name,
        entry.color,
        config.width,
        config.height,
        &config.output_dir,
    )
    .with_context(|| format!("generate overlay `{}` failed", entry.name))?;

    if overlay.is_vignette() {
        println!("Created (vignette): {}", path.display());
    } else {
        println!("Created: {}", path.display());
    }

    Ok(path)
}

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

/// Load a .wexbim file and print a summary of the decoded scene.
///
/// This is demonstration tooling, not part of the core decoder contract: it
/// prints node/triangle counts and diagnostics, nothing more.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The input .wexbim file.
    input: PathBuf,

    /// Print info-level log records from the decode (block-level warnings
    /// always print regardless of this flag).
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(level).init();

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("failed to read {:?}", cli.input))?;

    let start = std::time::Instant::now();
    let (scene, diagnostics) = wexbim_model::load(&bytes, 0)
        .with_context(|| format!("failed to decode {:?}", cli.input))?;

    let triangle_count: usize = scene
        .nodes
        .iter()
        .map(|node| match node {
            wexbim_model::MeshNode::Singleton { geometry, .. } => geometry.indices.len() / 3,
            wexbim_model::MeshNode::Instanced {
                geometry,
                transforms,
                ..
            } => (geometry.indices.len() / 3) * transforms.len(),
        })
        .sum();

    println!(
        "{:?}: {} mesh nodes, {} triangles, {} diagnostics ({:?})",
        cli.input,
        scene.nodes.len(),
        triangle_count,
        diagnostics.len(),
        start.elapsed(),
    );

    for diagnostic in &diagnostics {
        log::warn!("{diagnostic}");
    }

    Ok(())
}

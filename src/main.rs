use std::path::PathBuf;

use armmaze::config::SceneConfig;
use clap::Parser;
use env_logger::Env;
use log::info;

#[derive(Parser)]
#[command(name = "armmaze")]
#[command(about = "Rasterize a planar arm's configuration space into a maze")]
#[command(version)]
struct Cli {
    /// Scene file (JSON). Uses the built-in two-link scene when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Degrees per grid step, overriding the scene
    #[arg(short, long)]
    granularity: Option<i32>,

    /// Output maze file
    #[arg(short, long, default_value = "artifacts/maze.txt")]
    out: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> armmaze::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let mut scene = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };
    if let Some(g) = cli.granularity {
        scene.granularity = g;
    }

    info!(
        "Rasterizing {} links, granularity={}, {} goals, {} obstacles",
        scene.links.len(),
        scene.granularity,
        scene.goals.len(),
        scene.obstacles.len()
    );

    let (maze, timings) = armmaze::build_maze(&scene)?;

    info!("Timings:");
    for t in &timings {
        info!("  {:20} {:8.1} ms", t.name, t.ms);
    }

    maze.write_to(&cli.out)?;
    info!("Saved {}", cli.out.display());

    Ok(())
}

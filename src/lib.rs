pub mod arm;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod maze;
pub mod transform;

use std::time::Instant;

use log::info;

use config::SceneConfig;
pub use error::{Error, Result};
use maze::Maze;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Build the arm described by `scene` and rasterize its configuration space.
pub fn build_maze(scene: &SceneConfig) -> Result<(Maze, Vec<Timing>)> {
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Arm in its initial pose
    let t = Instant::now();
    let arm = scene.build_arm()?;
    timings.push(Timing {
        name: "arm",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    // 2. Sweep every angle tuple
    let t = Instant::now();
    let maze = transform::transform_to_maze(
        &arm,
        &scene.goals,
        &scene.obstacles,
        scene.window,
        scene.granularity,
    )?;
    timings.push(Timing {
        name: "rasterize",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let counts = maze.counts();
    info!(
        "maze {:?}: {} free, {} wall, {} goal, start {:?}",
        maze.dims(),
        counts.free + counts.start,
        counts.wall,
        counts.goal,
        maze.start()
    );

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });

    Ok((maze, timings))
}

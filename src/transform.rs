use log::debug;
use rayon::prelude::*;

use crate::arm::{AngleLimit, Arm};
use crate::error::{Error, Result};
use crate::geometry::{Circle, Contact, Window, tip_touches_goal, touches_any, within_window};
use crate::grid::{Grid, IndexTuples, flat_index};
use crate::maze::{Cell, Maze};

/// Cells per axis: `(max - min) / granularity + 1`.
/// Limits must be non-empty and within `±MAX_LIMIT_DEGREES`.
pub fn grid_dims(limits: &[AngleLimit], granularity: i32) -> Result<Vec<usize>> {
    if granularity <= 0 {
        return Err(Error::InvalidGranularity(granularity));
    }
    limits
        .iter()
        .enumerate()
        .map(|(link, l)| {
            l.validate(link)?;
            Ok(((l.max - l.min) / granularity) as usize + 1)
        })
        .collect()
}

/// Grid index of `angle` on an axis starting at `min`. Assumes `angle >= min`.
#[inline]
pub fn angle_to_index(angle: i32, min: i32, granularity: i32) -> usize {
    ((angle - min) / granularity) as usize
}

#[inline]
pub fn index_to_angle(index: usize, min: i32, granularity: i32) -> i32 {
    index as i32 * granularity + min
}

/// Classify the arm's current configuration.
///
/// Priority, first match wins:
/// 1. any endpoint outside the window -> wall
/// 2. tip inside a goal -> goal
/// 3. any link within padding of an obstacle -> wall
/// 4. any link touching a goal (no padding) -> wall
/// 5. free
pub fn classify(arm: &Arm, goals: &[Circle], obstacles: &[Circle], window: Window) -> Cell {
    let links = arm.segments();
    if !within_window(links, window) {
        Cell::Wall
    } else if tip_touches_goal(arm.tip(), goals) {
        Cell::Goal
    } else if touches_any(links, obstacles, Contact::Obstacle) {
        Cell::Wall
    } else if touches_any(links, goals, Contact::Goal) {
        // Brushing a goal with anything but the tip is not a valid resting pose.
        Cell::Wall
    } else {
        Cell::Free
    }
}

fn validate_circles(kind: &'static str, circles: &[Circle]) -> Result<()> {
    circles
        .iter()
        .enumerate()
        .try_for_each(|(i, c)| c.validate(kind, i))
}

/// Rasterize the arm's configuration space into a maze.
///
/// Every angle tuple on the `granularity` lattice inside the arm's limits
/// is classified with [`classify`]. The cell of the arm's current angles is
/// marked [`Cell::Start`] when it is free. `arm` itself is not modified:
/// workers sweep axis-0 slabs in parallel, each on its own copy.
pub fn transform_to_maze(
    arm: &Arm,
    goals: &[Circle],
    obstacles: &[Circle],
    window: Window,
    granularity: i32,
) -> Result<Maze> {
    let limits = arm.limits();
    let dims = grid_dims(&limits, granularity)?;
    validate_circles("goal", goals)?;
    validate_circles("obstacle", obstacles)?;

    let offsets: Vec<i32> = limits.iter().map(|l| l.min).collect();
    let start: Vec<usize> = arm
        .angles()
        .iter()
        .zip(&offsets)
        .map(|(&a, &min)| angle_to_index(a, min, granularity))
        .collect();

    debug!(
        "rasterizing {} links, dims {:?}, {} cells",
        dims.len(),
        dims,
        dims.iter().product::<usize>()
    );

    let mut grid = Grid::<Cell>::new(&dims);
    let start_flat = grid.idx(&start);

    // One slab per axis-0 index. A zero-link arm is a single cell.
    let slab_len = grid.strides().first().copied().unwrap_or(1);
    let inner_dims = dims.get(1..).unwrap_or(&[]).to_vec();
    let inner_strides = grid.strides().get(1..).unwrap_or(&[]).to_vec();

    grid.data
        .par_chunks_mut(slab_len)
        .enumerate()
        .try_for_each(|(outer, cells)| -> Result<()> {
            let mut arm = arm.clone();
            let mut angles = vec![0i32; offsets.len()];
            if let Some(first) = angles.first_mut() {
                *first = index_to_angle(outer, offsets[0], granularity);
            }
            for inner in IndexTuples::new(&inner_dims) {
                for (axis, &i) in inner.iter().enumerate() {
                    angles[axis + 1] = index_to_angle(i, offsets[axis + 1], granularity);
                }
                arm.set_angles(&angles)?;

                let local = flat_index(&inner, &inner_strides);
                let cell = classify(&arm, goals, obstacles, window);
                cells[local] = if cell == Cell::Free && outer * slab_len + local == start_flat {
                    Cell::Start
                } else {
                    cell
                };
            }
            Ok(())
        })?;

    Maze::new(grid, offsets, granularity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arm::{LinkSpec, MAX_LIMIT_DEGREES};
    use crate::geometry::Point;

    fn spec(length: f64, angle: i32, padding: f64, min: i32, max: i32) -> LinkSpec {
        LinkSpec {
            length,
            angle,
            padding,
            limits: AngleLimit::new(min, max),
        }
    }

    #[test]
    fn test_grid_dims() {
        let limits = [AngleLimit::new(0, 180), AngleLimit::new(-150, 150)];
        assert_eq!(grid_dims(&limits, 2).unwrap(), vec![91, 151]);
        assert_eq!(grid_dims(&limits, 7).unwrap(), vec![26, 43]);
        assert_eq!(grid_dims(&[AngleLimit::new(5, 5)], 3).unwrap(), vec![1]);
    }

    #[test]
    fn test_grid_dims_rejects_bad_config() {
        let limits = [AngleLimit::new(0, 180)];
        assert!(matches!(grid_dims(&limits, 0), Err(Error::InvalidGranularity(0))));
        assert!(matches!(grid_dims(&limits, -3), Err(Error::InvalidGranularity(-3))));
        assert!(matches!(
            grid_dims(&[AngleLimit::new(0, 10), AngleLimit::new(10, 0)], 1),
            Err(Error::InvalidLimits { link: 1, .. })
        ));
    }

    #[test]
    fn test_grid_dims_rejects_extreme_limits() {
        assert!(matches!(
            grid_dims(&[AngleLimit::new(i32::MIN, 1)], 1),
            Err(Error::InvalidLimits { link: 0, .. })
        ));
        assert!(matches!(
            grid_dims(&[AngleLimit::new(0, 10), AngleLimit::new(-1, i32::MAX)], 1),
            Err(Error::InvalidLimits { link: 1, .. })
        ));
        let widest = AngleLimit::new(-MAX_LIMIT_DEGREES, MAX_LIMIT_DEGREES);
        assert_eq!(grid_dims(&[widest], i32::MAX).unwrap(), vec![1]);
        assert_eq!(grid_dims(&[widest], 1).unwrap(), vec![7201]);
    }

    #[test]
    fn test_index_angle_round_trip() {
        let limits = [AngleLimit::new(-150, 150), AngleLimit::new(0, 179)];
        for g in [1, 2, 3, 7, 11] {
            let dims = grid_dims(&limits, g).unwrap();
            for (l, &d) in limits.iter().zip(&dims) {
                for i in 0..d {
                    let a = index_to_angle(i, l.min, g);
                    assert!(l.contains(a));
                    assert_eq!(angle_to_index(a, l.min, g), i);
                }
            }
        }
    }

    #[test]
    fn test_classify_tip_goal_beats_obstacle_padding() {
        // link 1 runs (100,200)->(200,200); its padding reaches the obstacle
        // 7px below it while the tip sits on the goal center.
        let arm = Arm::new(
            Point::new(100, 200),
            &[spec(100.0, 0, 5.0, 0, 0), spec(50.0, 0, 5.0, 0, 0)],
        )
        .unwrap();
        let goals = [Circle::new(250.0, 200.0, 10.0)];
        let obstacles = [Circle::new(150.0, 207.0, 3.0)];
        let window = Window::new(400, 400);

        assert!(touches_any(arm.segments(), &obstacles, Contact::Obstacle));
        assert_eq!(classify(&arm, &goals, &obstacles, window), Cell::Goal);
        // without the goal the same pose is a wall
        assert_eq!(classify(&arm, &[], &obstacles, window), Cell::Wall);
    }

    #[test]
    fn test_classify_window_beats_goal() {
        let arm = Arm::new(Point::new(10, 10), &[spec(20.0, 0, 0.0, 0, 0)]).unwrap();
        let goals = [Circle::new(30.0, 10.0, 5.0)];
        assert_eq!(classify(&arm, &goals, &[], Window::new(100, 100)), Cell::Goal);
        assert_eq!(classify(&arm, &goals, &[], Window::new(25, 100)), Cell::Wall);
    }

    #[test]
    fn test_classify_goal_brushed_by_link_is_wall() {
        // goal sits on link 1, tip is far away
        let arm = Arm::new(
            Point::new(0, 100),
            &[spec(100.0, 0, 0.0, 0, 0), spec(50.0, 90, 0.0, 90, 90)],
        )
        .unwrap();
        let goals = [Circle::new(50.0, 100.0, 2.0)];
        assert_eq!(classify(&arm, &goals, &[], Window::new(200, 200)), Cell::Wall);
    }

    #[test]
    fn test_transform_rejects_malformed_circle() {
        let arm = Arm::new(Point::new(0, 0), &[spec(10.0, 0, 0.0, 0, 10)]).unwrap();
        let err = transform_to_maze(
            &arm,
            &[],
            &[Circle::new(0.0, 0.0, -1.0)],
            Window::new(10, 10),
            1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidCircle { kind: "obstacle", index: 0, .. }));
    }

    #[test]
    fn test_transform_single_link() {
        // Base at the bottom-left corner: only angles in [0, 90] stay inside.
        let arm = Arm::new(Point::new(0, 100), &[spec(50.0, 0, 0.0, -90, 180)]).unwrap();
        let maze = transform_to_maze(&arm, &[], &[], Window::new(100, 100), 45).unwrap();
        assert_eq!(maze.dims(), &[7]);
        let cells: Vec<Cell> = maze.grid().data.clone();
        assert_eq!(
            cells,
            vec![
                Cell::Wall,  // -90
                Cell::Wall,  // -45
                Cell::Start, // 0
                Cell::Free,  // 45
                Cell::Free,  // 90
                Cell::Wall,  // 135
                Cell::Wall,  // 180
            ]
        );
    }

    #[test]
    fn test_transform_leaves_arm_untouched() {
        let arm = Arm::new(
            Point::new(150, 200),
            &[spec(100.0, 90, 15.0, 0, 180), spec(50.0, 60, 10.0, -150, 150)],
        )
        .unwrap();
        let before = arm.angles().to_vec();
        transform_to_maze(&arm, &[], &[], Window::new(300, 200), 10).unwrap();
        assert_eq!(arm.angles(), before.as_slice());
    }
}

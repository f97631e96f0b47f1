use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Integer point in window pixel space. y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Circular goal or obstacle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }

    /// Reject circles the distance math is not defined for.
    pub fn validate(&self, kind: &'static str, index: usize) -> Result<()> {
        let reason = if !(self.x.is_finite() && self.y.is_finite()) {
            "center is not finite"
        } else if !self.radius.is_finite() {
            "radius is not finite"
        } else if self.radius < 0.0 {
            "radius is negative"
        } else {
            return Ok(());
        };
        Err(Error::InvalidCircle {
            kind,
            index,
            reason,
        })
    }
}

/// Drawable area, `[0, width] x [0, height]` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub width: i32,
    pub height: i32,
}

impl Window {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x <= self.width && p.y >= 0 && p.y <= self.height
    }
}

/// One arm link as realised for a concrete angle tuple.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
    pub start: Point,
    pub end: Point,
    /// Clearance kept from obstacles. Not applied to goals.
    pub padding: f64,
}

impl LinkSegment {
    pub const fn new(start: Point, end: Point, padding: f64) -> Self {
        Self {
            start,
            end,
            padding,
        }
    }
}

/// Which buffer a contact test applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    /// Distance is compared against `radius + link.padding`.
    Obstacle,
    /// Distance is compared against `radius` alone.
    Goal,
}

/// Endpoint of a rigid link of `length` leaving `start` at `angle` degrees
/// (counter-clockwise on screen).
///
/// Offsets are truncated toward zero, not rounded, so grids stay
/// reproducible across runs: `-93.97` becomes `-93`.
pub fn compute_coordinate(start: Point, length: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    let dx = (length * rad.cos()) as i32;
    let dy = (length * rad.sin()) as i32;
    Point::new(start.x + dx, start.y - dy)
}

#[inline]
pub fn euclidean_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Minimum distance from `point` to the segment `seg_start..seg_end`.
///
/// A degenerate segment is treated as the single point `seg_start`.
pub fn point_segment_distance(seg_start: Point, seg_end: Point, point: (f64, f64)) -> f64 {
    let (x1, y1) = (seg_start.x as f64, seg_start.y as f64);
    let px = (seg_end.x - seg_start.x) as f64;
    let py = (seg_end.y - seg_start.y) as f64;

    let norm = px * px + py * py;
    if norm == 0.0 {
        return euclidean_distance((x1, y1), point);
    }

    let u = (((point.0 - x1) * px + (point.1 - y1) * py) / norm).clamp(0.0, 1.0);
    euclidean_distance((x1 + u * px, y1 + u * py), point)
}

/// True if any link comes within reach of any circle.
/// Closed boundary: exact tangency is contact.
pub fn touches_any(links: &[LinkSegment], circles: &[Circle], contact: Contact) -> bool {
    links.iter().any(|link| {
        let buffer = match contact {
            Contact::Obstacle => link.padding,
            Contact::Goal => 0.0,
        };
        circles.iter().any(|c| {
            point_segment_distance(link.start, link.end, (c.x, c.y)) <= c.radius + buffer
        })
    })
}

/// True if the arm tip lies inside or on any goal circle.
pub fn tip_touches_goal(tip: Point, goals: &[Circle]) -> bool {
    let tip = (tip.x as f64, tip.y as f64);
    goals
        .iter()
        .any(|g| euclidean_distance(tip, (g.x, g.y)) <= g.radius)
}

/// True if both endpoints of every link lie inside the window.
pub fn within_window(links: &[LinkSegment], window: Window) -> bool {
    links
        .iter()
        .all(|l| window.contains(l.start) && window.contains(l.end))
}

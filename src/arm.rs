use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{LinkSegment, Point, compute_coordinate};

/// Largest magnitude accepted for an angle limit, in degrees.
pub const MAX_LIMIT_DEGREES: i32 = 3600;

/// Closed angle range in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AngleLimit {
    pub min: i32,
    pub max: i32,
}

impl AngleLimit {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, angle: i32) -> bool {
        angle >= self.min && angle <= self.max
    }

    /// Non-empty and within `±MAX_LIMIT_DEGREES`, so `max - min` cannot overflow.
    pub fn validate(&self, link: usize) -> Result<()> {
        let bounded = |a: i32| (-MAX_LIMIT_DEGREES..=MAX_LIMIT_DEGREES).contains(&a);
        if self.max < self.min || !bounded(self.min) || !bounded(self.max) {
            return Err(Error::InvalidLimits {
                link,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Static description of one link plus its initial angle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub length: f64,
    /// Initial angle in degrees, relative to the previous link.
    pub angle: i32,
    /// Obstacle clearance in pixels.
    #[serde(default)]
    pub padding: f64,
    pub limits: AngleLimit,
}

impl LinkSpec {
    fn validate(&self, link: usize) -> Result<()> {
        if !(self.length.is_finite() && self.length >= 0.0) {
            return Err(Error::InvalidLink {
                link,
                reason: "length must be finite and non-negative",
            });
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(Error::InvalidLink {
                link,
                reason: "padding must be finite and non-negative",
            });
        }
        self.limits.validate(link)
    }
}

/// Every joint stays within `|base| + total length` of the origin; reject
/// arms whose reach does not fit in pixel coordinates.
fn check_reach(base: Point, links: &[LinkSpec]) -> Result<()> {
    let mut reach = base.x.unsigned_abs().max(base.y.unsigned_abs()) as f64;
    for (link, spec) in links.iter().enumerate() {
        reach += spec.length;
        if reach >= i32::MAX as f64 {
            return Err(Error::InvalidLink {
                link,
                reason: "arm reach overflows pixel coordinates",
            });
        }
    }
    Ok(())
}

/// Planar serial arm of rigid links chained from a fixed base.
///
/// Each link's angle is relative to the previous link; the first is relative
/// to the screen x-axis. Geometry is recomputed from the angle tuple alone,
/// so clones can be handed to worker threads.
#[derive(Clone, Debug)]
pub struct Arm {
    base: Point,
    links: Vec<LinkSpec>,
    angles: Vec<i32>,
    segments: Vec<LinkSegment>,
}

impl Arm {
    pub fn new(base: Point, links: &[LinkSpec]) -> Result<Self> {
        for (i, spec) in links.iter().enumerate() {
            spec.validate(i)?;
        }
        check_reach(base, links)?;
        let mut arm = Self {
            base,
            links: links.to_vec(),
            angles: Vec::with_capacity(links.len()),
            segments: Vec::with_capacity(links.len()),
        };
        let initial: Vec<i32> = links.iter().map(|l| l.angle).collect();
        arm.set_angles(&initial)?;
        Ok(arm)
    }

    #[inline]
    pub fn base(&self) -> Point {
        self.base
    }

    #[inline]
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    #[inline]
    pub fn angles(&self) -> &[i32] {
        &self.angles
    }

    pub fn limits(&self) -> Vec<AngleLimit> {
        self.links.iter().map(|l| l.limits).collect()
    }

    /// Move every joint at once. Rejects tuples of the wrong arity or with
    /// any angle outside its link's limits; the arm is unchanged on error.
    pub fn set_angles(&mut self, angles: &[i32]) -> Result<()> {
        if angles.len() != self.links.len() {
            return Err(Error::AngleCount {
                expected: self.links.len(),
                got: angles.len(),
            });
        }
        for (link, (&angle, spec)) in angles.iter().zip(&self.links).enumerate() {
            if !spec.limits.contains(angle) {
                return Err(Error::AngleOutOfRange {
                    link,
                    angle,
                    min: spec.limits.min,
                    max: spec.limits.max,
                });
            }
        }
        self.angles.clear();
        self.angles.extend_from_slice(angles);
        self.segments = forward_kinematics(self.base, &self.links, angles);
        Ok(())
    }

    #[inline]
    pub fn segments(&self) -> &[LinkSegment] {
        &self.segments
    }

    /// `(start, end)` of every link.
    pub fn endpoints(&self) -> Vec<(Point, Point)> {
        self.segments.iter().map(|s| (s.start, s.end)).collect()
    }

    /// Distal end of the last link; the base for an arm with no links.
    pub fn tip(&self) -> Point {
        self.segments.last().map_or(self.base, |s| s.end)
    }
}

/// Chain `compute_coordinate` from the base through every link.
/// Relative angles accumulate along the chain.
pub fn forward_kinematics(base: Point, links: &[LinkSpec], angles: &[i32]) -> Vec<LinkSegment> {
    let mut start = base;
    let mut absolute = 0i64;
    links
        .iter()
        .zip(angles)
        .map(|(spec, &relative)| {
            absolute += i64::from(relative);
            let end = compute_coordinate(start, spec.length, absolute as f64);
            let seg = LinkSegment::new(start, end, spec.padding);
            start = end;
            seg
        })
        .collect()
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::arm::{AngleLimit, Arm, LinkSpec};
use crate::error::Result;
use crate::geometry::{Circle, Point, Window};

/// Everything needed to rasterize one configuration space.
/// Missing fields fall back to the built-in two-link scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: Window,
    pub base: Point,
    pub links: Vec<LinkSpec>,
    pub goals: Vec<Circle>,
    pub obstacles: Vec<Circle>,
    /// Degrees per grid step.
    pub granularity: i32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: Window::new(300, 200),
            base: Point::new(150, 200),
            links: vec![
                LinkSpec {
                    length: 100.0,
                    angle: 90,
                    padding: 15.0,
                    limits: AngleLimit::new(0, 180),
                },
                LinkSpec {
                    length: 50.0,
                    angle: -60,
                    padding: 10.0,
                    limits: AngleLimit::new(-150, 150),
                },
            ],
            goals: vec![Circle::new(230.0, 90.0, 10.0)],
            obstacles: vec![Circle::new(60.0, 120.0, 10.0), Circle::new(110.0, 40.0, 10.0)],
            granularity: 2,
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Arm in its initial configuration.
    pub fn build_arm(&self) -> Result<Arm> {
        Arm::new(self.base, &self.links)
    }
}

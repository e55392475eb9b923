//! Camera
//!
//! Keeps a fixed-size viewport centred on a target, clamped inside scene
//! bounds inset from the level edges.

use serde::{Serialize, Deserialize};

use crate::core::rect::Rect;
use crate::game::config::SimConfig;
use crate::game::level::LevelBounds;

/// Offset applied to world-space draw calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Transform {
    pub const IDENTITY: Self = Self { translate_x: 0, translate_y: 0 };

    /// World point to screen point.
    #[inline]
    pub fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.translate_x, y + self.translate_y)
    }
}

/// Follow camera.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    /// Top-left of the viewport in world space
    pub x: i32,
    pub y: i32,
    pub viewport_width: i32,
    pub viewport_height: i32,
    /// Region the viewport is kept inside
    pub scene: Rect,
}

impl Camera {
    pub fn new(bounds: LevelBounds, config: &SimConfig) -> Self {
        let scene = Rect::new(
            config.scene_inset,
            config.scene_inset,
            bounds.width - config.scene_width_trim,
            bounds.height,
        );
        Self {
            x: scene.x,
            y: scene.y,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            scene,
        }
    }

    /// Centre on `target`, then clamp into the scene.
    ///
    /// When the scene is smaller than the viewport along an axis the
    /// viewport is pinned to the scene's top-left on that axis.
    pub fn chase(&mut self, target: Rect) {
        let (cx, cy) = target.center();
        self.x = clamp_axis(cx - self.viewport_width / 2, self.scene.left(), self.scene.right() - self.viewport_width);
        self.y = clamp_axis(cy - self.viewport_height / 2, self.scene.top(), self.scene.bottom() - self.viewport_height);
    }

    /// Draw transform for the current viewport.
    #[inline]
    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: -self.x,
            translate_y: -self.y,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Rect {
        Rect::new(self.x, self.y, self.viewport_width, self.viewport_height)
    }
}

#[inline]
fn clamp_axis(value: i32, min: i32, max: i32) -> i32 {
    if max < min {
        return min;
    }
    value.clamp(min, max)
}

//! Render seam definition.
//!
//! Defines the narrow interface the creature core needs from a 2D scene
//! renderer: filled polygon shapes with a transform and a fill style. The
//! core never touches renderer internals, so any host renderer can sit
//! behind this trait; [`NullRenderer`](crate::scene::NullRenderer) records
//! the same calls for headless runs and tests.

use glam::Vec2;

/// Handle to a shape owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(pub u32);

/// RGB fill color, linear components in [0, 1].
pub type Color = [f32; 3];

/// Everything needed to register one filled shape.
#[derive(Debug, Clone)]
pub struct ShapeDef {
    /// Local polygon, relative to the shape's transform origin
    pub vertices: Vec<Vec2>,
    pub color: Color,
    pub opacity: f32,
    /// Invisible shapes keep their handle but are never drawn
    pub visible: bool,
}

/// Narrow interface over a 2D scene renderer.
pub trait SceneRenderer {
    /// Create a filled shape and add it to the scene.
    fn create_shape(&mut self, def: ShapeDef) -> ShapeId;

    /// Move/rotate a shape to follow its source body.
    fn set_transform(&mut self, id: ShapeId, position: Vec2, rotation: f32);

    /// Replace a shape's polygon (the bell skin is rebuilt every tick).
    fn set_polygon(&mut self, id: ShapeId, vertices: &[Vec2]);

    /// Update fill color and opacity.
    fn set_style(&mut self, id: ShapeId, color: Color, opacity: f32);

    /// Remove a shape from the scene.
    fn remove_shape(&mut self, id: ShapeId);
}

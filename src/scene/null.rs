//! Recording renderer for headless runs and tests.

use glam::Vec2;

use super::traits::{Color, SceneRenderer, ShapeDef, ShapeId};

/// Last-known state of one shape in a [`NullRenderer`].
#[derive(Debug, Clone)]
pub struct RecordedShape {
    pub vertices: Vec<Vec2>,
    pub color: Color,
    pub opacity: f32,
    pub visible: bool,
    pub position: Vec2,
    pub rotation: f32,
}

/// A [`SceneRenderer`] that draws nothing and records every call.
///
/// Stands in for a real renderer wherever the simulation runs without a
/// display; tests assert against the recorded shape state.
#[derive(Debug, Default)]
pub struct NullRenderer {
    shapes: Vec<Option<RecordedShape>>,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.is_some()).count()
    }

    /// Recorded state of a shape, `None` once removed.
    pub fn shape(&self, id: ShapeId) -> Option<&RecordedShape> {
        self.shapes.get(id.0 as usize).and_then(|s| s.as_ref())
    }
}

impl SceneRenderer for NullRenderer {
    fn create_shape(&mut self, def: ShapeDef) -> ShapeId {
        self.shapes.push(Some(RecordedShape {
            vertices: def.vertices,
            color: def.color,
            opacity: def.opacity,
            visible: def.visible,
            position: Vec2::ZERO,
            rotation: 0.0,
        }));
        ShapeId(self.shapes.len() as u32 - 1)
    }

    fn set_transform(&mut self, id: ShapeId, position: Vec2, rotation: f32) {
        if let Some(Some(shape)) = self.shapes.get_mut(id.0 as usize) {
            shape.position = position;
            shape.rotation = rotation;
        }
    }

    fn set_polygon(&mut self, id: ShapeId, vertices: &[Vec2]) {
        if let Some(Some(shape)) = self.shapes.get_mut(id.0 as usize) {
            shape.vertices.clear();
            shape.vertices.extend_from_slice(vertices);
        }
    }

    fn set_style(&mut self, id: ShapeId, color: Color, opacity: f32) {
        if let Some(Some(shape)) = self.shapes.get_mut(id.0 as usize) {
            shape.color = color;
            shape.opacity = opacity;
        }
    }

    fn remove_shape(&mut self, id: ShapeId) {
        if let Some(slot) = self.shapes.get_mut(id.0 as usize) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_create_update_remove() {
        let mut scene = NullRenderer::new();
        let id = scene.create_shape(ShapeDef {
            vertices: vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            color: [1.0, 0.0, 0.5],
            opacity: 0.7,
            visible: true,
        });
        scene.set_transform(id, Vec2::new(3.0, 4.0), 0.5);
        scene.set_style(id, [0.0, 1.0, 0.0], 1.0);

        let shape = scene.shape(id).expect("shape should exist");
        assert_eq!(shape.position, Vec2::new(3.0, 4.0));
        assert_eq!(shape.color, [0.0, 1.0, 0.0]);
        assert_eq!(shape.opacity, 1.0);

        scene.remove_shape(id);
        assert!(scene.shape(id).is_none());
        assert_eq!(scene.shape_count(), 0);
    }
}

use glam::Vec2;

use super::color::Color;
use super::surface::{Surface, SurfaceMetrics};

/// One recorded draw call. `alpha` is the global alpha in effect when the
/// call was made.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        origin: Vec2,
        size: Vec2,
        color: Color,
        alpha: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
        alpha: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        alpha: f32,
    },
}

/// Surface that records draw calls instead of rasterizing them.
/// Used by tests and by hosts that replay frames into their own renderer.
pub struct RecordingSurface {
    size: Vec2,
    alpha: f32,
    stack: Vec<f32>,
    commands: Vec<DrawCommand>,
    fitted: Option<Vec2>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            alpha: 1.0,
            stack: Vec::new(),
            commands: Vec::with_capacity(1024),
            fitted: None,
        }
    }

    /// Change the size reported by `measured_size` (simulates a host resize).
    pub fn set_size(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Only the line segments, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    /// Drop recorded commands, keeping the surface state.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Buffer size from the most recent `fit`, if any.
    pub fn fitted(&self) -> Option<Vec2> {
        self.fitted
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl SurfaceMetrics for RecordingSurface {
    fn measured_size(&self) -> Vec2 {
        self.size
    }
}

impl Surface for RecordingSurface {
    /// Like a canvas resize, this drops everything drawn so far.
    fn fit(&mut self, size: Vec2) {
        self.fitted = Some(size);
        self.commands.clear();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect {
            origin,
            size,
            color,
            alpha: self.alpha,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha: self.alpha,
        });
    }

    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color) {
        self.commands.push(DrawCommand::RadialGradient {
            center,
            radius,
            inner,
            outer,
            alpha: self.alpha,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
            alpha: self.alpha,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.alpha);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.stack.pop() {
            self.alpha = alpha;
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }
}

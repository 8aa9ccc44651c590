//! The 2D drawing surface the field renders into.
//!
//! In the browser this is a canvas 2D context (see the `particle-web` crate);
//! in tests it is a [`RecordingSurface`](super::recording::RecordingSurface).
//! The trait is deliberately small: the field only needs rectangles, circles,
//! radial glows, line segments and a scoped global alpha.

use glam::Vec2;

use super::color::Color;

/// Size information about a surface, separate from drawing so the field can
/// measure a surface it only borrows immutably.
pub trait SurfaceMetrics {
    /// Actual on-screen size in pixels. Zero on an axis the host could not measure.
    fn measured_size(&self) -> Vec2;
}

/// Immediate-mode drawing contract.
pub trait Surface: SurfaceMetrics {
    /// Resize the drawing buffer to `size`. May discard what was drawn.
    fn fit(&mut self, size: Vec2);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    /// Fill a solid circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill a circle with a radial gradient from `inner` at the center to `outer` at `radius`.
    fn fill_radial_gradient(&mut self, center: Vec2, radius: f32, inner: Color, outer: Color);

    /// Stroke a single line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Push the current drawing state (global alpha included).
    fn save(&mut self);

    /// Pop the drawing state pushed by the matching `save`.
    fn restore(&mut self);

    /// Set the global alpha multiplier for subsequent draws.
    fn set_global_alpha(&mut self, alpha: f32);
}

/// Run `draw` with the surface's global alpha set to `alpha`, restoring the
/// previous state afterwards.
pub fn with_alpha<S, F>(surface: &mut S, alpha: f32, draw: F)
where
    S: Surface + ?Sized,
    F: FnOnce(&mut S),
{
    surface.save();
    surface.set_global_alpha(alpha);
    draw(surface);
    surface.restore();
}

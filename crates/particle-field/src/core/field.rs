//! The particle field: owns the particle collection and global parameters,
//! advances the simulation and renders whole frames.

use glam::{Vec2, Vec3};

use crate::api::config::FieldConfig;
use crate::api::types::ConfigEvent;
use crate::components::particle::Particle;
use crate::error::FieldError;
use crate::renderer::color::Color;
use crate::renderer::surface::{Surface, SurfaceMetrics};
use crate::systems::connections::{find_connections, render_connections, Connection};
use crate::systems::palette::ColorScheme;
use crate::systems::rng::Rng;

/// Translucent wash painted over the previous frame instead of clearing it,
/// which leaves a fading afterimage of everything drawn before.
pub const FADE_OVERLAY: Color = Color::new(102.0 / 255.0, 126.0 / 255.0, 234.0 / 255.0, 0.1);

/// Current drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
}

impl Viewport {
    fn from_size(size: Vec2) -> Self {
        Self {
            width: size.x,
            height: size.y,
            center: size / 2.0,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Measured size per axis, falling back where the measurement is unusable.
    /// `None` if an axis has no usable value at all.
    pub fn resolve(measured: Vec2, fallback: Vec2) -> Option<Vec2> {
        let pick = |m: f32, f: f32| -> Option<f32> {
            if m.is_finite() && m > 0.0 {
                Some(m)
            } else if f.is_finite() && f > 0.0 {
                Some(f)
            } else {
                None
            }
        };
        Some(Vec2::new(pick(measured.x, fallback.x)?, pick(measured.y, fallback.y)?))
    }
}

pub struct ParticleField {
    particles: Vec<Particle>,
    particle_count: usize,
    speed: f32,
    particle_size: f32,
    color_scheme: ColorScheme,
    trail_length: usize,
    connection_distance: f32,
    sparkles: bool,
    spawn_margin: f32,
    paused: bool,
    viewport: Viewport,
    rng: Rng,
    /// Scratch x/y positions, reused across frames.
    positions: Vec<Vec2>,
}

impl ParticleField {
    /// Size the field against `surface` (falling back to `fallback` where the
    /// surface measures as zero) and build the initial particles.
    pub fn new<M: SurfaceMetrics + ?Sized>(
        config: FieldConfig,
        surface: &M,
        fallback: Vec2,
    ) -> Result<Self, FieldError> {
        let size = Viewport::resolve(surface.measured_size(), fallback)
            .ok_or(FieldError::EmptyViewport)?;

        let mut field = Self {
            particles: Vec::with_capacity(config.particle_count),
            particle_count: config.particle_count,
            speed: config.speed,
            particle_size: config.particle_size,
            color_scheme: config.color_scheme,
            trail_length: config.trail_length,
            connection_distance: config.connection_distance,
            sparkles: config.sparkles,
            spawn_margin: config.spawn_margin,
            paused: false,
            viewport: Viewport::from_size(size),
            rng: Rng::new(config.seed),
            positions: Vec::with_capacity(config.particle_count),
        };
        log::info!(
            "particle field: {}x{} viewport, {} particles, scheme {}",
            size.x,
            size.y,
            field.particle_count,
            field.color_scheme.name()
        );
        field.rebuild_particles();
        Ok(field)
    }

    /// Re-measure the viewport. Keeps the previous size if neither the
    /// measurement nor the fallback is usable.
    pub fn resize(&mut self, measured: Vec2, fallback: Vec2) {
        match Viewport::resolve(measured, fallback) {
            Some(size) => {
                self.viewport = Viewport::from_size(size);
                log::info!("particle field resized to {}x{}", size.x, size.y);
            }
            None => log::warn!(
                "ignoring resize with no usable size (measured {:?}, fallback {:?})",
                measured,
                fallback
            ),
        }
    }

    /// Discard every particle and create `particle_count` fresh ones inside the
    /// placement rectangle, using the current size, scheme and trail length.
    pub fn rebuild_particles(&mut self) {
        let (x_lo, x_hi) = inset(self.viewport.width, self.spawn_margin);
        let (y_lo, y_hi) = inset(self.viewport.height, self.spawn_margin);

        self.particles.clear();
        for _ in 0..self.particle_count {
            let position = Vec3::new(
                self.rng.range(x_lo, x_hi),
                self.rng.range(y_lo, y_hi),
                self.rng.range(0.0, self.viewport.width),
            );
            self.particles.push(Particle::new(
                position,
                self.particle_size,
                self.color_scheme,
                self.trail_length,
                &mut self.rng,
            ));
        }
        log::info!("rebuilt {} particles", self.particles.len());
    }

    /// Placement rectangle for new particles as (min, max) corners.
    pub fn spawn_bounds(&self) -> (Vec2, Vec2) {
        let (x_lo, x_hi) = inset(self.viewport.width, self.spawn_margin);
        let (y_lo, y_hi) = inset(self.viewport.height, self.spawn_margin);
        (Vec2::new(x_lo, y_lo), Vec2::new(x_hi, y_hi))
    }

    /// Advance every particle by `raw_dt` milliseconds scaled by `speed`, then
    /// wrap positions around the viewport edges. Does nothing while paused.
    pub fn step(&mut self, raw_dt: f32) {
        if self.paused {
            return;
        }
        let dt = raw_dt * self.speed;
        let (width, height) = (self.viewport.width, self.viewport.height);

        for p in &mut self.particles {
            p.advance(dt);
            if self.sparkles {
                p.roll_sparkle(&mut self.rng);
            }

            if p.position.x < 0.0 {
                p.position.x = width;
            }
            if p.position.x > width {
                p.position.x = 0.0;
            }
            if p.position.y < 0.0 {
                p.position.y = height;
            }
            if p.position.y > height {
                p.position.y = 0.0;
            }
        }
    }

    /// Fade the previous frame, draw every particle in collection order, then
    /// the connection lines on top.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.fill_rect(Vec2::ZERO, self.viewport.size(), FADE_OVERLAY);
        for p in &self.particles {
            p.render(surface);
        }
        self.render_connections(surface);
    }

    /// Stroke a line between every pair of particles closer than the
    /// connection distance.
    pub fn render_connections<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.positions.clear();
        self.positions.extend(self.particles.iter().map(Particle::xy));
        let connections = find_connections(&self.positions, self.connection_distance);
        render_connections(surface, &self.positions, &connections);
    }

    /// Connections for the current positions, without drawing them.
    pub fn connections(&self) -> Vec<Connection> {
        let positions: Vec<Vec2> = self.particles.iter().map(Particle::xy).collect();
        find_connections(&positions, self.connection_distance)
    }

    /// Apply one configuration change. `surface` is re-measured on viewport resize.
    pub fn apply<M: SurfaceMetrics + ?Sized>(&mut self, event: ConfigEvent, surface: &M) {
        log::debug!("config: {:?}", event);
        match event {
            ConfigEvent::ParticleCount(count) => {
                self.particle_count = count;
                self.rebuild_particles();
            }
            ConfigEvent::Speed(speed) => self.speed = speed,
            ConfigEvent::ParticleSize(size) => {
                self.particle_size = size;
                for p in &mut self.particles {
                    p.size = size;
                }
            }
            ConfigEvent::ColorScheme(scheme) => {
                self.color_scheme = scheme;
                for p in &mut self.particles {
                    p.set_color_scheme(scheme, &mut self.rng);
                }
            }
            ConfigEvent::TrailLength(length) => {
                self.trail_length = length;
                self.rebuild_particles();
            }
            ConfigEvent::ConnectionDistance(distance) => self.connection_distance = distance,
            ConfigEvent::Sparkles(enabled) => self.sparkles = enabled,
            ConfigEvent::Reset => self.rebuild_particles(),
            ConfigEvent::Pause => self.set_paused(true),
            ConfigEvent::Resume => self.set_paused(false),
            ConfigEvent::TogglePause => self.set_paused(!self.paused),
            ConfigEvent::ViewportResize { width, height } => {
                self.resize(surface.measured_size(), Vec2::new(width, height));
                self.rebuild_particles();
            }
        }
    }

    /// Pausing also drops any visible sparkle flash so it does not linger.
    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            for p in &mut self.particles {
                p.sparkle_armed = false;
            }
        }
    }

    // -- Accessors --

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Direct access for hosts and tests that place particles explicitly.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn particle_size(&self) -> f32 {
        self.particle_size
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    pub fn trail_length(&self) -> usize {
        self.trail_length
    }

    pub fn connection_distance(&self) -> f32 {
        self.connection_distance
    }

    pub fn sparkles(&self) -> bool {
        self.sparkles
    }
}

/// Placement range along one axis: `[margin, extent - margin)`, or the whole
/// extent when it is too small to inset.
fn inset(extent: f32, margin: f32) -> (f32, f32) {
    if extent > margin * 2.0 {
        (margin, extent - margin)
    } else {
        (0.0, extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCommand, RecordingSurface};

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Vec2::new(800.0, 600.0))
    }

    fn field(config: FieldConfig) -> (ParticleField, RecordingSurface) {
        let s = surface();
        let f = ParticleField::new(config, &s, Vec2::new(1024.0, 768.0)).unwrap();
        (f, s)
    }

    fn snapshot(field: &ParticleField) -> Vec<(Vec3, f32, Vec<Vec2>)> {
        field
            .particles()
            .iter()
            .map(|p| (p.position, p.life, p.trail.iter().map(|t| t.position).collect()))
            .collect()
    }

    #[test]
    fn builds_configured_count_inside_inset() {
        let (f, _) = field(FieldConfig::default().with_particle_count(250));
        assert_eq!(f.len(), 250);
        let (lo, hi) = f.spawn_bounds();
        assert_eq!(lo, Vec2::new(50.0, 50.0));
        assert_eq!(hi, Vec2::new(750.0, 550.0));
        for p in f.particles() {
            assert!(p.position.x >= lo.x && p.position.x < hi.x);
            assert!(p.position.y >= lo.y && p.position.y < hi.y);
            assert!(p.position.z >= 0.0 && p.position.z < 800.0);
            assert_eq!(p.trail.capacity(), 10);
        }
    }

    #[test]
    fn zero_measured_size_uses_fallback() {
        let s = RecordingSurface::new(Vec2::ZERO);
        let f = ParticleField::new(FieldConfig::default(), &s, Vec2::new(640.0, 480.0)).unwrap();
        assert_eq!(f.viewport().size(), Vec2::new(640.0, 480.0));
        assert_eq!(f.viewport().center, Vec2::new(320.0, 240.0));
    }

    #[test]
    fn no_usable_size_is_an_error() {
        let s = RecordingSurface::new(Vec2::ZERO);
        let err = ParticleField::new(FieldConfig::default(), &s, Vec2::ZERO).err();
        assert!(matches!(err, Some(FieldError::EmptyViewport)));
    }

    #[test]
    fn tiny_viewport_places_within_bounds() {
        let s = RecordingSurface::new(Vec2::new(60.0, 40.0));
        let f = ParticleField::new(FieldConfig::default().with_particle_count(50), &s, Vec2::ZERO)
            .unwrap();
        for p in f.particles() {
            assert!(p.position.x >= 0.0 && p.position.x < 60.0);
            assert!(p.position.y >= 0.0 && p.position.y < 40.0);
        }
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(20));
        f.step(16.0);
        f.apply(ConfigEvent::Pause, &s);
        let frozen = snapshot(&f);
        for _ in 0..10 {
            f.step(16.0);
        }
        assert_eq!(snapshot(&f), frozen);

        f.apply(ConfigEvent::Resume, &s);
        f.step(16.0);
        assert_ne!(snapshot(&f), frozen);
    }

    #[test]
    fn toggle_pause_flips() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(1));
        f.apply(ConfigEvent::TogglePause, &s);
        assert!(f.is_paused());
        f.apply(ConfigEvent::TogglePause, &s);
        assert!(!f.is_paused());
    }

    #[test]
    fn step_wraps_at_edges() {
        let (mut f, _) = field(FieldConfig::default().with_particle_count(2));
        f.particles_mut()[0].position = Vec3::new(-0.5, 10.0, 0.0);
        f.particles_mut()[1].position = Vec3::new(10.0, 700.0, 0.0);
        for p in f.particles_mut() {
            p.velocity = Vec3::ZERO;
            p.wave_amplitude = 0.0;
        }
        f.step(16.0);
        assert_eq!(f.particles()[0].position.x, 800.0);
        assert_eq!(f.particles()[1].position.y, 0.0);
    }

    #[test]
    fn speed_scales_delta() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(1));
        let mut p = f.particles()[0]
            .clone()
            .with_velocity(Vec3::new(1.0, 0.0, 0.0))
            .without_wave();
        p.position = Vec3::new(100.0, 100.0, 0.0);
        f.particles_mut()[0] = p;
        f.apply(ConfigEvent::Speed(2.0), &s);
        f.step(10.0);
        // 1.0 * (10 * 2) * 0.05
        assert!((f.particles()[0].position.x - 101.0).abs() < 1e-4);
    }

    #[test]
    fn scheme_change_recolors_in_place() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(30));
        let before: Vec<(Vec3, Vec3)> = f.particles().iter().map(|p| (p.position, p.velocity)).collect();
        f.apply(ConfigEvent::ColorScheme(ColorScheme::Galaxy), &s);
        assert_eq!(f.len(), 30);
        assert_eq!(f.color_scheme(), ColorScheme::Galaxy);
        let after: Vec<(Vec3, Vec3)> = f.particles().iter().map(|p| (p.position, p.velocity)).collect();
        assert_eq!(before, after);
        assert!(f.particles().iter().all(|p| p.scheme == ColorScheme::Galaxy));
        let galaxy = [0x9d4edd, 0xc77dff, 0xe0aaff, 0x7b2cbf, 0x5a189a].map(Color::hex);
        assert!(f.particles().iter().all(|p| galaxy.contains(&p.color)));
    }

    #[test]
    fn pause_clears_visible_sparkles() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(3));
        f.particles_mut()[1].sparkle_armed = true;
        f.apply(ConfigEvent::Pause, &s);
        assert!(f.particles().iter().all(|p| !p.sparkle_armed));

        f.apply(ConfigEvent::Resume, &s);
        f.particles_mut()[0].sparkle_armed = true;
        f.apply(ConfigEvent::TogglePause, &s);
        assert!(f.is_paused());
        assert!(!f.particles()[0].sparkle_armed);
    }

    #[test]
    fn size_change_applies_without_rebuild() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(5));
        let positions: Vec<Vec3> = f.particles().iter().map(|p| p.position).collect();
        f.apply(ConfigEvent::ParticleSize(7.5), &s);
        assert!(f.particles().iter().all(|p| p.size == 7.5));
        let after: Vec<Vec3> = f.particles().iter().map(|p| p.position).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn count_and_reset_rebuild() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(5));
        f.apply(ConfigEvent::ParticleCount(12), &s);
        assert_eq!(f.len(), 12);
        let before: Vec<Vec3> = f.particles().iter().map(|p| p.position).collect();
        f.apply(ConfigEvent::Reset, &s);
        assert_eq!(f.len(), 12);
        let after: Vec<Vec3> = f.particles().iter().map(|p| p.position).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn trail_length_applies_to_rebuilt_particles() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(4));
        f.apply(ConfigEvent::TrailLength(3), &s);
        assert!(f.particles().iter().all(|p| p.trail.capacity() == 3));
    }

    #[test]
    fn viewport_resize_remeasures_and_rebuilds() {
        let (mut f, mut s) = field(FieldConfig::default().with_particle_count(40));
        s.set_size(Vec2::new(300.0, 200.0));
        f.apply(ConfigEvent::ViewportResize { width: 1920.0, height: 1080.0 }, &s);
        assert_eq!(f.viewport().size(), Vec2::new(300.0, 200.0));
        assert_eq!(f.len(), 40);
        for p in f.particles() {
            assert!(p.position.x >= 50.0 && p.position.x < 250.0);
            assert!(p.position.y >= 50.0 && p.position.y < 150.0);
        }

        s.set_size(Vec2::ZERO);
        f.apply(ConfigEvent::ViewportResize { width: 1920.0, height: 1080.0 }, &s);
        assert_eq!(f.viewport().size(), Vec2::new(1920.0, 1080.0));
    }

    #[test]
    fn connections_scenario() {
        let (mut f, mut s) = field(
            FieldConfig::default()
                .with_particle_count(3)
                .with_connection_distance(100.0),
        );
        let spots = [Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(200.0, 0.0)];
        for (p, spot) in f.particles_mut().iter_mut().zip(spots) {
            p.position = spot.extend(0.0);
        }

        let found = f.connections();
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].a, found[0].b), (0, 1));

        f.render_connections(&mut s);
        let lines: Vec<&DrawCommand> = s.lines().collect();
        assert_eq!(lines.len(), 1);
        match lines[0] {
            DrawCommand::Line { from, to, .. } => {
                assert_eq!(*from, Vec2::new(0.0, 0.0));
                assert_eq!(*to, Vec2::new(50.0, 0.0));
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn connection_distance_change_takes_effect() {
        let (mut f, s) = field(FieldConfig::default().with_particle_count(2));
        f.particles_mut()[0].position = Vec3::new(100.0, 100.0, 0.0);
        f.particles_mut()[1].position = Vec3::new(100.0, 250.0, 0.0);
        assert!(f.connections().is_empty());
        f.apply(ConfigEvent::ConnectionDistance(200.0), &s);
        assert_eq!(f.connections().len(), 1);
    }

    #[test]
    fn frame_fades_then_draws_particles_then_lines() {
        let (mut f, mut s) = field(FieldConfig::default().with_particle_count(2).with_sparkles(false));
        f.particles_mut()[0].position = Vec3::new(100.0, 100.0, 0.0);
        f.particles_mut()[1].position = Vec3::new(110.0, 100.0, 0.0);
        f.render_frame(&mut s);

        let cmds = s.commands();
        assert!(matches!(cmds[0], DrawCommand::Rect { color, size, .. }
            if color == FADE_OVERLAY && size == Vec2::new(800.0, 600.0)));
        let first_line = cmds.iter().position(|c| matches!(c, DrawCommand::Line { .. })).unwrap();
        assert_eq!(first_line, cmds.len() - 1);
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn same_seed_same_field() {
        let (a, _) = field(FieldConfig::default().with_particle_count(10).with_seed(9));
        let (b, _) = field(FieldConfig::default().with_particle_count(10).with_seed(9));
        assert_eq!(snapshot(&a), snapshot(&b));
    }
}

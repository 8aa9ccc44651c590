//! A single field particle: motion, phase, appearance and trail.

use glam::{Vec2, Vec3};

use super::trail::Trail;
use crate::renderer::color::Color;
use crate::renderer::surface::{with_alpha, Surface};
use crate::systems::palette::ColorScheme;
use crate::systems::rng::Rng;

/// Scales integrated motion so it stays calm regardless of raw frame time.
pub const MOTION_DAMPING: f32 = 0.05;
/// Phase advance per update.
pub const PHASE_STEP: f32 = 0.02;
/// Amplitude of the wave drift added on top of linear motion.
pub const WAVE_AMPLITUDE: f32 = 0.5;
/// Sparkle timer value (scaled milliseconds) past which a flash may fire.
pub const SPARKLE_THRESHOLD: f32 = 2000.0;
/// Probability per update that an eligible particle flashes.
pub const SPARKLE_CHANCE: f32 = 0.05;

const TRAIL_OPACITY: f32 = 0.6;
const TRAIL_GLOW_SCALE: f32 = 2.0;
const GLOW_RADIUS_SCALE: f32 = 4.0;
const GLOW_OPACITY: f32 = 0.35;
const MIN_CORE_RADIUS: f32 = 2.0;
const SPARKLE_ARM_SCALE: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Particle {
    /// x/y in pixels; z is carried along but never projected.
    pub position: Vec3,
    /// Constant for the particle's lifetime.
    pub velocity: Vec3,
    pub size: f32,
    pub scheme: ColorScheme,
    pub color: Color,
    /// Phase accumulator driving the wave drift (not a lifetime).
    pub life: f32,
    pub max_life: f32,
    pub phase_step: f32,
    pub wave_amplitude: f32,
    pub trail: Trail,
    pub sparkle_timer: f32,
    /// A flash is visible until the next `advance`.
    pub sparkle_armed: bool,
}

impl Particle {
    /// Create a particle at `position` with a random velocity in [-1, 1] per
    /// axis, a random starting phase, and a color drawn from `scheme`.
    pub fn new(
        position: Vec3,
        size: f32,
        scheme: ColorScheme,
        trail_length: usize,
        rng: &mut Rng,
    ) -> Self {
        let velocity = Vec3::new(
            rng.range(-1.0, 1.0),
            rng.range(-1.0, 1.0),
            rng.range(-1.0, 1.0),
        );
        let life = rng.next_f32();
        let color = scheme.sample(rng);
        Particle {
            position,
            velocity,
            size,
            scheme,
            color,
            life,
            max_life: 1.0,
            phase_step: PHASE_STEP,
            wave_amplitude: WAVE_AMPLITUDE,
            trail: Trail::new(trail_length),
            sparkle_timer: 0.0,
            sparkle_armed: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Disable the phase step and wave drift, leaving pure linear motion.
    pub fn without_wave(mut self) -> Self {
        self.phase_step = 0.0;
        self.wave_amplitude = 0.0;
        self
    }

    pub fn xy(&self) -> Vec2 {
        self.position.truncate()
    }

    /// Advance by `dt`, already multiplied by the global speed factor.
    pub fn advance(&mut self, dt: f32) {
        self.sparkle_armed = false;

        self.trail.record(self.xy());

        self.position += self.velocity * dt * MOTION_DAMPING;

        self.life += self.phase_step;
        if self.life > self.max_life {
            self.life = 0.0;
        }

        self.position.x += (self.life * 2.0).sin() * self.wave_amplitude;
        self.position.y += (self.life * 1.5).cos() * self.wave_amplitude;

        self.sparkle_timer += dt;
    }

    /// Arm a flash if the sparkle timer has passed its threshold and the draw
    /// succeeds. Returns whether a flash was armed.
    pub fn roll_sparkle(&mut self, rng: &mut Rng) -> bool {
        if self.sparkle_timer > SPARKLE_THRESHOLD && rng.chance(SPARKLE_CHANCE) {
            self.sparkle_armed = true;
            self.sparkle_timer = 0.0;
        }
        self.sparkle_armed
    }

    /// Record the scheme and resample the color from it.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme, rng: &mut Rng) {
        self.scheme = scheme;
        self.color = scheme.sample(rng);
    }

    /// Draw trail, glow, core and (if armed) the sparkle, back to front.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for point in self.trail.iter() {
            let radius = (self.size * point.alpha).max(1.0) * TRAIL_GLOW_SCALE;
            with_alpha(surface, point.alpha * TRAIL_OPACITY, |s| {
                s.fill_radial_gradient(point.position, radius, self.color, self.color.with_alpha(0.0));
            });
        }

        let center = self.xy();
        with_alpha(surface, GLOW_OPACITY, |s| {
            s.fill_radial_gradient(
                center,
                self.size * GLOW_RADIUS_SCALE,
                self.color,
                self.color.with_alpha(0.0),
            );
        });
        with_alpha(surface, 1.0, |s| {
            s.fill_circle(center, self.size.max(MIN_CORE_RADIUS), self.color);
        });

        if self.sparkle_armed {
            let arm = self.size.max(MIN_CORE_RADIUS) * SPARKLE_ARM_SCALE;
            with_alpha(surface, 1.0, |s| {
                s.stroke_line(center - Vec2::new(arm, 0.0), center + Vec2::new(arm, 0.0), 1.0, Color::WHITE);
                s.stroke_line(center - Vec2::new(0.0, arm), center + Vec2::new(0.0, arm), 1.0, Color::WHITE);
            });
        }
    }
}

//! Proximity connections between particles.
//!
//! A connection is drawn for every unordered pair closer than the connection
//! distance, with opacity falling off linearly with distance. Small fields use
//! the direct pairwise scan; larger ones bucket positions into a uniform grid
//! whose cell size equals the connection distance, so only neighbouring cells
//! are compared. Both paths return the same pairs, in the same (i, j) order,
//! with bit-identical alphas.

use std::collections::HashMap;

use glam::Vec2;

use crate::renderer::color::Color;
use crate::renderer::surface::{with_alpha, Surface};

/// Peak opacity of a connection line (at zero distance).
pub const CONNECTION_OPACITY: f32 = 0.3;
pub const CONNECTION_WIDTH: f32 = 1.0;
/// Particle count at or above which the grid search is used.
pub const GRID_THRESHOLD: usize = 64;
/// Largest |position / distance| the grid indexes. Beyond it the neighbour
/// cell arithmetic could overflow `i64`, so the direct scan is used instead.
const MAX_CELL_COORD: f32 = 1.0e12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Lower particle index.
    pub a: usize,
    /// Higher particle index.
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
}

fn connect(points: &[Vec2], a: usize, b: usize, max_distance: f32) -> Option<Connection> {
    let distance = points[a].distance(points[b]);
    if distance < max_distance {
        Some(Connection {
            a,
            b,
            distance,
            alpha: (1.0 - distance / max_distance) * CONNECTION_OPACITY,
        })
    } else {
        None
    }
}

fn usable(max_distance: f32) -> bool {
    max_distance.is_finite() && max_distance > 0.0
}

/// Direct O(n²) scan over every pair i < j.
pub fn find_connections_brute_force(points: &[Vec2], max_distance: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if !usable(max_distance) {
        return out;
    }
    for a in 0..points.len() {
        for b in (a + 1)..points.len() {
            if let Some(c) = connect(points, a, b, max_distance) {
                out.push(c);
            }
        }
    }
    out
}

/// Grid-bucketed scan. Same result as [`find_connections_brute_force`].
pub fn find_connections_grid(points: &[Vec2], max_distance: f32) -> Vec<Connection> {
    let mut out = Vec::new();
    if !usable(max_distance) {
        return out;
    }
    let indexable = points.iter().all(|p| {
        let cell = *p / max_distance;
        cell.x.abs() < MAX_CELL_COORD && cell.y.abs() < MAX_CELL_COORD
    });
    if !indexable {
        return find_connections_brute_force(points, max_distance);
    }

    let cell_of = |p: Vec2| -> (i64, i64) {
        (
            (p.x / max_distance).floor() as i64,
            (p.y / max_distance).floor() as i64,
        )
    };

    let mut cells: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        cells.entry(cell_of(*p)).or_default().push(i);
    }

    for (a, p) in points.iter().enumerate() {
        let (cx, cy) = cell_of(*p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = cells.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &b in bucket {
                    if b <= a {
                        continue;
                    }
                    if let Some(c) = connect(points, a, b, max_distance) {
                        out.push(c);
                    }
                }
            }
        }
    }

    out.sort_unstable_by_key(|c| (c.a, c.b));
    out
}

/// Pick the search strategy by field size.
pub fn find_connections(points: &[Vec2], max_distance: f32) -> Vec<Connection> {
    if points.len() >= GRID_THRESHOLD {
        find_connections_grid(points, max_distance)
    } else {
        find_connections_brute_force(points, max_distance)
    }
}

/// Stroke every connection as a thin white line.
pub fn render_connections<S: Surface + ?Sized>(
    surface: &mut S,
    points: &[Vec2],
    connections: &[Connection],
) {
    for c in connections {
        with_alpha(surface, 1.0, |s| {
            s.stroke_line(
                points[c.a],
                points[c.b],
                CONNECTION_WIDTH,
                Color::WHITE.with_alpha(c.alpha),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::rng::Rng;

    #[test]
    fn scenario_three_in_a_row() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(200.0, 0.0)];
        let found = find_connections(&points, 100.0);
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].a, found[0].b), (0, 1));
        assert_eq!(found[0].distance, 50.0);
        assert!((found[0].alpha - 0.15).abs() < 1e-6);
    }

    #[test]
    fn exact_threshold_is_excluded() {
        let points = [Vec2::ZERO, Vec2::new(100.0, 0.0)];
        assert!(find_connections_brute_force(&points, 100.0).is_empty());
        assert!(find_connections_grid(&points, 100.0).is_empty());
    }

    #[test]
    fn coincident_particles_are_still_distinct_pairs() {
        let points = [Vec2::splat(5.0), Vec2::splat(5.0)];
        let found = find_connections_brute_force(&points, 10.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].alpha, CONNECTION_OPACITY);
        assert!(found.iter().all(|c| c.a != c.b));
    }

    #[test]
    fn degenerate_distance_draws_nothing() {
        let points = [Vec2::ZERO, Vec2::ONE];
        assert!(find_connections(&points, 0.0).is_empty());
        assert!(find_connections(&points, -5.0).is_empty());
        assert!(find_connections_grid(&points, f32::NAN).is_empty());
    }

    #[test]
    fn tiny_distance_on_a_large_field() {
        let points: Vec<Vec2> = (0..64).map(|i| Vec2::new(100.0 + i as f32, 0.0)).collect();
        assert!(find_connections(&points, 1e-18).is_empty());
        assert!(find_connections_grid(&points, 1e-18).is_empty());

        let mut stacked = points.clone();
        stacked.push(points[10]);
        let found = find_connections_grid(&stacked, 1e-18);
        assert_eq!(found, find_connections_brute_force(&stacked, 1e-18));
        assert_eq!((found[0].a, found[0].b), (10, 64));
    }

    #[test]
    fn grid_matches_brute_force() {
        let mut rng = Rng::new(1234);
        for &(n, dist) in &[(10usize, 100.0f32), (200, 80.0), (300, 35.5), (150, 400.0)] {
            let points: Vec<Vec2> = (0..n)
                .map(|_| Vec2::new(rng.range(-50.0, 900.0), rng.range(-50.0, 700.0)))
                .collect();
            let brute = find_connections_brute_force(&points, dist);
            let grid = find_connections_grid(&points, dist);
            assert_eq!(brute, grid, "mismatch for n={} dist={}", n, dist);
        }
    }

    #[test]
    fn render_draws_one_line_per_connection() {
        use crate::renderer::recording::{DrawCommand, RecordingSurface};

        let points = [Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let found = find_connections(&points, 50.0);
        let mut surface = RecordingSurface::new(Vec2::splat(100.0));
        render_connections(&mut surface, &points, &found);
        assert_eq!(surface.lines().count(), 3);
        for cmd in surface.lines() {
            if let DrawCommand::Line { width, color, .. } = cmd {
                assert_eq!(*width, CONNECTION_WIDTH);
                assert!(color.a > 0.0 && color.a <= CONNECTION_OPACITY);
            }
        }
    }
}

#![allow(dead_code)]
//! Reference implementations used to cross-check tree-accelerated results.
//!
//! Deliberately naive and tree-free: a planar even-odd ray cast for
//! containment and an all-pairs edge scan for distance. They exist only to
//! validate the accelerated engines, never as a runtime path.

use captree::{ArcMetric, geometry_arcs};
use geo::{Coord, Geometry, LineString, Point};

/// Planar distance below which a query point is considered too close to the
/// boundary for a planar-vs-spherical comparison to be meaningful.
pub const BOUNDARY_SKIP_DEG: f64 = 0.02;

/// Planar even-odd ray cast over a closed lon/lat ring.
///
/// Returns `None` when the point sits on the boundary. Only valid for the
/// small, pole-free rings used in these tests, where the planar and
/// spherical answers coincide away from the boundary.
pub fn planar_contains(ring: &LineString, pt: &Point) -> Option<bool> {
    let (px, py) = (pt.x(), pt.y());
    let mut inside = false;
    for pair in ring.0.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if segment_distance(a, b, px, py) < 1e-12 {
            return None;
        }
        // Half-open rule: each vertex belongs to exactly one of its edges.
        if (a.y > py) != (b.y > py) {
            let x_cross = a.x + (py - a.y) * (b.x - a.x) / (b.y - a.y);
            if x_cross > px {
                inside = !inside;
            }
        }
    }
    Some(inside)
}

/// Planar distance from a point to the closest segment of the ring.
pub fn planar_boundary_distance(ring: &LineString, pt: &Point) -> f64 {
    ring.0
        .windows(2)
        .map(|pair| segment_distance(pair[0], pair[1], pt.x(), pt.y()))
        .fold(f64::INFINITY, f64::min)
}

fn segment_distance(a: Coord, b: Coord, px: f64, py: f64) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - a.x).powi(2) + (py - a.y).powi(2)).sqrt();
    }
    let t = (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Brute-force minimum distance: every edge of one geometry against every
/// edge of the other, refined with the same leaf metric the tree uses.
pub fn brute_force_distance<M: ArcMetric>(g1: &Geometry, g2: &Geometry, metric: &M) -> f64 {
    let arcs1 = geometry_arcs(g1).expect("reference geometry must be indexable");
    let arcs2 = geometry_arcs(g2).expect("reference geometry must be indexable");
    let mut best = f64::INFINITY;
    for a in &arcs1 {
        for b in &arcs2 {
            best = best.min(metric.arc_distance(a, b));
        }
    }
    best
}

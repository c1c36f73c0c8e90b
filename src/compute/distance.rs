//! Branch-and-bound minimum distance between two cap trees.
//!
//! The search runs entirely in radians on the unit sphere: node pairs are
//! explored in ascending order of a cheap cap-to-cap lower bound, pairs
//! whose bound cannot beat the running best (or the caller's threshold) are
//! pruned, and leaf pairs refine the best angle and its closest point pair.
//! Only the winning pair is measured with the caller's [`ArcMetric`], so
//! spherical and ellipsoidal metrics share the same pruning logic.

use crate::error::{CapTreeError, Result};
use crate::metric::ArcMetric;
use crate::sphere;
use crate::tree::{CapNode, CapTree, NodeKind};
use crate::types::{BRANCH_FACTOR, SpherePoint};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Safety factor applied when converting the caller's threshold into an
/// angular bound, absorbing the gap between the metric's nominal radius and
/// its true local scale.
const THRESHOLD_SHRINK: f64 = 0.95;

/// Minimum distance between the geometries indexed by `a` and `b`, in the
/// metric's units.
///
/// With `threshold == 0.0` the result is exact. With a positive threshold
/// the search may stop as soon as the running best drops below it; the
/// returned value is then at or below the threshold whenever the true
/// minimum is, and never below the true minimum.
pub(crate) fn distance<M: ArcMetric + ?Sized>(
    a: &CapTree,
    b: &CapTree,
    metric: &M,
    threshold: f64,
) -> Result<f64> {
    if !(threshold >= 0.0) {
        return Err(CapTreeError::InvalidInput(format!(
            "distance threshold must be non-negative, got: {}",
            threshold
        )));
    }
    let scale = metric.radius();
    let mut search = Search {
        // Exit early only once the angular best is safely under the
        // threshold, so the final measurement cannot bounce back above it.
        exit_below: THRESHOLD_SHRINK * threshold / scale,
        // Prune a pair only when even a generously discounted conversion of
        // its bound stays beyond the threshold.
        prune_beyond: if threshold > 0.0 {
            threshold / (THRESHOLD_SHRINK * scale)
        } else {
            f64::INFINITY
        },
        best: f64::INFINITY,
        upper: f64::INFINITY,
        closest: None,
    };
    pair_distance(a.root(), b.root(), &mut search);

    match search.closest {
        Some((p1, p2)) => Ok(metric.point_distance(&p1, &p2)),
        // Every pair pruned by the threshold: over-report, never under.
        None => Ok(f64::INFINITY),
    }
}

struct Search {
    /// Angular threshold for the early exit (0 disables it).
    exit_below: f64,
    /// Angular bound beyond which a pair cannot matter to a threshold query.
    prune_beyond: f64,
    /// Best refined angle so far, radians.
    best: f64,
    /// Smallest cap-pair upper bound seen; no pair above it can hold the
    /// minimum.
    upper: f64,
    /// Closest point pair behind `best`.
    closest: Option<(SpherePoint, SpherePoint)>,
}

impl Search {
    fn done(&self) -> bool {
        self.best == 0.0 || self.best < self.exit_below
    }
}

fn lower_bound(a: &CapNode, b: &CapNode) -> f64 {
    let (ca, cb) = (a.cap(), b.cap());
    (ca.center.angular_distance(&cb.center) - ca.radius - cb.radius).max(0.0)
}

fn upper_bound(a: &CapNode, b: &CapNode) -> f64 {
    let (ca, cb) = (a.cap(), b.cap());
    ca.center.angular_distance(&cb.center) + ca.radius + cb.radius
}

fn pair_distance(n1: &CapNode, n2: &CapNode, s: &mut Search) {
    if s.done() {
        return;
    }
    let lb = lower_bound(n1, n2);
    if lb >= s.best || lb > s.upper || lb > s.prune_beyond {
        return;
    }
    let ub = upper_bound(n1, n2);
    if ub < s.upper {
        s.upper = ub;
    }

    if let (NodeKind::Leaf(e1), NodeKind::Leaf(e2)) = (n1.kind(), n2.kind()) {
        let (angle, p1, p2) = sphere::arc_min_distance(e1, e2);
        if angle < s.best {
            s.best = angle;
            s.closest = Some((p1, p2));
        }
        return;
    }

    // Expand the node with the larger cap; a leaf is never expanded.
    let expand_first = match (n1.kind(), n2.kind()) {
        (NodeKind::Internal(_), NodeKind::Leaf(_)) => true,
        (NodeKind::Leaf(_), _) => false,
        _ => n1.cap().radius >= n2.cap().radius,
    };
    let (parent, fixed) = if expand_first { (n1, n2) } else { (n2, n1) };
    let NodeKind::Internal(children) = parent.kind() else {
        return;
    };

    // Nearest-first child order tightens the best bound as early as
    // possible; the index tie-break keeps traversal deterministic.
    let mut order: SmallVec<[(f64, usize); BRANCH_FACTOR]> = children
        .iter()
        .enumerate()
        .map(|(i, child)| (lower_bound(child, fixed), i))
        .collect();
    order.sort_by(|x, y| {
        x.0.partial_cmp(&y.0)
            .unwrap_or(Ordering::Equal)
            .then(x.1.cmp(&y.1))
    });

    for (child_lb, i) in order {
        if s.done() {
            return;
        }
        if child_lb >= s.best {
            continue;
        }
        let child = &children[i];
        if expand_first {
            pair_distance(child, fixed, s);
        } else {
            pair_distance(fixed, child, s);
        }
    }
}

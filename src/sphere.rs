//! Great-circle primitives over [`SpherePoint`] and [`SphereArc`].
//!
//! These are the leaf-level operations the tree algorithms are built from:
//! point-on-arc tests, closest-approach distances, arc intersection, and the
//! crossing classification used by the stab-line containment walk. All
//! angles are radians on the unit sphere.

use crate::types::{ANGULAR_EPSILON, SphereArc, SpherePoint};

/// Whether `point` lies on `arc` (within [`ANGULAR_EPSILON`]).
///
/// A degenerate arc contains only its own point. An antipodal arc has no
/// defined interior; only its endpoints count.
pub fn point_on_arc(point: &SpherePoint, arc: &SphereArc) -> bool {
    if arc.is_degenerate() {
        return point.approx_eq(&arc.start);
    }
    let Some(normal) = arc.plane_normal() else {
        return point.approx_eq(&arc.start) || point.approx_eq(&arc.end);
    };
    if normal.dot(point).abs() > ANGULAR_EPSILON {
        return false;
    }
    // On the great circle; accept when the point splits the arc length.
    arc.start.angular_distance(point) + point.angular_distance(&arc.end)
        <= arc.length() + ANGULAR_EPSILON
}

/// Closest point of `arc` to `point`, with the angular distance to it.
///
/// When the perpendicular foot of `point` falls inside the arc the distance
/// is the perpendicular one; otherwise the nearer endpoint wins.
pub fn arc_closest_point(arc: &SphereArc, point: &SpherePoint) -> (f64, SpherePoint) {
    if arc.is_degenerate() {
        return (point.angular_distance(&arc.start), arc.start);
    }
    let Some(normal) = arc.plane_normal() else {
        return closest_endpoint(arc, point);
    };
    // Project the point onto the arc's plane; a point sitting on the plane
    // axis has no projection and the endpoints decide.
    let offset = normal.dot(point);
    let Some(foot) = point.sub(&normal.scaled(offset)).normalized() else {
        return closest_endpoint(arc, point);
    };
    if arc.start.angular_distance(&foot) + foot.angular_distance(&arc.end)
        <= arc.length() + ANGULAR_EPSILON
    {
        (point.angular_distance(&foot), foot)
    } else {
        closest_endpoint(arc, point)
    }
}

/// Angular distance from `arc` to `point`.
pub fn arc_distance_to_point(arc: &SphereArc, point: &SpherePoint) -> f64 {
    arc_closest_point(arc, point).0
}

fn closest_endpoint(arc: &SphereArc, point: &SpherePoint) -> (f64, SpherePoint) {
    let d_start = point.angular_distance(&arc.start);
    let d_end = point.angular_distance(&arc.end);
    if d_start <= d_end {
        (d_start, arc.start)
    } else {
        (d_end, arc.end)
    }
}

/// A shared point of two arcs, if any.
///
/// Arcs on the same great circle intersect where an endpoint of one lies on
/// the other; transversal pairs intersect where the two circle planes meet.
pub fn arc_intersection(a: &SphereArc, b: &SphereArc) -> Option<SpherePoint> {
    if a.is_degenerate() {
        return point_on_arc(&a.start, b).then_some(a.start);
    }
    if b.is_degenerate() {
        return point_on_arc(&b.start, a).then_some(b.start);
    }
    let (Some(normal_a), Some(normal_b)) = (a.plane_normal(), b.plane_normal()) else {
        return None;
    };
    match normal_a.cross(&normal_b).normalized() {
        // Same (or opposite) great circle: overlap shows up at an endpoint.
        None => [a.start, a.end, b.start, b.end]
            .into_iter()
            .find(|candidate| point_on_arc(candidate, a) && point_on_arc(candidate, b)),
        Some(meet) => [meet, meet.neg()]
            .into_iter()
            .find(|candidate| point_on_arc(candidate, a) && point_on_arc(candidate, b)),
    }
}

/// Minimum angular distance between two arcs, with the closest point pair.
///
/// Intersecting arcs are at distance zero. Otherwise the minimum of two
/// great-circle arcs is attained at an endpoint of one of them, so four
/// endpoint-to-arc probes cover it.
pub fn arc_min_distance(a: &SphereArc, b: &SphereArc) -> (f64, SpherePoint, SpherePoint) {
    if a.is_degenerate() {
        let (d, closest) = arc_closest_point(b, &a.start);
        return (d, a.start, closest);
    }
    if b.is_degenerate() {
        let (d, closest) = arc_closest_point(a, &b.start);
        return (d, closest, b.start);
    }
    if let Some(meet) = arc_intersection(a, b) {
        return (0.0, meet, meet);
    }

    let mut best = {
        let (d, closest) = arc_closest_point(b, &a.start);
        (d, a.start, closest)
    };
    let (d, closest) = arc_closest_point(b, &a.end);
    if d < best.0 {
        best = (d, a.end, closest);
    }
    let (d, closest) = arc_closest_point(a, &b.start);
    if d < best.0 {
        best = (d, closest, b.start);
    }
    let (d, closest) = arc_closest_point(a, &b.end);
    if d < best.0 {
        best = (d, closest, b.end);
    }
    best
}

/// How a boundary edge interacts with the stab arc of a containment query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StabCrossing {
    /// No interaction.
    Miss,
    /// The edge interior crosses the stab arc transversally. Counts one.
    Cross,
    /// The stab passes through an edge endpoint and the edge's free endpoint
    /// lies on the counted side of the stab plane. Counts one.
    VertexCounted,
    /// The stab passes through an edge endpoint with the free endpoint on
    /// the other side. The adjacent edge accounts for this event.
    VertexSkipped,
    /// The edge runs along the stab's great circle. Counts zero; the
    /// neighbors of the collinear run settle the parity.
    Collinear,
}

impl StabCrossing {
    pub(crate) fn count(self) -> u64 {
        match self {
            StabCrossing::Cross | StabCrossing::VertexCounted => 1,
            _ => 0,
        }
    }
}

/// Classify how `edge` interacts with the stab arc.
///
/// `stab_normal` is the unit normal of the stab's great-circle plane,
/// computed once per query. Vertex events are resolved by the side of the
/// stab plane the edge's free endpoint falls on: each adjacent edge of a
/// shared vertex is classified independently, so a transversal vertex pass
/// contributes exactly one crossing while a grazing (reflex) vertex
/// contributes zero or two, either way preserving parity.
pub(crate) fn stab_crossing(
    stab: &SphereArc,
    stab_normal: &SpherePoint,
    edge: &SphereArc,
) -> StabCrossing {
    // A point leaf cannot be crossed.
    if edge.is_degenerate() {
        return StabCrossing::Miss;
    }

    let side_start = stab_normal.dot(&edge.start);
    let side_end = stab_normal.dot(&edge.end);
    let start_on_plane = side_start.abs() <= ANGULAR_EPSILON;
    let end_on_plane = side_end.abs() <= ANGULAR_EPSILON;

    if start_on_plane && end_on_plane {
        return StabCrossing::Collinear;
    }
    if start_on_plane {
        if !point_on_arc(&edge.start, stab) {
            return StabCrossing::Miss;
        }
        return if side_end < 0.0 {
            StabCrossing::VertexCounted
        } else {
            StabCrossing::VertexSkipped
        };
    }
    if end_on_plane {
        if !point_on_arc(&edge.end, stab) {
            return StabCrossing::Miss;
        }
        return if side_start < 0.0 {
            StabCrossing::VertexCounted
        } else {
            StabCrossing::VertexSkipped
        };
    }
    if side_start.signum() == side_end.signum() {
        return StabCrossing::Miss;
    }

    // The edge straddles the stab plane: it meets the stab's great circle at
    // exactly one point. Check that point against both arc spans.
    let Some(edge_normal) = edge.plane_normal() else {
        // Near-antipodal edge; no defined interior to cross.
        log::warn!("skipping stab test against a near-antipodal edge");
        return StabCrossing::Miss;
    };
    let Some(meet) = stab_normal.cross(&edge_normal).normalized() else {
        return StabCrossing::Miss;
    };
    let meet = if point_on_arc(&meet, edge) {
        meet
    } else {
        meet.neg()
    };
    if point_on_arc(&meet, edge) && point_on_arc(&meet, stab) {
        StabCrossing::Cross
    } else {
        StabCrossing::Miss
    }
}

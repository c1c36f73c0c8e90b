//! Core value types for the cap tree.
//!
//! Everything here is a plain, serializable value: unit-sphere points,
//! great-circle arcs, spherical caps, and the containment verdict. The
//! algorithms that operate on them live in [`crate::sphere`] and
//! [`crate::tree`].

use geo::Point;
use serde::{Deserialize, Serialize};

/// Maximum number of children per internal tree node.
pub const BRANCH_FACTOR: usize = 4;

/// Tolerance for angular comparisons, in radians.
///
/// Near-boundary stabs (through vertices, along edges) are resolved by
/// treating angles within this tolerance as equal rather than erroring.
pub const ANGULAR_EPSILON: f64 = 1e-12;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_MEAN_RADIUS: f64 = 6_371_008.8;

/// A point on the unit sphere, stored as a unit 3-vector.
///
/// Derived from (longitude, latitude); equality is exact only for identical
/// inputs, so geometric predicates compare angles against
/// [`ANGULAR_EPSILON`] instead of testing coordinates directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    /// Unit vector for a (longitude, latitude) pair given in radians.
    pub fn from_radians(lon: f64, lat: f64) -> Self {
        let r = lat.cos();
        Self {
            x: lon.cos() * r,
            y: lon.sin() * r,
            z: lat.sin(),
        }
    }

    /// Unit vector for a (longitude, latitude) pair given in degrees.
    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self::from_radians(lon.to_radians(), lat.to_radians())
    }

    /// Unit vector for a `geo` point (lon/lat in degrees).
    pub fn from_point(point: &Point) -> Self {
        Self::from_degrees(point.x(), point.y())
    }

    /// Back to a `geo` point (lon/lat in degrees).
    pub fn to_point(self) -> Point {
        let lon = self.y.atan2(self.x);
        let lat = self.z.clamp(-1.0, 1.0).asin();
        Point::new(lon.to_degrees(), lat.to_degrees())
    }

    pub fn dot(&self, other: &SpherePoint) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &SpherePoint) -> SpherePoint {
        SpherePoint {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Rescale to unit length; `None` when the vector is too short to carry a
    /// direction (e.g. the cross product of near-identical or near-antipodal
    /// points).
    pub fn normalized(&self) -> Option<SpherePoint> {
        let n = self.norm();
        if n < ANGULAR_EPSILON {
            return None;
        }
        Some(SpherePoint {
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        })
    }

    pub fn neg(&self) -> SpherePoint {
        SpherePoint {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    pub(crate) fn add(&self, other: &SpherePoint) -> SpherePoint {
        SpherePoint {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    pub(crate) fn scaled(&self, s: f64) -> SpherePoint {
        SpherePoint {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub(crate) fn sub(&self, other: &SpherePoint) -> SpherePoint {
        SpherePoint {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Great-circle angle to `other`, in radians.
    ///
    /// Computed from both the cross and dot products, which stays accurate
    /// for nearly-identical and nearly-antipodal pairs where `acos` of the
    /// dot product loses precision.
    pub fn angular_distance(&self, other: &SpherePoint) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }

    /// Whether the two points are within [`ANGULAR_EPSILON`] of each other.
    pub fn approx_eq(&self, other: &SpherePoint) -> bool {
        self.angular_distance(other) < ANGULAR_EPSILON
    }
}

/// An ordered pair of sphere points, interpreted as the shorter great-circle
/// path between them.
///
/// A zero-length arc (both endpoints coincident) is a valid value and stands
/// in for a bare point; an antipodal arc has no shorter path and is rejected
/// where one would be traversed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereArc {
    pub start: SpherePoint,
    pub end: SpherePoint,
}

impl SphereArc {
    pub fn new(start: SpherePoint, end: SpherePoint) -> Self {
        Self { start, end }
    }

    /// Zero-length arc standing in for a single point.
    pub fn from_single_point(point: SpherePoint) -> Self {
        Self {
            start: point,
            end: point,
        }
    }

    /// Arc length in radians.
    pub fn length(&self) -> f64 {
        self.start.angular_distance(&self.end)
    }

    /// Both endpoints coincide (within tolerance).
    pub fn is_degenerate(&self) -> bool {
        self.start.approx_eq(&self.end)
    }

    /// Endpoints are (near-)opposite, leaving the shorter path undefined.
    pub fn is_antipodal(&self) -> bool {
        self.start.dot(&self.end) < 0.0 && self.start.cross(&self.end).norm() < ANGULAR_EPSILON
    }

    /// Unit normal of the arc's great-circle plane, `None` for degenerate or
    /// antipodal arcs.
    pub fn plane_normal(&self) -> Option<SpherePoint> {
        self.start.cross(&self.end).normalized()
    }
}

/// A spherical-cap bounding volume: a center direction and an angular radius
/// in radians.
///
/// Invariants: `radius >= 0`; a leaf cap covers both arc endpoints; an
/// internal cap covers the caps of all its children. Caps are not required
/// to be minimal, only small enough to prune well.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cap {
    pub center: SpherePoint,
    pub radius: f64,
}

impl Cap {
    /// Radius-zero cap around a single point.
    pub fn from_point(point: SpherePoint) -> Self {
        Self {
            center: point,
            radius: 0.0,
        }
    }

    /// Smallest practical cap around an arc: centered on the midpoint,
    /// radius reaching both endpoints.
    ///
    /// A (near-)antipodal arc has no usable midpoint; it degrades to a
    /// whole-sphere cap so that tree construction always succeeds.
    pub fn from_arc(arc: &SphereArc) -> Self {
        match arc.start.add(&arc.end).normalized() {
            Some(mid) => {
                let radius = mid
                    .angular_distance(&arc.start)
                    .max(mid.angular_distance(&arc.end));
                Self {
                    center: mid,
                    radius,
                }
            }
            None => Self {
                center: arc.start,
                radius: std::f64::consts::PI,
            },
        }
    }

    /// Whether the point lies within the cap (with epsilon slack).
    pub fn contains_point(&self, point: &SpherePoint) -> bool {
        self.center.angular_distance(point) <= self.radius + ANGULAR_EPSILON
    }

    /// Whether `other` lies entirely within the cap (with epsilon slack).
    pub fn contains_cap(&self, other: &Cap) -> bool {
        if self.radius >= std::f64::consts::PI - ANGULAR_EPSILON {
            return true;
        }
        self.center.angular_distance(&other.center) + other.radius <= self.radius + ANGULAR_EPSILON
    }

    /// Enclosing cap for a set of caps: centered on the normalized centroid
    /// of the operand centers, radius grown to cover every operand. A
    /// radius-zero operand is an ordinary point operand, not a special case.
    ///
    /// # Panics
    ///
    /// Panics when `caps` is empty; callers group at least one child per
    /// node.
    pub fn enclosing(caps: &[Cap]) -> Cap {
        assert!(!caps.is_empty(), "cannot enclose an empty set of caps");
        let mut sum = SpherePoint {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        for cap in caps {
            sum = sum.add(&cap.center);
        }
        // Centers that cancel out leave no centroid direction; fall back to
        // the first operand's center and let the radius pass absorb the rest.
        let center = sum.normalized().unwrap_or(caps[0].center);
        let radius = caps
            .iter()
            .map(|cap| center.angular_distance(&cap.center) + cap.radius)
            .fold(0.0, f64::max)
            .min(std::f64::consts::PI);
        Cap { center, radius }
    }
}

/// Verdict of a point-in-polygon containment query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// Even crossing parity: the point is outside the boundary.
    Outside,
    /// Odd crossing parity: the point is inside the boundary.
    Inside,
    /// The point lies on the boundary itself; overrides parity.
    OnBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_point_axes() {
        let origin = SpherePoint::from_degrees(0.0, 0.0);
        assert!((origin.x - 1.0).abs() < f64::EPSILON);
        assert!(origin.y.abs() < f64::EPSILON);
        assert!(origin.z.abs() < f64::EPSILON);

        let north = SpherePoint::from_degrees(0.0, 90.0);
        assert!(north.x.abs() < 1e-15);
        assert!((north.z - 1.0).abs() < f64::EPSILON);

        // Unit length holds for arbitrary coordinates.
        let p = SpherePoint::from_degrees(-74.0060, 40.7128);
        assert!((p.norm() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_angular_distance() {
        let a = SpherePoint::from_degrees(0.0, 0.0);
        let b = SpherePoint::from_degrees(90.0, 0.0);
        let n = SpherePoint::from_degrees(0.0, 90.0);

        assert!((a.angular_distance(&b) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!((a.angular_distance(&n) - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
        assert!(a.angular_distance(&a) < 1e-15);

        // Antipodal pair.
        let c = SpherePoint::from_degrees(180.0, 0.0);
        assert!((a.angular_distance(&c) - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_point_round_trip() {
        let p = Point::new(22.88333, 41.96667);
        let back = SpherePoint::from_point(&p).to_point();
        assert!((back.x() - p.x()).abs() < 1e-12);
        assert!((back.y() - p.y()).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_arc() {
        let p = SpherePoint::from_degrees(10.0, 20.0);
        let arc = SphereArc::from_single_point(p);
        assert!(arc.is_degenerate());
        assert!(arc.length() < 1e-15);

        let cap = Cap::from_arc(&arc);
        assert!(cap.radius < 1e-15);
        assert!(cap.contains_point(&p));
    }

    #[test]
    fn test_antipodal_arc_cap_covers_sphere() {
        let arc = SphereArc::new(
            SpherePoint::from_degrees(0.0, 0.0),
            SpherePoint::from_degrees(180.0, 0.0),
        );
        assert!(arc.is_antipodal());
        let cap = Cap::from_arc(&arc);
        assert!(cap.contains_point(&SpherePoint::from_degrees(77.0, -33.0)));
        assert!(cap.contains_point(&arc.end));
    }

    #[test]
    fn test_arc_cap_covers_endpoints() {
        let arc = SphereArc::new(
            SpherePoint::from_degrees(0.0, 88.0),
            SpherePoint::from_degrees(0.0, 89.0),
        );
        let cap = Cap::from_arc(&arc);
        assert!(cap.contains_point(&arc.start));
        assert!(cap.contains_point(&arc.end));
        // Roughly half the arc length.
        assert!((cap.radius - 0.5_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_enclosing_covers_operands() {
        let caps = [
            Cap::from_point(SpherePoint::from_degrees(0.0, 0.0)),
            Cap::from_point(SpherePoint::from_degrees(10.0, 0.0)),
            Cap {
                center: SpherePoint::from_degrees(5.0, 5.0),
                radius: 0.01,
            },
        ];
        let merged = Cap::enclosing(&caps);
        for cap in &caps {
            assert!(merged.contains_cap(cap));
        }
    }

    #[test]
    fn test_enclosing_single_operand() {
        let cap = Cap {
            center: SpherePoint::from_degrees(5.0, 5.0),
            radius: 0.25,
        };
        let merged = Cap::enclosing(&[cap]);
        assert!(merged.contains_cap(&cap));
        assert!((merged.radius - cap.radius).abs() < 1e-12);
    }

    #[test]
    fn test_containment_serde_round_trip() {
        let verdict = Containment::OnBoundary;
        let json = serde_json::to_string(&verdict).unwrap();
        assert_eq!(json, "\"on_boundary\"");
        let back: Containment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, verdict);
    }
}

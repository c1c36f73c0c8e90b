//! Guaranteed-exterior reference points for containment stabs.
//!
//! The containment engine needs a point known to lie strictly outside the
//! queried boundary. This generator steps outside the geometry's bounding
//! rectangle; when a particular query point still produces a degenerate
//! stab, the caller picks another candidate direction and retries.

use crate::error::{CapTreeError, Result};
use geo::{BoundingRect, Geometry, Point};

/// Margin outside the bounding rectangle, as a fraction of its larger span.
const MARGIN_FRACTION: f64 = 0.2;

/// Smallest margin in degrees, for point-like geometries.
const MIN_MARGIN_DEG: f64 = 0.1;

/// A point strictly outside `geometry`'s bounding rectangle.
///
/// Candidates are tried west, east, north, and south of the rectangle; the
/// first one with valid lon/lat wins, so the result is deterministic. Fails
/// with `InvalidInput` when the geometry is empty or its bounds leave no
/// room on any side.
///
/// ```rust
/// use captree::exterior_point;
/// use geo::{Geometry, line_string};
///
/// let ring = line_string![
///     (x: -1.0, y: -1.0), (x: 1.0, y: -1.0), (x: 1.0, y: 1.0),
///     (x: -1.0, y: 1.0), (x: -1.0, y: -1.0),
/// ];
/// let outside = exterior_point(&Geometry::LineString(ring))?;
/// assert!(outside.x() < -1.0);
/// # Ok::<(), captree::CapTreeError>(())
/// ```
pub fn exterior_point(geometry: &Geometry) -> Result<Point> {
    let rect = geometry.bounding_rect().ok_or_else(|| {
        CapTreeError::InvalidInput("geometry has no bounding rectangle".to_string())
    })?;
    let margin = (rect.width().max(rect.height()) * MARGIN_FRACTION).max(MIN_MARGIN_DEG);
    let mid_lon = (rect.min().x + rect.max().x) / 2.0;
    let mid_lat = (rect.min().y + rect.max().y) / 2.0;

    let candidates = [
        Point::new(rect.min().x - margin, mid_lat),
        Point::new(rect.max().x + margin, mid_lat),
        Point::new(mid_lon, rect.max().y + margin),
        Point::new(mid_lon, rect.min().y - margin),
    ];
    candidates
        .into_iter()
        .find(|p| (-180.0..=180.0).contains(&p.x()) && (-90.0..=90.0).contains(&p.y()))
        .ok_or_else(|| {
            CapTreeError::InvalidInput(
                "bounding rectangle leaves no room for an exterior point".to_string(),
            )
        })
}

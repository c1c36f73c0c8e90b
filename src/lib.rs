//! Spherical cap-tree index for fast geodetic containment and distance
//! queries.
//!
//! A [`CapTree`] is a k-ary bounding-volume hierarchy over the great-circle
//! edges of a lon/lat geometry. Point-in-polygon tests and minimum-distance
//! searches descend the tree and prune whole subtrees through their
//! bounding caps, running near `O(log n)` on boundaries where the naive
//! scan is `O(n)` or `O(n * m)`.
//!
//! ```rust
//! use captree::{CapTree, Containment, SphereMetric};
//! use geo::{Geometry, Point, line_string};
//!
//! let ring = line_string![
//!     (x: -1.0, y: -1.0), (x: 1.0, y: -1.0), (x: 1.0, y: 1.0),
//!     (x: -1.0, y: 1.0), (x: -1.0, y: -1.0),
//! ];
//! let tree = CapTree::from_ring(&ring)?;
//!
//! let verdict = tree.contains(&Point::new(0.0, 0.0), &Point::new(-2.0, 0.0))?;
//! assert_eq!(verdict, Containment::Inside);
//!
//! let other = CapTree::from_geometry(&Geometry::Point(Point::new(5.0, 0.0)))?;
//! let meters = tree.distance(&other, &SphereMetric::default(), 0.0)?;
//! assert!(meters > 400_000.0);
//! # Ok::<(), captree::CapTreeError>(())
//! ```

pub mod assemble;
mod compute;
pub mod error;
pub mod exterior;
pub mod metric;
pub mod sphere;
pub mod tree;
pub mod types;

pub use assemble::geometry_arcs;
pub use error::{CapTreeError, Result};
pub use exterior::exterior_point;
pub use metric::{ArcMetric, SphereMetric, SpheroidMetric};
pub use tree::CapTree;

pub use types::{
    ANGULAR_EPSILON, BRANCH_FACTOR, Cap, Containment, EARTH_MEAN_RADIUS, SphereArc, SpherePoint,
};

pub use geo::{Geometry, LineString, Point, Polygon};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CapTree, CapTreeError, Containment, Result};

    pub use crate::{ArcMetric, SphereMetric, SpheroidMetric};

    pub use crate::{exterior_point, geometry_arcs};

    pub use geo::{Geometry, LineString, Point, Polygon};
}

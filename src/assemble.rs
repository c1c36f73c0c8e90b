//! Walking `geo` geometries into cap trees.
//!
//! The driver turns a geometry's coordinate sequences into arcs exactly
//! once: one boundary per line or ring, point geometries as zero-length
//! arcs, collections flattened recursively. Sub-boundary trees are merged
//! under internal nodes so a whole geometry is always one tree.

use crate::error::{CapTreeError, Result};
use crate::tree::{CapNode, CapTree, group_nodes};
use crate::types::{SphereArc, SpherePoint};
use geo::{Coord, Geometry, LineString, Point, Polygon};

impl CapTree {
    /// Build a tree over one ring or line of lon/lat coordinates.
    ///
    /// A one-point sequence yields a single zero-length arc; an empty
    /// sequence is `InvalidInput`.
    pub fn from_ring(ring: &LineString) -> Result<Self> {
        CapTree::build(&line_arcs(ring)?)
    }

    /// Build one tree covering an arbitrary geometry.
    ///
    /// Every boundary (each line, each polygon ring) becomes its own
    /// subtree; the subtrees are grouped under one root. A point geometry
    /// degenerates to a single zero-length leaf, and a multipoint becomes
    /// one tree over all of its points.
    pub fn from_geometry(geometry: &Geometry) -> Result<Self> {
        let mut boundaries = Vec::new();
        collect_boundaries(geometry, &mut boundaries)?;
        if boundaries.is_empty() {
            return Err(CapTreeError::InvalidInput(
                "cannot build a cap tree from an empty geometry".to_string(),
            ));
        }
        let mut edges = 0;
        let mut subtrees = Vec::with_capacity(boundaries.len());
        for arcs in &boundaries {
            edges += arcs.len();
            let leaves: Vec<CapNode> = arcs.iter().copied().map(CapNode::leaf).collect();
            subtrees.push(group_nodes(leaves));
        }
        let root = match subtrees.len() {
            1 => subtrees.remove(0),
            _ => group_nodes(subtrees),
        };
        Ok(CapTree::from_parts(root, edges))
    }
}

/// Ordered arcs of every boundary of `geometry`, flattened.
///
/// This is the same edge extraction the tree builder uses; reference
/// (unaccelerated) computations can scan it linearly.
pub fn geometry_arcs(geometry: &Geometry) -> Result<Vec<SphereArc>> {
    let mut boundaries = Vec::new();
    collect_boundaries(geometry, &mut boundaries)?;
    Ok(boundaries.into_iter().flatten().collect())
}

fn collect_boundaries(geometry: &Geometry, out: &mut Vec<Vec<SphereArc>>) -> Result<()> {
    match geometry {
        Geometry::Point(point) => {
            out.push(vec![SphereArc::from_single_point(to_sphere_point(
                &point.0,
            )?)]);
        }
        Geometry::Line(line) => {
            out.push(vec![SphereArc::new(
                to_sphere_point(&line.start)?,
                to_sphere_point(&line.end)?,
            )]);
        }
        Geometry::LineString(line) => out.push(line_arcs(line)?),
        Geometry::Polygon(polygon) => collect_polygon(polygon, out)?,
        Geometry::MultiPoint(points) => {
            if points.0.is_empty() {
                return Err(CapTreeError::InvalidInput(
                    "multipoint geometry has no points".to_string(),
                ));
            }
            let arcs = points
                .0
                .iter()
                .map(|p: &Point| Ok(SphereArc::from_single_point(to_sphere_point(&p.0)?)))
                .collect::<Result<Vec<_>>>()?;
            out.push(arcs);
        }
        Geometry::MultiLineString(lines) => {
            for line in &lines.0 {
                out.push(line_arcs(line)?);
            }
        }
        Geometry::MultiPolygon(polygons) => {
            for polygon in &polygons.0 {
                collect_polygon(polygon, out)?;
            }
        }
        Geometry::GeometryCollection(collection) => {
            for inner in &collection.0 {
                collect_boundaries(inner, out)?;
            }
        }
        Geometry::Rect(rect) => collect_polygon(&rect.to_polygon(), out)?,
        Geometry::Triangle(triangle) => collect_polygon(&triangle.to_polygon(), out)?,
    }
    Ok(())
}

fn collect_polygon(polygon: &Polygon, out: &mut Vec<Vec<SphereArc>>) -> Result<()> {
    out.push(line_arcs(polygon.exterior())?);
    for interior in polygon.interiors() {
        out.push(line_arcs(interior)?);
    }
    Ok(())
}

fn line_arcs(line: &LineString) -> Result<Vec<SphereArc>> {
    let coords = &line.0;
    match coords.len() {
        0 => Err(CapTreeError::InvalidInput(
            "coordinate sequence is empty".to_string(),
        )),
        1 => Ok(vec![SphereArc::from_single_point(to_sphere_point(
            &coords[0],
        )?)]),
        _ => coords
            .windows(2)
            .map(|pair| {
                Ok(SphereArc::new(
                    to_sphere_point(&pair[0])?,
                    to_sphere_point(&pair[1])?,
                ))
            })
            .collect(),
    }
}

fn to_sphere_point(coord: &Coord) -> Result<SpherePoint> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        log::warn!("rejecting coordinate with non-finite components");
        return Err(CapTreeError::InvalidInput(format!(
            "coordinates must be finite, got: ({}, {})",
            coord.x, coord.y
        )));
    }
    Ok(SpherePoint::from_degrees(coord.x, coord.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{GeometryCollection, MultiPoint, line_string, point, polygon};

    #[test]
    fn test_point_geometry_is_single_leaf() {
        let tree = CapTree::from_geometry(&Geometry::Point(point! { x: 0.1, y: 0.1 })).unwrap();
        assert_eq!(tree.edge_count(), 1);
        assert!(tree.bounding_cap().radius < 1e-12);
    }

    #[test]
    fn test_line_string_edge_count() {
        let line = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 0.0)];
        let tree = CapTree::from_geometry(&Geometry::LineString(line)).unwrap();
        assert_eq!(tree.edge_count(), 2);
    }

    #[test]
    fn test_polygon_with_hole_counts_all_rings() {
        let poly = polygon![
            exterior: [
                (x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0),
                (x: 0.0, y: 4.0), (x: 0.0, y: 0.0),
            ],
            interiors: [[
                (x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 2.0),
                (x: 1.0, y: 2.0), (x: 1.0, y: 1.0),
            ]],
        ];
        let tree = CapTree::from_geometry(&Geometry::Polygon(poly)).unwrap();
        // 4 exterior edges + 4 interior edges.
        assert_eq!(tree.edge_count(), 8);
    }

    #[test]
    fn test_multipoint_is_one_tree_of_point_leaves() {
        let points = MultiPoint::from(vec![
            point! { x: -10.0, y: 40.0 },
            point! { x: 10.0, y: 40.0 },
            point! { x: 30.0, y: 40.0 },
        ]);
        let tree = CapTree::from_geometry(&Geometry::MultiPoint(points)).unwrap();
        assert_eq!(tree.edge_count(), 3);
    }

    #[test]
    fn test_collection_flattens() {
        let collection = Geometry::GeometryCollection(GeometryCollection::from(vec![
            Geometry::Point(point! { x: 0.0, y: 0.0 }),
            Geometry::LineString(line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 1.0)]),
        ]));
        let tree = CapTree::from_geometry(&collection).unwrap();
        assert_eq!(tree.edge_count(), 2);
    }

    #[test]
    fn test_empty_geometry_fails() {
        let empty = Geometry::GeometryCollection(GeometryCollection::default());
        assert!(matches!(
            CapTree::from_geometry(&empty),
            Err(CapTreeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_finite_coordinates_fail() {
        let line = line_string![(x: 0.0, y: 0.0), (x: f64::NAN, y: 1.0)];
        assert!(matches!(
            CapTree::from_ring(&line),
            Err(CapTreeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_geometry_arcs_matches_tree_edges() {
        let poly = polygon![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0),
        ];
        let geometry = Geometry::Polygon(poly);
        let arcs = geometry_arcs(&geometry).unwrap();
        let tree = CapTree::from_geometry(&geometry).unwrap();
        assert_eq!(arcs.len(), tree.edge_count());
    }
}

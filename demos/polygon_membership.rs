//! Polygon Membership Example
//!
//! Builds a cap tree over a polygon ring and classifies a handful of query
//! points against it, including boundary grazes.

use captree::{CapTree, Containment, exterior_point};
use geo::{Geometry, Point, line_string};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== captree - Polygon Membership ===\n");

    // A ring with a reflex vertex at the origin.
    let ring = line_string![
        (x: -1.0, y: -1.0), (x: 0.0, y: -1.0), (x: 1.0, y: -1.0),
        (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0),
        (x: -1.0, y: 1.0), (x: -1.0, y: 0.0), (x: -1.0, y: -1.0),
    ];
    let tree = CapTree::from_ring(&ring)?;
    println!(
        "✓ Built tree: {} edges, {} nodes, depth {}\n",
        tree.edge_count(),
        tree.node_count(),
        tree.depth()
    );

    let outside = exterior_point(&Geometry::LineString(ring))?;
    println!(
        "Exterior reference point: ({:.2}, {:.2})\n",
        outside.x(),
        outside.y()
    );

    let queries = [
        (0.8, 0.0, "inside the eastern lobe"),
        (0.0, 0.5, "in the notch above the reflex vertex"),
        (2.0, 0.0, "east of the ring"),
        (1.0, 0.5, "exactly on an edge"),
        (0.0, 0.0, "exactly on the reflex vertex"),
    ];

    for (lon, lat, label) in queries {
        let verdict = tree.contains(&Point::new(lon, lat), &outside)?;
        let shown = match verdict {
            Containment::Inside => "INSIDE",
            Containment::Outside => "OUTSIDE",
            Containment::OnBoundary => "ON BOUNDARY",
        };
        println!("   ({:>4}, {:>4})  {:<12} - {}", lon, lat, shown, label);
    }

    Ok(())
}

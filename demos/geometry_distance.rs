//! Geometry Distance Example
//!
//! Measures tree-accelerated minimum distances between geometries, first
//! exactly and then with an early-exit threshold.

use captree::{CapTree, SphereMetric, SpheroidMetric};
use geo::{Geometry, LineString, MultiPoint, Point};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    println!("=== captree - Geometry Distance ===\n");

    // A coastal survey line and a cluster of offshore stations.
    let coast = Geometry::LineString(LineString::from(vec![
        (-70.62, 43.10),
        (-70.55, 43.18),
        (-70.45, 43.25),
        (-70.32, 43.36),
        (-70.20, 43.48),
    ]));
    let stations = Geometry::MultiPoint(MultiPoint::from(vec![
        Point::new(-69.83, 43.44),
        Point::new(-69.95, 43.30),
        Point::new(-70.05, 43.55),
    ]));

    let coast_tree = CapTree::from_geometry(&coast)?;
    let station_tree = CapTree::from_geometry(&stations)?;
    println!(
        "✓ Indexed {} coast edges and {} stations\n",
        coast_tree.edge_count(),
        station_tree.edge_count()
    );

    let spherical = coast_tree.distance(&station_tree, &SphereMetric::default(), 0.0)?;
    let ellipsoidal = coast_tree.distance(&station_tree, &SpheroidMetric, 0.0)?;
    println!("Exact minimum distance:");
    println!("   spherical   {:>10.1} m", spherical);
    println!("   ellipsoidal {:>10.1} m\n", ellipsoidal);

    // "Within 50 km?" only needs the search to get below the threshold.
    let threshold = 50_000.0;
    let bounded = coast_tree.distance(&station_tree, &SpheroidMetric, threshold)?;
    if bounded <= threshold {
        println!("Stations are within {:.0} km of the coast line.", threshold / 1000.0);
    } else {
        println!("Stations are farther than {:.0} km away.", threshold / 1000.0);
    }

    Ok(())
}

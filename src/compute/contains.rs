//! Stab-line containment over a cap tree.
//!
//! The query point is connected to a known-exterior point by a great-circle
//! "stab" arc; the parity of boundary crossings along that arc decides
//! inside versus outside. The tree prunes every subtree whose cap the stab
//! cannot reach.

use crate::error::{CapTreeError, Result};
use crate::sphere;
use crate::tree::{CapNode, CapTree, NodeKind};
use crate::types::{ANGULAR_EPSILON, Containment, SphereArc, SpherePoint};

/// Classify `query` against the boundary indexed by `tree`.
///
/// `exterior` must lie strictly outside that boundary. Odd crossing parity
/// means inside, even means outside; a query point found on the boundary
/// itself short-circuits the walk and overrides parity.
pub(crate) fn contains(
    tree: &CapTree,
    query: &SpherePoint,
    exterior: &SpherePoint,
) -> Result<Containment> {
    let stab = SphereArc::new(*query, *exterior);
    if stab.is_degenerate() {
        return Err(CapTreeError::DegenerateStab(
            "query and exterior point coincide".to_string(),
        ));
    }
    if stab.is_antipodal() {
        return Err(CapTreeError::DegenerateStab(
            "query and exterior point are antipodal".to_string(),
        ));
    }
    let Some(stab_normal) = stab.plane_normal() else {
        return Err(CapTreeError::DegenerateStab(
            "stab arc has no defined great-circle plane".to_string(),
        ));
    };

    let mut crossings = 0u64;
    if stab_node(tree.root(), &stab, &stab_normal, query, &mut crossings) {
        return Ok(Containment::OnBoundary);
    }
    log::trace!("stab walk finished with {} crossings", crossings);
    Ok(if crossings % 2 == 1 {
        Containment::Inside
    } else {
        Containment::Outside
    })
}

/// Walk one node; returns `true` as soon as the query point is found on the
/// boundary.
fn stab_node(
    node: &CapNode,
    stab: &SphereArc,
    stab_normal: &SpherePoint,
    query: &SpherePoint,
    crossings: &mut u64,
) -> bool {
    // Nothing inside the cap can touch a stab that stays clear of it.
    let cap = node.cap();
    if sphere::arc_distance_to_point(stab, &cap.center) > cap.radius + ANGULAR_EPSILON {
        return false;
    }
    match node.kind() {
        NodeKind::Leaf(edge) => {
            if sphere::point_on_arc(query, edge) {
                return true;
            }
            *crossings += sphere::stab_crossing(stab, stab_normal, edge).count();
            false
        }
        NodeKind::Internal(children) => children
            .iter()
            .any(|child| stab_node(child, stab, stab_normal, query, crossings)),
    }
}

//! The cap tree: a k-ary bounding-volume hierarchy over great-circle arcs.
//!
//! Construction groups an ordered edge sequence bottom-up into nodes of at
//! most [`BRANCH_FACTOR`] children, each node carrying the spherical cap
//! that encloses its subtree. Queries (containment, distance) never revisit
//! raw coordinates except at leaves.

use crate::compute;
use crate::error::{CapTreeError, Result};
use crate::metric::ArcMetric;
use crate::types::{BRANCH_FACTOR, Cap, Containment, SphereArc, SpherePoint};
use geo::Point;
use smallvec::SmallVec;

/// Child list of an internal node. Nodes own their children exclusively; a
/// tree is released by dropping it.
pub(crate) type Children = SmallVec<[Box<CapNode>; BRANCH_FACTOR]>;

#[derive(Debug)]
pub(crate) enum NodeKind {
    /// One boundary arc (possibly zero-length, standing in for a point).
    Leaf(SphereArc),
    /// Up to [`BRANCH_FACTOR`] child nodes, all inside this node's cap.
    Internal(Children),
}

/// One node of the hierarchy: the bounding cap plus either an arc or child
/// nodes. No node has zero children.
#[derive(Debug)]
pub(crate) struct CapNode {
    cap: Cap,
    kind: NodeKind,
}

impl CapNode {
    pub(crate) fn leaf(arc: SphereArc) -> Self {
        Self {
            cap: Cap::from_arc(&arc),
            kind: NodeKind::Leaf(arc),
        }
    }

    pub(crate) fn internal(children: Children) -> Self {
        let caps: SmallVec<[Cap; BRANCH_FACTOR]> =
            children.iter().map(|child| child.cap).collect();
        Self {
            cap: Cap::enclosing(&caps),
            kind: NodeKind::Internal(children),
        }
    }

    pub(crate) fn cap(&self) -> &Cap {
        &self.cap
    }

    pub(crate) fn kind(&self) -> &NodeKind {
        &self.kind
    }

    fn count_nodes(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => {
                1 + children.iter().map(|c| c.count_nodes()).sum::<usize>()
            }
        }
    }

    fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 1,
            NodeKind::Internal(children) => {
                1 + children.iter().map(|c| c.depth()).max().unwrap_or(0)
            }
        }
    }
}

/// Group a non-empty node list bottom-up until a single root remains.
///
/// Consecutive runs of [`BRANCH_FACTOR`] nodes become one internal node per
/// pass; ordering is preserved, so identical input produces an identical
/// tree.
pub(crate) fn group_nodes(mut nodes: Vec<CapNode>) -> CapNode {
    debug_assert!(!nodes.is_empty());
    loop {
        let mut grouped = Vec::with_capacity(nodes.len().div_ceil(BRANCH_FACTOR));
        let mut batch = Children::new();
        for node in nodes {
            batch.push(Box::new(node));
            if batch.len() == BRANCH_FACTOR {
                grouped.push(CapNode::internal(std::mem::take(&mut batch)));
            }
        }
        if !batch.is_empty() {
            grouped.push(CapNode::internal(batch));
        }
        if grouped.len() == 1 {
            return grouped.remove(0);
        }
        nodes = grouped;
    }
}

/// A bounding-volume hierarchy over the great-circle edges of one geometry.
///
/// Built once from a finalized coordinate sequence and read-only afterwards:
/// every query takes `&self`, so independent queries against the same tree
/// may run concurrently without synchronization. Dropping the tree releases
/// all nodes.
///
/// ```rust
/// use captree::CapTree;
/// use geo::line_string;
///
/// let ring = line_string![
///     (x: -1.0, y: -1.0), (x: 1.0, y: -1.0), (x: 1.0, y: 1.0),
///     (x: -1.0, y: 1.0), (x: -1.0, y: -1.0),
/// ];
/// let tree = CapTree::from_ring(&ring)?;
/// assert_eq!(tree.edge_count(), 4);
/// # Ok::<(), captree::CapTreeError>(())
/// ```
#[derive(Debug)]
pub struct CapTree {
    root: CapNode,
    edges: usize,
}

impl CapTree {
    /// Build a tree over the ordered arcs of a single ring or line.
    ///
    /// A single zero-length arc (a repeated point) is a valid input; an
    /// empty sequence is `InvalidInput`.
    pub fn build(arcs: &[SphereArc]) -> Result<Self> {
        if arcs.is_empty() {
            return Err(CapTreeError::InvalidInput(
                "cannot build a cap tree from an empty edge sequence".to_string(),
            ));
        }
        let leaves: Vec<CapNode> = arcs.iter().copied().map(CapNode::leaf).collect();
        Ok(Self {
            root: group_nodes(leaves),
            edges: arcs.len(),
        })
    }

    pub(crate) fn from_parts(root: CapNode, edges: usize) -> Self {
        Self { root, edges }
    }

    pub(crate) fn root(&self) -> &CapNode {
        &self.root
    }

    /// Number of boundary arcs indexed by the tree.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Total node count, leaves included.
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    /// Depth of the deepest leaf, root included.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Number of children directly under the root.
    pub fn root_children(&self) -> usize {
        match self.root.kind() {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal(children) => children.len(),
        }
    }

    /// Bounding cap of the whole tree.
    pub fn bounding_cap(&self) -> Cap {
        *self.root.cap()
    }

    /// Point-in-polygon verdict for `query`, counting crossings of the stab
    /// arc from `query` to `exterior`.
    ///
    /// `exterior` must lie strictly outside the boundary this tree indexes
    /// (see [`crate::exterior::exterior_point`]). Fails with
    /// `DegenerateStab` when the stab arc is zero-length or antipodal; the
    /// caller retries with a different exterior point.
    ///
    /// ```rust
    /// use captree::{CapTree, Containment};
    /// use geo::{Point, line_string};
    ///
    /// let ring = line_string![
    ///     (x: -1.0, y: -1.0), (x: 1.0, y: -1.0), (x: 1.0, y: 1.0),
    ///     (x: -1.0, y: 1.0), (x: -1.0, y: -1.0),
    /// ];
    /// let tree = CapTree::from_ring(&ring)?;
    /// let verdict = tree.contains(&Point::new(0.0, 0.0), &Point::new(-2.0, 0.0))?;
    /// assert_eq!(verdict, Containment::Inside);
    /// # Ok::<(), captree::CapTreeError>(())
    /// ```
    pub fn contains(&self, query: &Point, exterior: &Point) -> Result<Containment> {
        self.contains_sphere(
            &SpherePoint::from_point(query),
            &SpherePoint::from_point(exterior),
        )
    }

    /// [`CapTree::contains`] over already-converted sphere points.
    pub fn contains_sphere(
        &self,
        query: &SpherePoint,
        exterior: &SpherePoint,
    ) -> Result<Containment> {
        compute::contains::contains(self, query, exterior)
    }

    /// Minimum distance to another tree, in the metric's units.
    ///
    /// Branch-and-bound over node pairs with cap-to-cap lower bounds; leaf
    /// pairs refine the closest point pair, which `metric` measures. Once
    /// the running best drops safely below `threshold` the search may
    /// return early: the result is then guaranteed to be at or below
    /// `threshold` whenever the true minimum is, and never below the true
    /// minimum. With `threshold == 0.0` the result is the exact minimum.
    /// Identical inputs return bit-identical results.
    pub fn distance<M: ArcMetric + ?Sized>(
        &self,
        other: &CapTree,
        metric: &M,
        threshold: f64,
    ) -> Result<f64> {
        compute::distance::distance(self, other, metric, threshold)
    }
}

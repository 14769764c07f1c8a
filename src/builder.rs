// Points go in one at a time, in input order. Leaves at the depth cap never
// split; every further point lands in their bucket.

use smallvec::smallvec;
use tracing::{debug, trace, warn};

use crate::config::{BoundsPolicy, BuildConfig};
use crate::error::{BuildError, OutOfBoundsPoint};
use crate::geom::{Point, Rect};
use crate::node::{Item, NodeKind, QuadNode};

#[derive(Debug, Clone, Default)]
pub struct QuadtreeBuilder {
    config: BuildConfig,
}

impl QuadtreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuildConfig) -> Self {
        QuadtreeBuilder { config }
    }

    pub fn max_depth(mut self, max_depth: u32) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.config.bounds_policy = policy;
        self
    }

    pub fn dedup(mut self, dedup: bool) -> Self {
        self.config.dedup = dedup;
        self
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// The extent is closed on all edges. Only [`BoundsPolicy::Strict`] turns
    /// an outside point into an error.
    pub fn build(&self, points: &[Point], extent: Rect) -> Result<Quadtree, BuildError> {
        self.config.validate()?;
        if extent.is_degenerate() {
            return Err(BuildError::DegenerateExtent(extent));
        }

        let mut root = QuadNode::new(extent);
        let mut inserter = Inserter {
            max_depth: self.config.max_depth,
            dedup: self.config.dedup,
            node_count: 1,
        };
        let mut len = 0;
        let mut duplicates = 0;
        let mut clamped = 0;
        let mut rejected = Vec::new();

        for (index, &point) in points.iter().enumerate() {
            let point = if extent.covers(&point) {
                point
            } else {
                let oob = OutOfBoundsPoint { index, point };
                match self.config.bounds_policy {
                    BoundsPolicy::Strict => return Err(BuildError::OutOfBounds(oob)),
                    BoundsPolicy::Clamp if point.is_finite() => {
                        clamped += 1;
                        extent.clamp(&point)
                    }
                    BoundsPolicy::Clamp | BoundsPolicy::Skip => {
                        warn!("Skipping {} outside extent {:?}", oob, extent);
                        rejected.push(oob);
                        continue;
                    }
                }
            };

            match inserter.insert(&mut root, Item { index, point }, 0) {
                Placement::Stored => len += 1,
                Placement::Duplicate => duplicates += 1,
            }
        }

        debug!(
            "Built quadtree: {} points stored, {} nodes, {} duplicates, {} clamped, {} rejected",
            len,
            inserter.node_count,
            duplicates,
            clamped,
            rejected.len()
        );

        Ok(Quadtree {
            root,
            node_count: inserter.node_count,
            len,
            duplicates,
            clamped,
            rejected,
        })
    }
}

pub fn build(points: &[Point], extent: Rect) -> Result<Quadtree, BuildError> {
    QuadtreeBuilder::new().build(points, extent)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quadtree {
    root: QuadNode,
    node_count: usize,
    len: usize,
    duplicates: usize,
    clamped: usize,
    rejected: Vec<OutOfBoundsPoint>,
}

impl Quadtree {
    #[inline]
    pub fn root(&self) -> &QuadNode {
        &self.root
    }

    #[inline]
    pub fn extent(&self) -> &Rect {
        self.root.rect()
    }

    // root included
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Points dropped because `dedup` found them already stored.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn clamped(&self) -> usize {
        self.clamped
    }

    pub fn rejected(&self) -> &[OutOfBoundsPoint] {
        &self.rejected
    }

    // `range` is closed, like the extent
    pub fn query(&self, range: Rect) -> Vec<Item> {
        let mut out = Vec::new();
        self.root.query_into(&range, &mut out);
        out
    }
}

enum Placement {
    Stored,
    Duplicate,
}

struct Inserter {
    max_depth: u32,
    dedup: bool,
    node_count: usize,
}

impl Inserter {
    fn insert(&mut self, node: &mut QuadNode, item: Item, depth: u32) -> Placement {
        if self.dedup && node.items().iter().any(|held| held.point == item.point) {
            return Placement::Duplicate;
        }

        match &mut node.kind {
            NodeKind::Empty => {
                node.kind = NodeKind::Occupied(item);
                Placement::Stored
            }
            NodeKind::Bucket(items) => {
                items.push(item);
                Placement::Stored
            }
            NodeKind::Internal(children) => {
                let q = node.rect.quadrant_of(&item.point);
                self.insert(&mut children[q.index()], item, depth + 1)
            }
            NodeKind::Occupied(held) => {
                let held = *held;
                if depth >= self.max_depth {
                    node.kind = NodeKind::Bucket(smallvec![held, item]);
                    return Placement::Stored;
                }
                self.split(node, depth);
                // Fresh children: the held item cannot collide with anything.
                self.insert(node, held, depth);
                self.insert(node, item, depth)
            }
        }
    }

    fn split(&mut self, node: &mut QuadNode, depth: u32) {
        let [nw, ne, sw, se] = node.rect.quarters();
        node.kind = NodeKind::Internal(Box::new([
            QuadNode::new(nw),
            QuadNode::new(ne),
            QuadNode::new(sw),
            QuadNode::new(se),
        ]));
        self.node_count += 4;
        trace!("Split {:?} at depth {}", node.rect, depth);
    }
}

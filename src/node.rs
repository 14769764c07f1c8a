use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geom::{Point, Quadrant, Rect};

// `index` is the point's position in the caller's input.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Item {
    pub index: usize,
    pub point: Point,
}

pub type Bucket = SmallVec<[Item; 4]>;

/// What a node holds. A node is a leaf unless it is `Internal`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Empty,
    Occupied(Item),
    /// Only produced at the depth cap, always with two or more items.
    Bucket(Bucket),
    /// Children in `[NW, NE, SW, SE]` order.
    Internal(Box<[QuadNode; 4]>),
}

/// One rectangular region of the tree. Depth is not stored; it is a
/// property of the traversal that reaches the node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadNode {
    pub(crate) rect: Rect,
    pub(crate) kind: NodeKind,
}

impl QuadNode {
    pub(crate) fn new(rect: Rect) -> Self {
        QuadNode { rect, kind: NodeKind::Empty }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, NodeKind::Internal(_))
    }

    pub fn children(&self) -> Option<&[QuadNode; 4]> {
        match &self.kind {
            NodeKind::Internal(children) => Some(children),
            _ => None,
        }
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<&QuadNode> {
        self.children().map(|c| &c[quadrant.index()])
    }

    pub fn items(&self) -> &[Item] {
        match &self.kind {
            NodeKind::Occupied(item) => std::slice::from_ref(item),
            NodeKind::Bucket(items) => items,
            NodeKind::Empty | NodeKind::Internal(_) => &[],
        }
    }

    pub(crate) fn query_into(&self, range: &Rect, out: &mut Vec<Item>) {
        // prune if this node does not intersect the query
        if !self.rect.intersects(range) {
            return;
        }

        for it in self.items() {
            if range.covers(&it.point) {
                out.push(*it);
            }
        }

        if let Some(children) = self.children() {
            for child in children.iter() {
                child.query_into(range, out);
            }
        }
    }
}

// Pre-order: root, then the NW, NE, SW, SE subtrees. Every node is emitted,
// empty leaves included. Depth lives only here: root 0, child = parent + 1.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::Quadtree;
use crate::error::CodecError;
use crate::geom::Rect;
use crate::node::{Item, QuadNode};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlatNodeRecord {
    pub seq: usize,
    pub rect: Rect,
    pub depth: u32,
    pub is_leaf: bool,
    pub has_point: bool,
    /// First item held by the node, if any.
    pub item: Option<Item>,
    /// Items held directly; above 1 only for buckets at the depth cap.
    pub item_count: usize,
}

#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Flattened {
    pub records: Vec<FlatNodeRecord>,
    pub max_depth: u32,
}

pub fn flatten(root: &QuadNode) -> Flattened {
    let mut out = Flattened::default();
    flatten_into(root, 0, &mut out);
    debug!("Flattened {} nodes, max depth {}", out.records.len(), out.max_depth);
    out
}

fn flatten_into(node: &QuadNode, depth: u32, out: &mut Flattened) {
    let items = node.items();
    out.records.push(FlatNodeRecord {
        seq: out.records.len(),
        rect: *node.rect(),
        depth,
        is_leaf: node.is_leaf(),
        has_point: !items.is_empty(),
        item: items.first().copied(),
        item_count: items.len(),
    });
    out.max_depth = out.max_depth.max(depth);

    if let Some(children) = node.children() {
        for child in children.iter() {
            flatten_into(child, depth + 1, out);
        }
    }
}

impl Quadtree {
    pub fn flatten(&self) -> Flattened {
        flatten(self.root())
    }
}

impl Flattened {
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatNodeRecord> {
        self.records.iter()
    }

    pub fn at_depth(&self, depth: u32) -> impl Iterator<Item = &FlatNodeRecord> + '_ {
        self.records.iter().filter(move |r| r.depth == depth)
    }

    pub fn leaves(&self) -> impl Iterator<Item = &FlatNodeRecord> + '_ {
        self.records.iter().filter(|r| r.is_leaf)
    }

    // bincode, standard config
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(bincode::serde::encode_to_vec(self, bincode::config::standard())?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        let (flat, read): (Self, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        if read != bytes.len() {
            return Err(CodecError::TrailingBytes(bytes.len() - read));
        }
        Ok(flat)
    }
}

impl<'a> IntoIterator for &'a Flattened {
    type Item = &'a FlatNodeRecord;
    type IntoIter = std::slice::Iter<'a, FlatNodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

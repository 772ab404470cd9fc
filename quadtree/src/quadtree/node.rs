use common::shapes::Aabb;
use fxhash::FxHashMap;
use std::fmt;

/// Handle to a node in the quadtree arena. Handles stay valid until
/// [`QuadTree::clear`](super::QuadTree::clear).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) struct QuadNode {
    pub(crate) bounds: Aabb,
    pub(crate) level: usize,
    pub(crate) parent: Option<NodeId>,
    // top-left, top-right, bottom-left, bottom-right
    pub(crate) children: Option<[NodeId; 4]>,
    pub(crate) entities: FxHashMap<u32, Aabb>,
}

impl QuadNode {
    pub(crate) fn new(bounds: Aabb, level: usize, parent: Option<NodeId>) -> Self {
        Self {
            bounds,
            level,
            parent,
            children: None,
            entities: FxHashMap::default(),
        }
    }

    pub(crate) fn has_children(&self) -> bool {
        self.children.is_some()
    }
}

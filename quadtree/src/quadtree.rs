use crate::error::{QuadtreeError, QuadtreeResult};
use common::shapes::Aabb;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, error, warn};

mod config;
mod debug;
mod node;

pub use config::Config;
pub use debug::NodeInfo;
pub use node::NodeId;
use node::QuadNode;

pub type Relocations = SmallVec<[(u32, NodeId); 8]>;

/// Where a value ended up after an insertion.
///
/// A split triggered by the insertion can push other values into the new
/// children; those are listed in `moved` so the caller can refresh the
/// back-references it keeps.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub node: NodeId,
    pub moved: Relocations,
}

impl Placement {
    fn from_placed(value: u32, fallback: NodeId, placed: Relocations) -> Self {
        let mut node = fallback;
        let mut moved = Relocations::new();
        for (placed_value, placed_node) in placed {
            if placed_value == value {
                node = placed_node;
            } else if let Some(entry) = moved.iter_mut().find(|(v, _)| *v == placed_value) {
                entry.1 = placed_node;
            } else {
                moved.push((placed_value, placed_node));
            }
        }
        Placement { node, moved }
    }
}

/// Mutable region quadtree keyed by `u32` values.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. The tree does not
/// remember which node holds a value; callers keep that back-reference and
/// hand it back to [`QuadTree::update`] and [`QuadTree::remove`].
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    config: Config,
}

impl QuadTree {
    pub fn new_with_config(bounding_box: Aabb, config: Config) -> Self {
        let mut nodes = Vec::with_capacity(config.pool_size.max(1));
        nodes.push(QuadNode::new(bounding_box, 0, None));
        QuadTree { nodes, config }
    }

    pub fn new(bounding_box: Aabb) -> Self {
        Self::new_with_config(bounding_box, Config::default())
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn bounds(&self) -> Aabb {
        self.nodes[NodeId::ROOT.index()].bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // Insert a value starting from the root
    pub fn insert(&mut self, value: u32, aabb: Aabb) -> QuadtreeResult<Placement> {
        self.add(NodeId::ROOT, value, aabb)
    }

    /// Inserts `value` starting the search at `start`.
    ///
    /// Walks up through the parents until a node contains `aabb`, then pushes
    /// the value as deep as it fully fits. Fails when not even the root
    /// contains it, or when `start` is not a node of this tree.
    pub fn add(&mut self, start: NodeId, value: u32, aabb: Aabb) -> QuadtreeResult<Placement> {
        if start.index() >= self.nodes.len() {
            error!(value, node = %start, "tried to add from a node that doesn't exist");
            return Err(QuadtreeError::IndexConsistencyViolation { value, node: start });
        }
        let mut node = start;
        while !aabb.inside_of(&self.nodes[node.index()].bounds) {
            match self.nodes[node.index()].parent {
                Some(parent) => node = parent,
                None => {
                    let bounds = self.bounds();
                    warn!(value, ?aabb, ?bounds, "value cannot be added to the quadtree, it is out of the world");
                    return Err(QuadtreeError::OutOfWorldBounds {
                        value,
                        aabb,
                        bounds,
                    });
                }
            }
        }

        let mut placed = Relocations::new();
        self.place(node, value, aabb, &mut placed);
        Ok(Placement::from_placed(value, node, placed))
    }

    // Removes the value from the direct set of `node` only
    pub fn remove(&mut self, node: NodeId, value: u32) -> bool {
        self.nodes
            .get_mut(node.index())
            .map_or(false, |quad_node| quad_node.entities.remove(&value).is_some())
    }

    /// Relocates a value whose box changed, starting from the node that holds it.
    pub fn update(&mut self, node: NodeId, value: u32, aabb: Aabb) -> QuadtreeResult<Placement> {
        if !self.remove(node, value) {
            error!(value, node = %node, "tried to remove a value that isn't there");
            return Err(QuadtreeError::IndexConsistencyViolation { value, node });
        }
        self.add(node, value, aabb)
    }

    /// Broad phase: collects every value held by a node whose bounds overlap
    /// `aabb`. The result is a superset of the values whose boxes overlap.
    pub fn possible_colliding(&self, aabb: &Aabb, collisions: &mut Vec<u32>) {
        let mut stack: SmallVec<[NodeId; 64]> = smallvec![NodeId::ROOT];
        while let Some(node) = stack.pop() {
            let quad_node = &self.nodes[node.index()];
            collisions.extend(quad_node.entities.keys().copied());
            if let Some(children) = quad_node.children {
                // Reversed so the top-left child is visited first
                for child in children.iter().rev() {
                    if aabb.overlaps_with(&self.nodes[child.index()].bounds) {
                        stack.push(*child);
                    }
                }
            }
        }
    }

    // Drops every value and every node below the root
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[NodeId::ROOT.index()];
        root.entities.clear();
        root.children = None;
    }

    // Push a value as deep as it fits below `node`, which must already contain it
    fn place(&mut self, mut node: NodeId, value: u32, aabb: Aabb, placed: &mut Relocations) {
        while let Some(child) = self.containing_child(node, &aabb) {
            node = child;
        }

        let quad_node = &mut self.nodes[node.index()];
        // Even a full node has to take the value
        quad_node.entities.insert(value, aabb);
        placed.push((value, node));

        if quad_node.entities.len() > self.config.node_capacity
            && quad_node.level < self.config.max_depth
            && !quad_node.has_children()
        {
            self.split(node, placed);
        }
    }

    // First child, in top-left, top-right, bottom-left, bottom-right order, fully containing aabb
    fn containing_child(&self, node: NodeId, aabb: &Aabb) -> Option<NodeId> {
        let children = self.nodes[node.index()].children?;
        children
            .into_iter()
            .find(|child| aabb.inside_of(&self.nodes[child.index()].bounds))
    }

    // Subdivide a node into quadrants and push down whatever fits in one of them
    fn split(&mut self, node: NodeId, placed: &mut Relocations) {
        let (bounds, level) = {
            let quad_node = &self.nodes[node.index()];
            (quad_node.bounds, quad_node.level)
        };

        let first = self.nodes.len();
        for quadrant in bounds.quadrants() {
            self.nodes.push(QuadNode::new(quadrant, level + 1, Some(node)));
        }
        self.nodes[node.index()].children = Some([
            NodeId::from_index(first),
            NodeId::from_index(first + 1),
            NodeId::from_index(first + 2),
            NodeId::from_index(first + 3),
        ]);
        debug!(node = %node, level, "split quadtree node");

        let held: SmallVec<[(u32, Aabb); 16]> = self.nodes[node.index()]
            .entities
            .iter()
            .map(|(&value, &aabb)| (value, aabb))
            .collect();
        for (value, aabb) in held {
            if let Some(child) = self.containing_child(node, &aabb) {
                self.nodes[node.index()].entities.remove(&value);
                self.place(child, value, aabb, placed);
            }
        }
    }
}

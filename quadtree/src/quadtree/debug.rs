use super::{NodeId, QuadTree};
use common::shapes::Aabb;

/// Read-only snapshot of one node, for diagnostic overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub bounds: Aabb,
    pub level: usize,
    /// Values stored directly at this node.
    pub held: usize,
    /// Values stored at this node and everywhere below it.
    pub total: usize,
}

impl QuadTree {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn bounds_of(&self, node: NodeId) -> Option<Aabb> {
        self.nodes.get(node.index()).map(|quad_node| quad_node.bounds)
    }

    pub fn level_of(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(node.index()).map(|quad_node| quad_node.level)
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|quad_node| quad_node.parent)
    }

    pub fn children_of(&self, node: NodeId) -> Option<[NodeId; 4]> {
        self.nodes.get(node.index()).and_then(|quad_node| quad_node.children)
    }

    // True if `value` is stored directly at `node`
    pub fn holds(&self, node: NodeId, value: u32) -> bool {
        self.nodes
            .get(node.index())
            .map_or(false, |quad_node| quad_node.entities.contains_key(&value))
    }

    pub fn held_at(&self, node: NodeId) -> impl Iterator<Item = (u32, Aabb)> + '_ {
        self.nodes
            .get(node.index())
            .into_iter()
            .flat_map(|quad_node| quad_node.entities.iter().map(|(&value, &aabb)| (value, aabb)))
    }

    // Counts all values held at the node, including child nodes
    pub fn count_all_items(&self, node: NodeId) -> usize {
        let Some(quad_node) = self.nodes.get(node.index()) else {
            return 0;
        };
        let mut count = quad_node.entities.len();
        if let Some(children) = quad_node.children {
            count += children
                .iter()
                .map(|child| self.count_all_items(*child))
                .sum::<usize>();
        }
        count
    }

    pub fn total_entities(&self) -> usize {
        self.nodes.iter().map(|quad_node| quad_node.entities.len()).sum()
    }

    // Retrieve all node bounding boxes, parents before their children
    pub fn all_node_bounding_boxes(&self, bounding_boxes: &mut Vec<Aabb>) {
        self.node_bounding_boxes(NodeId::ROOT, bounding_boxes);
    }

    fn node_bounding_boxes(&self, node: NodeId, bounding_boxes: &mut Vec<Aabb>) {
        let quad_node = &self.nodes[node.index()];
        bounding_boxes.push(quad_node.bounds);
        if let Some(children) = quad_node.children {
            for child in children {
                self.node_bounding_boxes(child, bounding_boxes);
            }
        }
    }

    pub fn node_infos(&self) -> Vec<NodeInfo> {
        (0..self.nodes.len())
            .map(|index| {
                let id = NodeId::from_index(index);
                let quad_node = &self.nodes[index];
                NodeInfo {
                    id,
                    bounds: quad_node.bounds,
                    level: quad_node.level,
                    held: quad_node.entities.len(),
                    total: self.count_all_items(id),
                }
            })
            .collect()
    }
}

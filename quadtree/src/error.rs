use crate::quadtree::NodeId;
use common::shapes::Aabb;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadtreeError {
    #[error("value {value} at {aabb:?} is outside the quadtree bounds {bounds:?}")]
    OutOfWorldBounds { value: u32, aabb: Aabb, bounds: Aabb },
    #[error("value {value} is not held by node {node}, its back-reference is stale")]
    IndexConsistencyViolation { value: u32, node: NodeId },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

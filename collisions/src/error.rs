use crate::entity::EntityId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WorldError {
    #[error("entity {0} left the world bounds")]
    OutOfWorldBounds(EntityId),
    #[error("entity {0} is not held by the quadtree node it points to")]
    IndexConsistencyViolation(EntityId),
    #[error("static entity {0} was scheduled for destruction")]
    StaticEntityDestroyed(EntityId),
    #[error("entity dimensions must be finite and non-negative (width: {width}, height: {height})")]
    InvalidDimensions { width: f32, height: f32 },
    #[error("no entity with id {0}")]
    UnknownEntity(EntityId),
    #[error("entity {0} is static and cannot move")]
    NotDynamic(EntityId),
}

pub type WorldResult<T> = Result<T, WorldError>;

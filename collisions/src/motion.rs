use crate::entity::{DynamicBody, Entity, EntityId};
use crate::error::{WorldError, WorldResult};
use crate::world::World;
use common::shapes::Aabb;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn velocity(self, body: &DynamicBody) -> f32 {
        match self {
            Axis::Horizontal => body.velocity_x,
            Axis::Vertical => body.velocity_y,
        }
    }

    fn stop(self, body: &mut DynamicBody) {
        match self {
            Axis::Horizontal => body.velocity_x = 0.0,
            Axis::Vertical => body.velocity_y = 0.0,
        }
    }

    fn position(self, aabb: &Aabb) -> f32 {
        match self {
            Axis::Horizontal => aabb.x,
            Axis::Vertical => aabb.y,
        }
    }

    fn extent(self, aabb: &Aabb) -> f32 {
        match self {
            Axis::Horizontal => aabb.width,
            Axis::Vertical => aabb.height,
        }
    }

    fn min_edge(self, aabb: &Aabb) -> f32 {
        match self {
            Axis::Horizontal => aabb.left(),
            Axis::Vertical => aabb.bottom(),
        }
    }

    fn max_edge(self, aabb: &Aabb) -> f32 {
        match self {
            Axis::Horizontal => aabb.right(),
            Axis::Vertical => aabb.top(),
        }
    }

    fn moved(self, aabb: &Aabb, position: f32) -> Aabb {
        let mut moved = *aabb;
        match self {
            Axis::Horizontal => moved.set_x(position),
            Axis::Vertical => moved.set_y(position),
        }
        moved
    }
}

impl World {
    /// Moves a dynamic entity by `velocity * delta`, horizontal axis first,
    /// stopping at the first obstacle whose collision rule blocks it.
    ///
    /// Marks the entity as resolving for the rest of the frame, so it is
    /// never moved twice and other movers treat it as an already-placed
    /// obstacle.
    pub(crate) fn move_and_collide(&mut self, id: EntityId, delta: f32) -> WorldResult<()> {
        let entity = self.entities.get_mut(&id).ok_or(WorldError::UnknownEntity(id))?;
        if entity.to_be_destroyed {
            return Ok(());
        }
        let dynamic = entity.dynamic_mut().ok_or(WorldError::NotDynamic(id))?;
        if dynamic.resolving {
            return Ok(());
        }
        dynamic.resolving = true;

        self.move_axis(id, Axis::Horizontal, delta)?;
        self.move_axis(id, Axis::Vertical, delta)
    }

    fn move_axis(&mut self, id: EntityId, axis: Axis, delta: f32) -> WorldResult<()> {
        let entity = self.entities.get_mut(&id).ok_or(WorldError::UnknownEntity(id))?;
        let aabb = entity.aabb;
        let dynamic = entity.dynamic_mut().ok_or(WorldError::NotDynamic(id))?;
        let velocity = axis.velocity(dynamic);
        if velocity == 0.0 {
            return Ok(());
        }
        let trial = axis.moved(&aabb, axis.position(&aabb) + velocity * delta);
        dynamic.scratch = trial;

        let mut candidates = Vec::new();
        self.tree.possible_colliding(&trial, &mut candidates);

        let mut stop_at: Option<f32> = None;
        for value in candidates {
            let other = EntityId::from_raw(value);
            if other == id {
                continue;
            }
            let overlapping = self
                .entities
                .get(&other)
                .map_or(false, |entity| trial.overlaps_with(&entity.aabb));
            if !overlapping || !self.blocks(id, other, delta) {
                continue;
            }
            // The rule may have moved the obstacle, use where it is now
            let Some(obstacle) = self.entities.get(&other).map(|entity| entity.aabb) else {
                continue;
            };
            let edge = if velocity > 0.0 {
                axis.min_edge(&obstacle)
            } else {
                axis.max_edge(&obstacle)
            };
            stop_at = Some(match stop_at {
                Some(current) if velocity > 0.0 => current.min(edge),
                Some(current) => current.max(edge),
                None => edge,
            });
        }

        let position = match stop_at {
            Some(edge) => {
                let stopped = self
                    .entities
                    .get_mut(&id)
                    .and_then(Entity::dynamic_mut)
                    .ok_or(WorldError::UnknownEntity(id))?;
                axis.stop(stopped);
                trace!(entity = %id, ?axis, edge, "motion blocked");
                if velocity > 0.0 {
                    edge - axis.extent(&aabb)
                } else {
                    edge
                }
            }
            None => axis.position(&trial),
        };
        self.relocate(id, axis.moved(&aabb, position))
    }
}

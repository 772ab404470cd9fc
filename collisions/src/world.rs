use crate::config::WorldConfig;
use crate::entity::{Body, DynamicBody, DynamicKind, Entity, EntityId, StaticKind};
use crate::error::{WorldError, WorldResult};
use crate::hero::Hero;
use crate::input::{InputSource, Intents};
use common::shapes::Aabb;
use fxhash::FxHashMap;
use quadtree::{Placement, QuadTree, QuadtreeError};
use tracing::{debug, debug_span, error, warn};

/// What happened during one call to [`World::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// The time step actually simulated, after clamping.
    pub delta: f32,
    /// True when the frame was not simulated at all.
    pub skipped: bool,
    /// Dynamic entities removed at the end of the frame.
    pub destroyed: Vec<EntityId>,
    /// Recoverable faults hit during the frame, such as a static entity
    /// forcibly removed or a stale quadtree back-reference.
    pub errors: Vec<WorldError>,
}

/// Owns every entity and the quadtree indexing them, and advances the
/// simulation one frame at a time.
pub struct World {
    pub(crate) config: WorldConfig,
    pub(crate) tree: QuadTree,
    pub(crate) entities: FxHashMap<EntityId, Entity>,
    // Creation order, which is also the motion order
    dynamic_ids: Vec<EntityId>,
    static_ids: Vec<EntityId>,
    next_id: u32,
    input: Box<dyn InputSource>,
    // Errors are collected into the frame report only while `update` runs
    simulating: bool,
    frame_errors: Vec<WorldError>,
}

impl World {
    pub fn new(bounds: Aabb) -> Self {
        Self::new_with_config(bounds, WorldConfig::default())
    }

    pub fn with_size(width: f32, height: f32) -> Self {
        Self::new(Aabb::new(0.0, 0.0, width, height))
    }

    pub fn new_with_config(bounds: Aabb, config: WorldConfig) -> Self {
        let tree = QuadTree::new_with_config(bounds, config.quadtree.clone());
        World {
            config,
            tree,
            entities: FxHashMap::default(),
            dynamic_ids: Vec::new(),
            static_ids: Vec::new(),
            next_id: 1,
            input: Box::new(Intents::empty()),
            simulating: false,
            frame_errors: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn bounds(&self) -> Aabb {
        self.tree.bounds()
    }

    pub fn quadtree(&self) -> &QuadTree {
        &self.tree
    }

    /// Replaces the source polled by the hero every frame.
    pub fn set_input<I: InputSource + 'static>(&mut self, input: I) {
        self.input = Box::new(input);
    }

    pub fn create_static(
        &mut self,
        kind: StaticKind,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> WorldResult<EntityId> {
        self.register(Aabb::new(x, y, width, height), Body::Static(kind))
    }

    pub fn create_dynamic(
        &mut self,
        kind: DynamicKind,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> WorldResult<EntityId> {
        let aabb = Aabb::new(x, y, width, height);
        let hero = match kind {
            DynamicKind::Hero => Some(Hero::new(self.config.hero)),
            DynamicKind::Body => None,
        };
        self.register(aabb, Body::Dynamic(DynamicBody::new(aabb, hero)))
    }

    // An entity created outside the world is still issued an id, but is
    // flagged for destruction right away
    fn register(&mut self, aabb: Aabb, body: Body) -> WorldResult<EntityId> {
        if !aabb.has_valid_dims() || !aabb.x.is_finite() || !aabb.y.is_finite() {
            return Err(WorldError::InvalidDimensions {
                width: aabb.width,
                height: aabb.height,
            });
        }
        let id = EntityId::from_raw(self.next_id);
        self.next_id += 1;

        let mut entity = Entity::new(id, aabb, body);
        if entity.is_dynamic() {
            self.dynamic_ids.push(id);
        } else {
            self.static_ids.push(id);
        }
        let placement = self.tree.insert(id.raw(), aabb);
        if placement.is_err() {
            warn!(entity = %id, ?aabb, "entity created outside the world");
            entity.to_be_destroyed = true;
        }
        self.entities.insert(id, entity);
        if let Ok(placement) = placement {
            self.apply_placement(id, placement);
        }
        debug!(entity = %id, "entity created");
        Ok(id)
    }

    // Points every entity touched by an insertion at its new node
    fn apply_placement(&mut self, id: EntityId, placement: Placement) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.node = Some(placement.node);
        }
        for (value, node) in placement.moved {
            if let Some(entity) = self.entities.get_mut(&EntityId::from_raw(value)) {
                entity.node = Some(node);
            }
        }
    }

    /// Moves an entity's box to `aabb` and re-indexes it. Leaving the world
    /// flags the entity for destruction.
    pub(crate) fn relocate(&mut self, id: EntityId, aabb: Aabb) -> WorldResult<()> {
        let entity = self.entities.get_mut(&id).ok_or(WorldError::UnknownEntity(id))?;
        entity.aabb = aabb;
        let Some(node) = entity.node else {
            return Err(WorldError::OutOfWorldBounds(id));
        };
        match self.tree.update(node, id.raw(), aabb) {
            Ok(placement) => {
                self.apply_placement(id, placement);
                Ok(())
            }
            Err(QuadtreeError::OutOfWorldBounds { .. }) => {
                warn!(entity = %id, ?aabb, "entity left the world and will be destroyed");
                entity.node = None;
                entity.to_be_destroyed = true;
                Err(WorldError::OutOfWorldBounds(id))
            }
            Err(QuadtreeError::IndexConsistencyViolation { .. }) => {
                let err = WorldError::IndexConsistencyViolation(id);
                if self.simulating {
                    self.frame_errors.push(err);
                }
                Err(err)
            }
        }
    }

    /// Teleports a dynamic entity. Statics never move once created.
    pub fn set_position(&mut self, id: EntityId, x: f32, y: f32) -> WorldResult<()> {
        let entity = self.entity(id).ok_or(WorldError::UnknownEntity(id))?;
        if !entity.is_dynamic() {
            return Err(WorldError::NotDynamic(id));
        }
        let mut aabb = entity.aabb;
        aabb.set_position(x, y);
        self.relocate(id, aabb)
    }

    pub fn set_velocity(&mut self, id: EntityId, velocity_x: f32, velocity_y: f32) -> WorldResult<()> {
        let dynamic = self.dynamic_mut(id)?;
        dynamic.velocity_x = velocity_x;
        dynamic.velocity_y = velocity_y;
        Ok(())
    }

    pub fn set_acceleration(
        &mut self,
        id: EntityId,
        acceleration_x: f32,
        acceleration_y: f32,
    ) -> WorldResult<()> {
        let dynamic = self.dynamic_mut(id)?;
        dynamic.acceleration_x = acceleration_x;
        dynamic.acceleration_y = acceleration_y;
        Ok(())
    }

    fn dynamic_mut(&mut self, id: EntityId) -> WorldResult<&mut DynamicBody> {
        self.entities
            .get_mut(&id)
            .ok_or(WorldError::UnknownEntity(id))?
            .dynamic_mut()
            .ok_or(WorldError::NotDynamic(id))
    }

    pub fn hero_mut(&mut self, id: EntityId) -> Option<&mut Hero> {
        self.entities.get_mut(&id).and_then(Entity::hero_mut)
    }

    /// Schedules a dynamic entity for removal at the end of the next frame.
    /// It stops taking part in collisions right away.
    pub fn destroy(&mut self, id: EntityId) -> WorldResult<()> {
        let entity = self.entities.get_mut(&id).ok_or(WorldError::UnknownEntity(id))?;
        if !entity.is_dynamic() {
            return Err(WorldError::NotDynamic(id));
        }
        entity.to_be_destroyed = true;
        if let Some(node) = entity.node.take() {
            self.tree.remove(node, id.raw());
        }
        Ok(())
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Every entity, statics first, each group in creation order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.static_ids
            .iter()
            .chain(self.dynamic_ids.iter())
            .filter_map(|id| self.entities.get(id))
    }

    pub fn dynamic_ids(&self) -> &[EntityId] {
        &self.dynamic_ids
    }

    pub fn static_ids(&self) -> &[EntityId] {
        &self.static_ids
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entities not flagged for destruction. Matches the number of values
    /// held by the quadtree between frames.
    pub fn live_count(&self) -> usize {
        self.entities
            .values()
            .filter(|entity| !entity.to_be_destroyed)
            .count()
    }

    /// Advances the simulation by `delta` seconds, clamped to the configured
    /// maximum step.
    ///
    /// Every dynamic entity first runs its pre-motion hook, then moves in
    /// creation order. Entities that left the world are removed at the end.
    pub fn update(&mut self, delta: f32) -> FrameReport {
        if !delta.is_finite() || delta <= 0.0 {
            warn!(delta, "skipping frame with an invalid time step");
            return FrameReport {
                skipped: true,
                ..FrameReport::default()
            };
        }
        let delta = delta.min(self.config.max_delta);
        let _span = debug_span!("world_update", delta).entered();
        self.simulating = true;

        for id in &self.dynamic_ids {
            let Some(entity) = self.entities.get_mut(id) else {
                continue;
            };
            if entity.to_be_destroyed {
                continue;
            }
            if let Some(dynamic) = entity.dynamic_mut() {
                dynamic.pre_motion(self.input.as_ref(), delta);
            }
        }

        let order = std::mem::take(&mut self.dynamic_ids);
        for &id in &order {
            match self.move_and_collide(id, delta) {
                Ok(()) | Err(WorldError::OutOfWorldBounds(_)) => {}
                Err(err) => debug!(entity = %id, %err, "motion ended early"),
            }
        }
        self.dynamic_ids = order;

        let entities = &mut self.entities;
        let mut destroyed = Vec::new();
        self.dynamic_ids.retain(|id| {
            let Some(entity) = entities.get_mut(id) else {
                return false;
            };
            if entity.to_be_destroyed {
                destroyed.push(*id);
                return false;
            }
            if let Some(dynamic) = entity.dynamic_mut() {
                dynamic.post_motion();
            }
            true
        });

        let mut static_destroyed = Vec::new();
        self.static_ids.retain(|id| {
            let flagged = entities.get(id).map_or(true, |entity| entity.to_be_destroyed);
            if flagged {
                static_destroyed.push(*id);
            }
            !flagged
        });

        for &id in &destroyed {
            self.remove_entity(id);
        }
        for &id in &static_destroyed {
            error!(entity = %id, "static entity was scheduled for destruction and has been removed");
            self.remove_entity(id);
            self.frame_errors.push(WorldError::StaticEntityDestroyed(id));
        }

        self.simulating = false;
        let errors = std::mem::take(&mut self.frame_errors);
        debug!(
            destroyed = destroyed.len(),
            errors = errors.len(),
            live = self.entities.len(),
            "frame done"
        );
        FrameReport {
            delta,
            skipped: false,
            destroyed,
            errors,
        }
    }

    fn remove_entity(&mut self, id: EntityId) {
        if let Some(entity) = self.entities.remove(&id) {
            if let Some(node) = entity.node {
                self.tree.remove(node, id.raw());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    // Drops the entity from the tree behind the world's back
    fn unindex(world: &mut World, id: EntityId) {
        let node = world.entity(id).and_then(Entity::node).unwrap();
        assert!(world.tree.remove(node, id.raw()));
    }

    #[test]
    fn test_stale_back_reference_outside_a_frame_is_not_reported() {
        let mut world = World::with_size(128.0, 128.0);
        let body = world.create_dynamic(DynamicKind::Body, 0.0, 0.0, 16.0, 16.0).unwrap();
        unindex(&mut world, body);

        assert_eq!(
            world.set_position(body, 32.0, 32.0),
            Err(WorldError::IndexConsistencyViolation(body))
        );
        let report = world.update(FRAME);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_stale_back_reference_during_a_frame_is_reported() {
        let mut world = World::with_size(128.0, 128.0);
        let body = world.create_dynamic(DynamicKind::Body, 0.0, 0.0, 16.0, 16.0).unwrap();
        world.set_velocity(body, 30.0, 30.0).unwrap();
        unindex(&mut world, body);

        let report = world.update(FRAME);
        assert_eq!(report.errors, vec![WorldError::IndexConsistencyViolation(body)]);
    }
}

use crate::entity::{DynamicKind, Entity, EntityId, EntityKind};
use crate::world::World;
use common::shapes::Aabb;
use tracing::{debug, trace};

// The mover was above the obstacle before this frame's step on the vertical axis
fn lands_on(velocity_y: f32, mover: &Aabb, obstacle: &Aabb) -> bool {
    velocity_y <= 0.0 && mover.bottom() >= obstacle.top()
}

impl World {
    /// Decides whether `obstacle` stops the motion of `mover`, whose trial box
    /// for the current axis is stored in its scratch box.
    ///
    /// Rules may flip hero flags and may move a dynamic obstacle first, so
    /// the caller must re-read the obstacle's box afterwards.
    pub(crate) fn blocks(&mut self, mover: EntityId, obstacle: EntityId, delta: f32) -> bool {
        let Some(mover_kind) = self
            .entities
            .get(&mover)
            .and_then(Entity::dynamic)
            .map(|dynamic| dynamic.kind())
        else {
            return true;
        };
        let Some((obstacle_kind, obstacle_box)) = self
            .entities
            .get(&obstacle)
            .filter(|entity| !entity.to_be_destroyed)
            .map(|entity| (entity.kind(), entity.aabb))
        else {
            return false;
        };

        let blocked = match (mover_kind, obstacle_kind) {
            (_, EntityKind::Static) => {
                self.update_touching_ground(mover, &obstacle_box);
                true
            }
            (_, EntityKind::Dynamic | EntityKind::Hero) => {
                self.update_touching_ground(mover, &obstacle_box);
                self.dynamic_obstacle_blocks(mover, obstacle, delta)
            }
            (_, EntityKind::OneWayPlatform) => self.one_way_platform_blocks(mover, &obstacle_box),
            (DynamicKind::Hero, EntityKind::Ladder) => self.ladder_blocks_hero(mover, &obstacle_box),
            (DynamicKind::Body, EntityKind::Ladder) => false,
        };
        trace!(
            mover = %mover,
            obstacle = %obstacle,
            ?mover_kind,
            ?obstacle_kind,
            blocked,
            "collision rule"
        );
        blocked
    }

    fn update_touching_ground(&mut self, mover: EntityId, obstacle: &Aabb) {
        let Some(entity) = self.entities.get_mut(&mover) else {
            return;
        };
        let aabb = entity.aabb;
        let Some(dynamic) = entity.dynamic_mut() else {
            return;
        };
        let velocity_y = dynamic.velocity_y;
        if let Some(hero) = dynamic.hero.as_mut() {
            if lands_on(velocity_y, &aabb, obstacle) {
                hero.touching_ground = true;
            }
        }
    }

    fn dynamic_obstacle_blocks(&mut self, mover: EntityId, obstacle: EntityId, delta: f32) -> bool {
        let idle = self
            .entities
            .get(&obstacle)
            .and_then(Entity::dynamic)
            .map_or(false, |dynamic| !dynamic.resolving);
        // Give the obstacle a chance to get out of the way first
        if idle {
            if let Err(err) = self.move_and_collide(obstacle, delta) {
                debug!(entity = %obstacle, %err, "obstacle motion ended early");
            }
        }

        let Some(obstacle_box) = self
            .entities
            .get(&obstacle)
            .filter(|entity| !entity.to_be_destroyed)
            .map(|entity| entity.aabb)
        else {
            return false;
        };
        self.entities
            .get(&mover)
            .and_then(Entity::dynamic)
            .map_or(true, |dynamic| dynamic.scratch.overlaps_with(&obstacle_box))
    }

    fn one_way_platform_blocks(&mut self, mover: EntityId, platform: &Aabb) -> bool {
        let Some(entity) = self.entities.get_mut(&mover) else {
            return false;
        };
        let aabb = entity.aabb;
        let Some(dynamic) = entity.dynamic_mut() else {
            return false;
        };
        if !lands_on(dynamic.velocity_y, &aabb, platform) {
            return false;
        }
        match dynamic.hero.as_mut() {
            Some(hero) if hero.step_down => false,
            Some(hero) => {
                hero.touching_ground = true;
                true
            }
            None => true,
        }
    }

    fn ladder_blocks_hero(&mut self, mover: EntityId, ladder: &Aabb) -> bool {
        let Some(entity) = self.entities.get_mut(&mover) else {
            return false;
        };
        let aabb = entity.aabb;
        let Some(dynamic) = entity.dynamic_mut() else {
            return false;
        };
        let velocity_y = dynamic.velocity_y;
        let Some(hero) = dynamic.hero.as_mut() else {
            return false;
        };

        // Standing on top of a ladder works like standing on a one-way platform
        let blocked = !hero.climbing_ladder
            && !hero.colliding_with_ladder
            && !hero.step_down
            && lands_on(velocity_y, &aabb, ladder);
        if blocked {
            hero.touching_ground = true;
        }
        hero.colliding_with_ladder = true;
        blocked
    }
}

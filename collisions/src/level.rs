use crate::entity::{DynamicKind, EntityId, StaticKind};
use crate::error::WorldResult;
use crate::world::World;
use tracing::info;

/// Tile edge, in world units, used by the sample levels.
pub const TILE: f32 = 16.0;

/// Entity templates with their standard sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefab {
    Hero,
    Ground,
    Wall,
    Ladder,
    OneWay,
}

impl Prefab {
    /// Width and height of the template.
    pub fn size(self) -> (f32, f32) {
        match self {
            Prefab::Hero => (10.0, 16.0),
            Prefab::Ladder => (8.0, TILE),
            Prefab::Ground | Prefab::Wall | Prefab::OneWay => (TILE, TILE),
        }
    }
}

impl World {
    /// Creates an entity from a template with its bottom-left corner at `(x, y)`.
    pub fn spawn(&mut self, prefab: Prefab, x: f32, y: f32) -> WorldResult<EntityId> {
        let (width, height) = prefab.size();
        match prefab {
            Prefab::Hero => self.create_dynamic(DynamicKind::Hero, x, y, width, height),
            Prefab::Ground | Prefab::Wall => self.create_static(StaticKind::Solid, x, y, width, height),
            Prefab::Ladder => self.create_static(StaticKind::Ladder, x, y, width, height),
            Prefab::OneWay => self.create_static(StaticKind::OneWayPlatform, x, y, width, height),
        }
    }
}

/// Handles to the interesting entities of [`playground`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playground {
    pub hero: EntityId,
    pub moving_walls: [EntityId; 2],
}

fn row(world: &mut World, prefab: Prefab, y: u32, from: u32, to: u32) -> WorldResult<()> {
    for x in (from..to).step_by(TILE as usize) {
        world.spawn(prefab, x as f32, y as f32)?;
    }
    Ok(())
}

/// Sample level for a 512x512 world: a ground floor, two ledges joined by a
/// ladder, a row of one-way platforms, the hero dropping in from above and
/// two walls drifting down and to the left.
pub fn playground(world: &mut World) -> WorldResult<Playground> {
    row(world, Prefab::Ground, 0, 0, 512)?;
    row(world, Prefab::Ground, 48, 0, 192)?;
    row(world, Prefab::Ground, 48, 272, 512)?;
    row(world, Prefab::Ground, 96, 128, 240)?;
    for y in (64..112).step_by(TILE as usize) {
        world.spawn(Prefab::Ladder, 112.0, y as f32)?;
    }
    row(world, Prefab::OneWay, 128, 0, 196)?;

    let hero = world.spawn(Prefab::Hero, 128.0, 350.0)?;

    let mut moving_walls = [hero; 2];
    for (slot, x) in moving_walls.iter_mut().zip([272.0, 288.0]) {
        let wall = world.create_dynamic(DynamicKind::Body, x, 272.0, TILE, TILE)?;
        world.set_velocity(wall, -10.0, -10.0)?;
        *slot = wall;
    }

    info!(entities = world.len(), "playground level ready");
    Ok(Playground { hero, moving_walls })
}

/// Stress level: a ground floor under a block of walls all drifting with
/// the same velocity. Walls reaching the world's edge fall out of it.
pub fn moving_walls(world: &mut World, velocity_x: f32, velocity_y: f32) -> WorldResult<Vec<EntityId>> {
    row(world, Prefab::Ground, 0, 0, 512)?;

    let mut walls = Vec::new();
    for i in 8..32u16 {
        for j in (6..=24u16).rev() {
            let wall = world.create_dynamic(
                DynamicKind::Body,
                f32::from(i) * TILE,
                f32::from(j) * TILE,
                TILE,
                TILE,
            )?;
            world.set_velocity(wall, velocity_x, velocity_y)?;
            walls.push(wall);
        }
    }
    info!(walls = walls.len(), "moving walls level ready");
    Ok(walls)
}

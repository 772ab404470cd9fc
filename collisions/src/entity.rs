use crate::hero::Hero;
use common::shapes::Aabb;
use quadtree::NodeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier issued by the owning [`World`](crate::World), never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub(crate) fn from_raw(raw: u32) -> Self {
        EntityId(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flat tag used to pick a collision rule for a pair of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Static,
    Dynamic,
    Hero,
    Ladder,
    OneWayPlatform,
}

impl EntityKind {
    pub fn is_dynamic(self) -> bool {
        matches!(self, EntityKind::Dynamic | EntityKind::Hero)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StaticKind {
    Solid,
    Ladder,
    OneWayPlatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamicKind {
    Body,
    Hero,
}

#[derive(Debug, Clone)]
pub struct DynamicBody {
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub acceleration_x: f32,
    pub acceleration_y: f32,
    // Trial box of the axis currently being resolved
    pub(crate) scratch: Aabb,
    // Set while inside move-and-collide, cleared once per frame by the world
    pub(crate) resolving: bool,
    pub(crate) hero: Option<Hero>,
}

impl DynamicBody {
    pub(crate) fn new(aabb: Aabb, hero: Option<Hero>) -> Self {
        let acceleration_y = hero.as_ref().map_or(0.0, |hero| -hero.tuning().gravity);
        DynamicBody {
            velocity_x: 0.0,
            velocity_y: 0.0,
            acceleration_x: 0.0,
            acceleration_y,
            scratch: aabb,
            resolving: false,
            hero,
        }
    }

    pub fn kind(&self) -> DynamicKind {
        if self.hero.is_some() {
            DynamicKind::Hero
        } else {
            DynamicKind::Body
        }
    }

    pub fn is_resolving(&self) -> bool {
        self.resolving
    }

    pub fn scratch(&self) -> &Aabb {
        &self.scratch
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    pub fn hero_mut(&mut self) -> Option<&mut Hero> {
        self.hero.as_mut()
    }

    // Velocity and acceleration integration, the part every dynamic entity shares
    pub(crate) fn integrate(&mut self, delta: f32) {
        self.velocity_x += self.acceleration_x * delta;
        self.velocity_y += self.acceleration_y * delta;
    }
}

#[derive(Debug, Clone)]
pub enum Body {
    Static(StaticKind),
    Dynamic(DynamicBody),
}

/// Something living in the world, with a box registered in the quadtree.
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) aabb: Aabb,
    // Node holding this entity, None once it fell out of the index
    pub(crate) node: Option<NodeId>,
    pub(crate) to_be_destroyed: bool,
    pub(crate) body: Body,
}

impl Entity {
    pub(crate) fn new(id: EntityId, aabb: Aabb, body: Body) -> Self {
        Entity {
            id,
            aabb,
            node: None,
            to_be_destroyed: false,
            body,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn position(&self) -> (f32, f32) {
        self.aabb.position()
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn is_to_be_destroyed(&self) -> bool {
        self.to_be_destroyed
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn kind(&self) -> EntityKind {
        match &self.body {
            Body::Static(StaticKind::Solid) => EntityKind::Static,
            Body::Static(StaticKind::Ladder) => EntityKind::Ladder,
            Body::Static(StaticKind::OneWayPlatform) => EntityKind::OneWayPlatform,
            Body::Dynamic(dynamic) => match dynamic.kind() {
                DynamicKind::Body => EntityKind::Dynamic,
                DynamicKind::Hero => EntityKind::Hero,
            },
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.body, Body::Dynamic(_))
    }

    pub fn dynamic(&self) -> Option<&DynamicBody> {
        match &self.body {
            Body::Dynamic(dynamic) => Some(dynamic),
            Body::Static(_) => None,
        }
    }

    pub(crate) fn dynamic_mut(&mut self) -> Option<&mut DynamicBody> {
        match &mut self.body {
            Body::Dynamic(dynamic) => Some(dynamic),
            Body::Static(_) => None,
        }
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.dynamic().and_then(DynamicBody::hero)
    }

    pub(crate) fn hero_mut(&mut self) -> Option<&mut Hero> {
        self.dynamic_mut().and_then(DynamicBody::hero_mut)
    }
}

// Identity is the id, never the box contents
impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity {}

impl Hash for Entity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

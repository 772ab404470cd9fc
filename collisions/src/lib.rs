pub mod config;
mod dispatch;
pub mod entity;
pub mod error;
pub mod hero;
pub mod input;
pub mod level;
mod motion;
pub mod world;

pub use common::shapes::Aabb;
pub use config::{HeroTuning, WorldConfig};
pub use entity::{Body, DynamicBody, DynamicKind, Entity, EntityId, EntityKind, StaticKind};
pub use error::{WorldError, WorldResult};
pub use hero::Hero;
pub use input::{InputSource, Intents};
pub use level::Prefab;
pub use world::{FrameReport, World};

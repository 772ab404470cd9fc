use quadtree::Config;

/// Movement constants of the hero, in world units per second.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroTuning {
    pub horizontal_speed: f32,
    pub climb_speed: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
}

impl Default for HeroTuning {
    fn default() -> Self {
        HeroTuning {
            horizontal_speed: 100.0,
            climb_speed: 100.0,
            gravity: 400.0,
            jump_velocity: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig {
    /// Upper bound for a single physics step, in seconds. A stalled host
    /// frame never advances the simulation further than this.
    pub max_delta: f32,
    pub quadtree: Config,
    pub hero: HeroTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            max_delta: 1.0 / 30.0,
            quadtree: Config::default(),
            hero: HeroTuning::default(),
        }
    }
}

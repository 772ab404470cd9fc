use crate::config::HeroTuning;
use crate::entity::DynamicBody;
use crate::input::{InputSource, Intents};

/// Per-frame state of the player character.
///
/// `touching_ground` and `colliding_with_ladder` are recomputed by the
/// collision rules every frame; `climbing_ladder` survives frames as long as
/// the hero keeps touching a ladder; `step_down` lasts for a single frame.
#[derive(Debug, Clone)]
pub struct Hero {
    pub(crate) touching_ground: bool,
    pub(crate) climbing_ladder: bool,
    pub(crate) colliding_with_ladder: bool,
    pub(crate) step_down: bool,
    tuning: HeroTuning,
}

impl Hero {
    pub(crate) fn new(tuning: HeroTuning) -> Self {
        Hero {
            touching_ground: false,
            climbing_ladder: false,
            colliding_with_ladder: false,
            step_down: false,
            tuning,
        }
    }

    pub fn tuning(&self) -> &HeroTuning {
        &self.tuning
    }

    pub fn is_touching_ground(&self) -> bool {
        self.touching_ground
    }

    pub fn is_climbing_ladder(&self) -> bool {
        self.climbing_ladder
    }

    pub fn is_colliding_with_ladder(&self) -> bool {
        self.colliding_with_ladder
    }

    pub fn wants_step_down(&self) -> bool {
        self.step_down
    }

    /// Ignore one-way platforms and ladder tops during the next frame.
    pub fn request_step_down(&mut self) {
        self.step_down = true;
    }

    fn finish_frame(&mut self) {
        self.step_down = false;
        if !self.colliding_with_ladder {
            self.climbing_ladder = false;
        }
    }
}

impl DynamicBody {
    // Runs before any entity moves this frame
    pub(crate) fn pre_motion(&mut self, input: &dyn InputSource, delta: f32) {
        let Some(hero) = self.hero.as_mut() else {
            self.integrate(delta);
            return;
        };
        let tuning = hero.tuning;

        self.velocity_x = 0.0;
        if input.is_active(Intents::LEFT) {
            self.velocity_x = -tuning.horizontal_speed;
        }
        if input.is_active(Intents::RIGHT) {
            self.velocity_x = tuning.horizontal_speed;
        }
        if input.is_active(Intents::JUMP) && (hero.touching_ground || hero.climbing_ladder) {
            self.velocity_y = tuning.jump_velocity;
            hero.climbing_ladder = false;
        }

        if hero.climbing_ladder {
            self.velocity_y = 0.0;
        }

        if input.is_active(Intents::UP) && hero.colliding_with_ladder {
            self.velocity_y = tuning.climb_speed;
            hero.climbing_ladder = true;
        }
        if input.is_active(Intents::DOWN) {
            if hero.colliding_with_ladder {
                self.velocity_y = -tuning.climb_speed;
                hero.climbing_ladder = true;
            }
            hero.step_down = true;
        }

        // Recomputed by the collision rules while moving
        hero.touching_ground = false;
        hero.colliding_with_ladder = false;

        // No gravity on a ladder
        if !hero.climbing_ladder {
            self.integrate(delta);
        }
    }

    // Runs once every entity finished moving this frame
    pub(crate) fn post_motion(&mut self) {
        self.resolving = false;
        if let Some(hero) = self.hero.as_mut() {
            hero.finish_frame();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use common::shapes::Aabb;

    fn hero_body() -> DynamicBody {
        DynamicBody::new(Aabb::new(0.0, 0.0, 10.0, 16.0), Some(Hero::new(HeroTuning::default())))
    }

    #[test]
    fn test_gravity_is_applied_unless_climbing() {
        let mut body = hero_body();
        assert_eq!(body.acceleration_y, -400.0);
        body.pre_motion(&Intents::empty(), 0.5);
        assert_eq!(body.velocity_y, -200.0);

        let mut climbing = hero_body();
        climbing.hero.as_mut().unwrap().climbing_ladder = true;
        climbing.hero.as_mut().unwrap().colliding_with_ladder = true;
        climbing.velocity_y = -50.0;
        climbing.pre_motion(&Intents::empty(), 0.5);
        assert_eq!(climbing.velocity_y, 0.0);
    }

    #[test]
    fn test_jump_needs_ground_or_ladder() {
        let mut airborne = hero_body();
        airborne.pre_motion(&Intents::JUMP, 0.0);
        assert_eq!(airborne.velocity_y, 0.0);

        let mut grounded = hero_body();
        grounded.hero.as_mut().unwrap().touching_ground = true;
        grounded.pre_motion(&Intents::JUMP, 0.0);
        assert_eq!(grounded.velocity_y, 200.0);
        assert!(!grounded.hero().unwrap().is_touching_ground());
    }

    #[test]
    fn test_horizontal_intents() {
        let mut body = hero_body();
        body.velocity_x = 42.0;
        body.pre_motion(&Intents::empty(), 0.0);
        assert_eq!(body.velocity_x, 0.0);
        body.pre_motion(&Intents::LEFT, 0.0);
        assert_eq!(body.velocity_x, -100.0);
        body.pre_motion(&(Intents::LEFT | Intents::RIGHT), 0.0);
        assert_eq!(body.velocity_x, 100.0);
    }

    #[test]
    fn test_down_requests_step_down_and_climbs() {
        let mut body = hero_body();
        body.hero.as_mut().unwrap().colliding_with_ladder = true;
        body.pre_motion(&Intents::DOWN, 0.1);
        let hero = body.hero().unwrap();
        assert!(hero.wants_step_down());
        assert!(hero.is_climbing_ladder());
        assert_eq!(body.velocity_y, -100.0);

        body.post_motion();
        let hero = body.hero().unwrap();
        assert!(!hero.wants_step_down());
        // No ladder collision happened during the frame
        assert!(!hero.is_climbing_ladder());
    }
}

use collisions::{level, Intents, World};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const FRAME: f32 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let frames: u32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(600);

    let mut world = World::with_size(512.0, 512.0);
    let playground = match level::playground(&mut world) {
        Ok(playground) => playground,
        Err(err) => {
            error!(%err, "failed to build the playground");
            std::process::exit(1);
        }
    };

    for frame in 0..frames {
        // Walk right for two seconds, then left, and jump every so often
        let mut intents = if (frame / 120) % 2 == 0 {
            Intents::RIGHT
        } else {
            Intents::LEFT
        };
        if frame % 90 == 45 {
            intents |= Intents::JUMP;
        }
        world.set_input(intents);

        let report = world.update(FRAME);
        for id in &report.destroyed {
            info!(frame, entity = %id, "entity destroyed");
        }
        for err in &report.errors {
            error!(frame, %err, "frame error");
        }

        if frame % 60 == 0 {
            let hero = world.entity(playground.hero);
            info!(
                frame,
                hero = ?hero.map(|entity| entity.position()),
                grounded = hero.and_then(|entity| entity.hero()).map_or(false, |hero| hero.is_touching_ground()),
                nodes = world.quadtree().node_count(),
                live = world.live_count(),
                "tick"
            );
        }
    }
}

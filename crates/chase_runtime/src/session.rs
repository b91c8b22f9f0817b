//! Headless session driver
//!
//! Boots the services, builds a [`World`] and steers the player with a
//! simple autopilot until the game completes, the player is caught with no
//! restarts left, or the tick budget runs out.

use crate::boot_config::BootConfig;
use chase_event::{EventBus, Priority};
use chase_gamestate::{LevelState, ScorePayload};
use chase_physics::PhysicsWorld;
use chase_services::prelude::*;
use chase_world::prelude::*;
use std::sync::Arc;

/// Fixed simulation step
pub const TICK: f32 = 1.0 / 60.0;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    GameOver,
    OutOfTicks,
    /// The world could not be built
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: Outcome,
    pub ticks: u64,
    pub points: u32,
    pub restarts: u32,
}

/// Steer toward the open portal, else the nearest collectible
pub fn autopilot<P, S>(world: &World<P, S>) -> PlayerInput
where
    P: chase_physics::PhysicsBackend,
    S: SceneGraph,
{
    let Some(position) = world.player_position() else {
        return PlayerInput::default();
    };
    match world.portal_position().or_else(|| world.nearest_collectible()) {
        Some(target) => PlayerInput::toward(position, world.player_heading(), target),
        None => PlayerInput::default(),
    }
}

/// Level data: remote first, then the local file
fn load_blocks(config: &BootConfig) -> Vec<BlockRecord> {
    let local = LocalBlockSource::new(&config.blocks_file);
    if config.offline {
        return local.fetch_blocks().unwrap_or_else(|e| {
            log::warn!("No level data from {}: {}", local.name(), e);
            Vec::new()
        });
    }
    FallbackBlockSource::new(Box::new(RemoteBlockSource::new(&config.api)), Box::new(local)).load()
}

/// Subscribers that stand in for the HUD and score submission
fn subscribe(bus: &mut EventBus, scores: Arc<dyn ScoreService + Send + Sync>) {
    bus.subscribe::<GameEvent, _>(|event| match event {
        GameEvent::LevelChanged { level } => log::info!("[hud] Level {}", level),
        GameEvent::Collected {
            level,
            level_points,
            cumulative_points,
            ..
        } => log::info!(
            "[hud] Level {} points: {} | total: {}",
            level,
            level_points,
            cumulative_points
        ),
        GameEvent::PortalOpened { position, .. } => log::info!("[hud] Portal open at {:?}", position),
        GameEvent::GameOver { level, points } => {
            log::info!("[hud] Game over in level {} with {} points", level, points.total)
        }
        GameEvent::GameComplete { payload, .. } => {
            log::info!("[hud] Complete! {} points", payload.total_points)
        }
    });

    // After the HUD has shown the final score
    bus.subscribe_with_priority::<GameEvent, _>(
        move |event| {
            if let GameEvent::GameComplete { payload, .. } = event {
                submit(scores.as_ref(), payload);
            }
        },
        Priority::Low,
    );
}

fn submit(scores: &dyn ScoreService, payload: &ScorePayload) {
    match scores.save_score(payload) {
        Some(entry) => log::info!(
            "Score of {} saved for {}",
            entry.total_points,
            entry.username.as_deref().unwrap_or("anonymous")
        ),
        None => log::info!("Score not saved"),
    }
    for (rank, entry) in scores.ranking(5).iter().enumerate() {
        log::info!(
            "  #{} {} {}",
            rank + 1,
            entry.username.as_deref().unwrap_or("anonymous"),
            entry.total_points
        );
    }
}

/// Run one session to completion
pub fn run(config: &BootConfig) -> RunSummary {
    let mut world_config = config.world_config();

    let scores: Arc<dyn ScoreService + Send + Sync> = if config.offline {
        Arc::new(NullScoreService)
    } else {
        let health = check_health(&config.api);
        log::info!("Backend health: {:?} (score {:.2})", health.state, health.health_score);

        let catalog = LevelCatalog::new(&config.api);
        let ids: Vec<u32> = world_config.levels.iter().map(|l| l.id).collect();
        for id in ids {
            let target = catalog.coins_count(id);
            if let Some(level) = world_config.levels.get_mut(id) {
                level.dynamic_target = target;
            }
        }
        Arc::new(HttpScoreService::new(&config.api))
    };

    let blocks = load_blocks(config);
    log::info!("{} level data records", blocks.len());

    let resources = match ResourceSet::load(ResourceManifest::builtin(), ResourceSet::REQUIRED) {
        Ok(resources) => resources,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return RunSummary {
                outcome: Outcome::Aborted,
                ticks: 0,
                points: 0,
                restarts: 0,
            };
        }
    };

    let physics = PhysicsWorld::new(world_config.physics.clone());
    let mut world = World::new(world_config, physics, InMemoryScene::new(), resources, blocks);
    let mut bus = EventBus::new();
    subscribe(&mut bus, scores);

    world.start();
    let mut restarts = 0;
    let mut ticks = 0;
    let outcome = loop {
        if ticks >= config.ticks {
            break Outcome::OutOfTicks;
        }
        let input = autopilot(&world);
        world.tick(TICK, input);
        ticks += 1;

        for event in world.drain_events() {
            bus.publish(event);
        }
        bus.process();

        match world.state() {
            LevelState::GameComplete => break Outcome::Completed,
            LevelState::GameOver { .. } if restarts < config.restarts => {
                restarts += 1;
                log::info!("Restarting ({} of {})", restarts, config.restarts);
                world.restart();
            }
            LevelState::GameOver { .. } => break Outcome::GameOver,
            _ => {}
        }
    };

    RunSummary {
        outcome,
        ticks,
        points: world.session().cumulative_points(),
        restarts,
    }
}

//! The world orchestrator
//!
//! [`World`] owns every subsystem of a session and runs them in a fixed
//! order each tick:
//!
//! 1. deferred steps that have come due
//! 2. player input
//! 3. physics step and visual sync
//! 4. enemy pursuit and collision
//! 5. collectible pickups
//! 6. portal entry
//! 7. state changes raised by 4-6 (game over wins over portal entry)
//!
//! Nothing here waits on wall-clock time. Delays are deferred steps queued
//! against simulated time, and every teardown cancels the level's steps, so
//! a step scheduled for one level can never run in another.

use crate::config::WorldConfig;
use crate::events::GameEvent;
use crate::lifecycle::{block_offset, EntityKind, EntityLifecycleManager};
use crate::placer::{AnnulusSampler, Footprint, PlacementRequest, SpatialPlacer};
use crate::player::{PlayerController, PlayerInput};
use crate::resources::ResourceSet;
use crate::scene::SceneGraph;
use crate::schedule::{DeferredStep, SpawnContext, StepScheduler};
use chase_ai::steering::clamp_planar_speed;
use chase_ai::PursuitController;
use chase_core::math::length;
use chase_core::{EntityId, Result};
use chase_event::EventChannel;
use chase_gamestate::{
    BuildingSource, CollectibleKind, CollectibleRegistry, GameSession, LevelId, LevelSpec, LevelState,
    LevelStateMachine, Role, ScorePayload, ScriptedCollectible,
};
use chase_physics::PhysicsBackend;
use chase_services::BlockRecord;
use chase_triggers::{ProximityTrigger, TriggerMode, TriggerSystem, TriggerVolume};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Height of the portal's entry cylinder
const PORTAL_HEIGHT: f32 = 20.0;

/// An enemy and its pursuit state
#[derive(Debug, Clone)]
struct Enemy {
    id: EntityId,
    controller: PursuitController,
}

/// Requests raised during a tick, resolved at its end
#[derive(Debug, Default)]
struct TickEffects {
    caught: bool,
    portal_entered: bool,
}

/// One game session
pub struct World<P: PhysicsBackend, S: SceneGraph> {
    config: WorldConfig,
    resources: ResourceSet,
    blocks: Vec<BlockRecord>,
    offset: [f32; 3],
    lifecycle: EntityLifecycleManager<P, S>,
    placer: SpatialPlacer,
    registry: CollectibleRegistry,
    session: GameSession,
    machine: LevelStateMachine,
    scheduler: StepScheduler,
    /// Clock driving the scheduler, in fractional milliseconds
    clock_ms: f64,
    pickups: TriggerSystem,
    portal_trigger: TriggerSystem,
    pickups_enabled: bool,
    enemies: Vec<Enemy>,
    player: Option<EntityId>,
    player_ctl: PlayerController,
    portal: Option<EntityId>,
    rng: ChaCha8Rng,
    events: EventChannel<GameEvent>,
}

impl<P: PhysicsBackend, S: SceneGraph> World<P, S> {
    /// Build a world over `physics` and `scene`
    ///
    /// `blocks` is level data for block-built levels and scripted
    /// collectibles; it may be empty.
    pub fn new(config: WorldConfig, physics: P, scene: S, resources: ResourceSet, blocks: Vec<BlockRecord>) -> Self {
        let recenter = config
            .levels
            .iter()
            .find_map(|spec| match spec.buildings {
                BuildingSource::Blocks { recenter_beyond, .. } => Some(recenter_beyond),
                BuildingSource::Procedural(_) => None,
            })
            .unwrap_or(f32::INFINITY);
        let offset = block_offset(&blocks, recenter);
        if offset != [0.0; 3] {
            log::info!("Level data recentred by {:?}", offset);
        }

        let first = config.levels.first().unwrap_or(1);
        Self {
            resources,
            blocks,
            offset,
            lifecycle: EntityLifecycleManager::new(physics, scene),
            placer: SpatialPlacer::new(config.placement),
            registry: CollectibleRegistry::new(config.collectible.points_per_item),
            session: GameSession::new(first),
            machine: LevelStateMachine::new(),
            scheduler: StepScheduler::new(),
            clock_ms: 0.0,
            pickups: TriggerSystem::new(),
            portal_trigger: TriggerSystem::new(),
            pickups_enabled: false,
            enemies: Vec::new(),
            player: None,
            player_ctl: PlayerController::new(config.player.clone()),
            portal: None,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            events: EventChannel::new(),
            config,
        }
    }

    /// Spawn the first level and begin play
    pub fn start(&mut self) {
        if self.machine.current() != LevelState::Loading || self.player.is_some() {
            log::warn!("start() ignored in {:?}", self.machine.current());
            return;
        }
        self.begin_session(SpawnContext::Start);
    }

    /// Back to level 1 after game over or completion
    ///
    /// Returns false, changing nothing, while a session is still running.
    pub fn restart(&mut self) -> bool {
        if let Err(e) = self.machine.restart() {
            log::warn!("Restart refused: {}", e);
            return false;
        }
        self.scheduler.cancel_all();
        self.clear_level_state();
        let removed = self.lifecycle.teardown_all();
        self.player = None;
        self.registry.clear();
        self.session.reset(self.config.levels.first().unwrap_or(1));
        self.pickups_enabled = false;
        log::info!("Restarting: {} entities removed", removed);

        self.begin_session(SpawnContext::Restart);
        true
    }

    fn begin_session(&mut self, context: SpawnContext) {
        let Some(first) = self.config.levels.first() else {
            log::error!("Level table is empty; nothing to play");
            return;
        };
        self.player_ctl.reset();
        self.lifecycle.spawn_floor(&self.config.floor);
        self.player = Some(self.lifecycle.spawn_player(&self.config.player));

        let pickup_delay = match context {
            SpawnContext::Restart => self.config.delays.pickup_after_restart,
            _ => self.config.delays.pickup_after_start,
        };
        self.scheduler.schedule(0, DeferredStep::SpawnLevel { level: first, context });
        self.scheduler.schedule(pickup_delay, DeferredStep::EnablePickup);
        self.run_due_steps();
    }

    /// Advance the session by `delta_time` seconds
    pub fn tick(&mut self, delta_time: f32, input: PlayerInput) {
        let state = self.machine.current();
        if state.is_terminal() || state == LevelState::Loading {
            return;
        }

        self.clock_ms += f64::from(delta_time) * 1000.0;
        let now = self.clock_ms as u64;
        self.scheduler.advance(now.saturating_sub(self.scheduler.now_ms()));
        self.run_due_steps();

        let playing = self.machine.current().is_playing();
        if playing {
            self.drive_player(input, delta_time);
        }
        let contacts = self.lifecycle.step(delta_time);

        let mut effects = TickEffects::default();
        if playing {
            self.update_enemies(&contacts, &mut effects);
            self.update_pickups();
            self.update_portal(&mut effects);
        }
        self.session.tick(f64::from(delta_time));
        self.resolve(effects);
    }

    fn run_due_steps(&mut self) {
        for step in self.scheduler.take_due() {
            log::debug!("Running {:?}", step);
            match step {
                DeferredStep::SpawnLevel { level, context } => self.spawn_level(level, context),
                DeferredStep::SpawnEnemies { level } => self.spawn_enemies(level),
                DeferredStep::SpawnCollectible { level } => self.spawn_dynamic_collectible(level),
                DeferredStep::EnablePickup => {
                    self.pickups_enabled = true;
                    log::debug!("Pickups enabled");
                }
            }
        }
    }

    fn drive_player(&mut self, input: PlayerInput, delta_time: f32) {
        let Some(player) = self.player else {
            return;
        };
        let force = self.player_ctl.apply(input, delta_time);
        absorb(self.lifecycle.apply_force(player, force), "player force");
        absorb(self.lifecycle.set_yaw(player, self.player_ctl.heading()), "player yaw");

        if let Some(velocity) = self.lifecycle.velocity(player) {
            let (capped, clamped) = clamp_planar_speed(velocity, self.config.player.max_speed);
            if clamped {
                absorb(self.lifecycle.set_velocity(player, capped), "player speed cap");
            }
        }
    }

    fn update_enemies(&mut self, contacts: &[(EntityId, EntityId)], effects: &mut TickEffects) {
        let (Some(player), Some(target)) = (self.player, self.player_position()) else {
            return;
        };
        let target_radius = self.config.player.radius;

        for enemy in &mut self.enemies {
            let Some(position) = self.lifecycle.position(enemy.id) else {
                continue;
            };
            let velocity = self.lifecycle.velocity(enemy.id).unwrap_or_default();
            let cmd = enemy.controller.update(position, velocity, target);
            if let Some(velocity) = cmd.velocity {
                absorb(self.lifecycle.set_velocity(enemy.id, velocity), "enemy velocity");
            }
            if let Some(force) = cmd.force {
                absorb(self.lifecycle.apply_force(enemy.id, force), "enemy force");
            }
            if let Some(yaw) = cmd.yaw {
                absorb(self.lifecycle.set_yaw(enemy.id, yaw), "enemy yaw");
            }

            let bumped = contacts
                .iter()
                .any(|&(a, b)| (a == enemy.id && b == player) || (a == player && b == enemy.id));
            if enemy
                .controller
                .check_collision_with_target(position, target, target_radius, bumped)
            {
                log::info!("Enemy {} caught the player", enemy.id);
                effects.caught = true;
            }
        }
    }

    fn update_pickups(&mut self) {
        if !self.pickups_enabled {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        let Some(position) = self.lifecycle.position(player) else {
            return;
        };
        let speed = self.lifecycle.velocity(player).map_or(0.0, length);

        for event in self.pickups.update(player.raw(), position, speed) {
            if event.is_enter() {
                self.collect(EntityId::from_raw(event.trigger));
            }
        }
    }

    fn collect(&mut self, id: EntityId) {
        self.pickups.unregister(id.raw());
        self.lifecycle.despawn(id);
        let Some(record) = self.registry.record_collection(id) else {
            return;
        };
        self.session.award(record.level, record.points);
        log::info!(
            "Collected {} ({:?}) in level {}: {} level points, {} total",
            id,
            record.kind,
            record.level,
            record.level_points,
            record.cumulative_points
        );
        self.events.send(GameEvent::Collected {
            id,
            level: record.level,
            kind: record.kind,
            level_points: record.level_points,
            cumulative_points: record.cumulative_points,
        });

        if record.kind == CollectibleKind::Dynamic {
            let remaining = self.registry.progress(record.level).map_or(0, |p| p.dynamic_remaining());
            if remaining > 0 {
                self.scheduler.schedule(
                    self.config.delays.collectible_after_collection,
                    DeferredStep::SpawnCollectible { level: record.level },
                );
            }
        }
    }

    fn update_portal(&mut self, effects: &mut TickEffects) {
        let (Some(player), Some(_)) = (self.player, self.portal) else {
            return;
        };
        let Some(position) = self.lifecycle.position(player) else {
            return;
        };
        let speed = self.lifecycle.velocity(player).map_or(0.0, length);
        if self.portal_trigger.update(player.raw(), position, speed).iter().any(|e| e.is_enter()) {
            effects.portal_entered = true;
        }
    }

    fn resolve(&mut self, effects: TickEffects) {
        if effects.caught {
            self.game_over();
            return;
        }
        if effects.portal_entered {
            self.enter_portal();
            return;
        }
        if let LevelState::LevelActive(level) = self.machine.current() {
            if self.registry.is_level_complete(level) {
                self.open_portal(level);
            }
        }
    }

    fn game_over(&mut self) {
        let level = self.machine.current().level().unwrap_or_default();
        if let Err(e) = self.machine.on_enemy_collision() {
            log::warn!("Enemy collision ignored: {}", e);
            return;
        }
        if let Some(player) = self.player {
            absorb(self.lifecycle.freeze(player), "freeze player");
        }
        self.session.mark_game_over();
        let cancelled = self.scheduler.cancel_all();
        log::info!(
            "Game over in level {} with {} points ({} pending steps cancelled)",
            level,
            self.session.cumulative_points(),
            cancelled
        );
        self.events.send(GameEvent::GameOver {
            level,
            points: self.session.points().clone(),
        });
    }

    fn open_portal(&mut self, level: LevelId) {
        let next = self.config.levels.next(level);
        if let Err(e) = self.machine.on_level_complete(next) {
            log::warn!("Portal not opened: {}", e);
            return;
        }

        let center = self.player_position().unwrap_or(self.config.player.spawn);
        let portal = &self.config.portal;
        let mut candidates = AnnulusSampler::ring(center, portal.distance, 0.0);
        let request = PlacementRequest::new(portal.radius, portal.min_separation, portal.max_attempts);
        let existing = self.lifecycle.footprints(level);
        let placement = self.placer.place(request, &mut candidates, &existing, &mut self.rng);
        if let Some(e) = placement.exhausted() {
            log::warn!("Portal in level {}: {}", level, e);
        }

        match self.lifecycle.spawn_portal(level, placement.position, portal.radius, &self.resources) {
            Ok(id) => {
                let trigger = ProximityTrigger::new(TriggerVolume::cylinder(portal.radius, PORTAL_HEIGHT), placement.position);
                self.portal_trigger.register(id.raw(), trigger);
                self.portal = Some(id);
                log::info!("Level {} complete; portal open at {:?}", level, placement.position);
                self.events.send(GameEvent::PortalOpened {
                    level,
                    position: placement.position,
                });
            }
            Err(e) => log::error!("Portal for level {} could not spawn: {}", level, e),
        }
    }

    fn enter_portal(&mut self) {
        match self.machine.on_portal_entered() {
            Ok(LevelState::GameComplete) => self.complete(),
            Ok(LevelState::Transitioning { from, to: Some(to), .. }) => self.transition(from, to),
            Ok(other) => log::warn!("Unexpected state after portal entry: {:?}", other),
            Err(e) => log::warn!("Portal entry ignored: {}", e),
        }
    }

    fn complete(&mut self) {
        self.session.mark_complete();
        if let Some(player) = self.player {
            absorb(self.lifecycle.freeze(player), "freeze player");
        }
        self.scheduler.cancel_all();
        self.portal_trigger.clear();

        let points = self.session.points().clone();
        let payload = ScorePayload::from_breakdown(&points, self.session.game_time_secs());
        log::info!(
            "Game complete: {} points in {:?} s",
            payload.total_points,
            payload.game_time
        );
        self.events.send(GameEvent::GameComplete { payload, points });
    }

    /// Remove level `from` and queue level `to`
    fn transition(&mut self, from: LevelId, to: LevelId) {
        self.scheduler.cancel_level_steps();
        self.clear_level_state();
        self.lifecycle.teardown_level(from);

        if let Some(player) = self.player {
            absorb(self.lifecycle.teleport(player, self.config.player.spawn), "reset player");
            absorb(self.lifecycle.freeze(player), "freeze player");
        }
        self.player_ctl.reset();

        if let Err(e) = self.machine.on_teardown_complete() {
            log::error!("Transition to level {} stalled: {}", to, e);
            return;
        }
        self.scheduler.schedule(
            self.config.delays.settle,
            DeferredStep::SpawnLevel {
                level: to,
                context: SpawnContext::Transition,
            },
        );
    }

    fn clear_level_state(&mut self) {
        self.pickups.clear();
        self.portal_trigger.clear();
        self.portal = None;
        self.enemies.clear();
    }

    fn spawn_level(&mut self, level: LevelId, context: SpawnContext) {
        let expected = match context {
            SpawnContext::Transition => matches!(self.machine.current(), LevelState::Transitioning { to: Some(to), .. } if to == level),
            SpawnContext::Start | SpawnContext::Restart => self.machine.current() == LevelState::Loading,
        };
        if !expected {
            log::warn!("Not spawning level {} in {:?}", level, self.machine.current());
            return;
        }
        let Some(spec) = self.config.levels.get(level).cloned() else {
            log::error!("Level {} is not in the level table", level);
            return;
        };

        self.spawn_buildings(&spec);
        self.registry.reset_for_level(level);
        self.registry.set_dynamic_target(level, spec.dynamic_target);
        self.spawn_scripted_collectibles(level);

        let entered = match context {
            SpawnContext::Transition => self.machine.on_level_spawned().map(|_| ()),
            _ => self.machine.begin(level),
        };
        if let Err(e) = entered {
            log::error!("Level {} spawned but not entered: {}", level, e);
            return;
        }
        self.session.advance_to(level);
        log::info!("Level {} ({}) active", level, spec.name);
        self.events.send(GameEvent::LevelChanged { level });

        let delays = &self.config.delays;
        let (enemies, collectible) = match context {
            SpawnContext::Start => (delays.enemies_after_start, delays.collectible_after_start),
            SpawnContext::Transition => (delays.enemies_after_transition, delays.collectible_after_transition),
            SpawnContext::Restart => (delays.enemies_after_restart, delays.collectible_after_restart),
        };
        self.scheduler.schedule(enemies, DeferredStep::SpawnEnemies { level });
        self.scheduler.schedule(collectible, DeferredStep::SpawnCollectible { level });
    }

    fn spawn_buildings(&mut self, spec: &LevelSpec) {
        let shrink = self.config.placement.body_shrink;
        match &spec.buildings {
            BuildingSource::Blocks { scale, .. } => {
                let records: Vec<BlockRecord> = self
                    .blocks
                    .iter()
                    .filter(|r| !r.is_collectible() && r.level() == spec.id)
                    .cloned()
                    .collect();
                let report = self
                    .lifecycle
                    .spawn_block_buildings(spec.id, &records, self.offset, *scale, shrink, &self.resources);
                log::info!(
                    "Level {}: {} block buildings ({} skipped)",
                    spec.id,
                    report.spawned,
                    report.skipped
                );
                if spec.has_road {
                    self.spawn_road(spec.id);
                }
            }
            BuildingSource::Procedural(population) => {
                let center = self.player_position().unwrap_or(self.config.player.spawn);
                self.lifecycle.spawn_procedural_buildings(
                    spec.id,
                    population,
                    center,
                    shrink,
                    &self.placer,
                    &self.resources,
                    &mut self.rng,
                );
            }
        }
    }

    /// Road square covering the level's buildings
    fn spawn_road(&mut self, level: LevelId) {
        let Some((min, max)) = self.lifecycle.bounds(level, EntityKind::Building) else {
            log::debug!("Level {} has no buildings; no road", level);
            return;
        };
        let road = &self.config.road;
        let center = [(min[0] + max[0]) / 2.0, 0.0, (min[2] + max[2]) / 2.0];
        let extent = (max[0] - min[0]).max(max[2] - min[2]);
        let size = (extent + road.padding * 2.0).max(road.min_size);
        if let Err(e) = self.lifecycle.spawn_road(level, center, size, &self.resources) {
            log::warn!("Skipping road in level {}: {}", level, e);
        }
    }

    fn spawn_scripted_collectibles(&mut self, level: LevelId) {
        let footprint = self.config.collectible.footprint_radius;
        let records: Vec<BlockRecord> = self
            .blocks
            .iter()
            .filter(|r| r.is_collectible() && r.level() == level)
            .cloned()
            .collect();

        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let position = [record.x - self.offset[0], record.y, record.z - self.offset[2]];
            let kind = EntityKind::ScriptedCollectible;
            let id = match self.lifecycle.spawn_collectible(level, kind, position, footprint, &self.resources) {
                Ok(id) => id,
                Err(e) => {
                    log::warn!("Skipping collectible '{}': {}", record.name, e);
                    continue;
                }
            };
            self.register_pickup(id, position);
            items.push(ScriptedCollectible {
                id,
                name: record.name.clone(),
                level,
                role: Role::from_wire(record.role.as_deref()),
                position,
            });
        }
        self.registry.load_scripted(level, &items);
    }

    fn register_pickup(&mut self, id: EntityId, position: [f32; 3]) {
        let cfg = &self.config.collectible;
        let trigger = ProximityTrigger::new(TriggerVolume::sphere(cfg.pickup_radius), position)
            .with_mode(TriggerMode::OneShot)
            .with_min_speed(cfg.pickup_min_speed);
        self.pickups.register(id.raw(), trigger);
    }

    fn spawn_enemies(&mut self, level: LevelId) {
        if self.machine.current() != LevelState::LevelActive(level) {
            log::debug!("Enemies for level {} not spawned in {:?}", level, self.machine.current());
            return;
        }
        let Some(spec) = self.config.levels.get(level).cloned() else {
            return;
        };
        let center = self.player_position().unwrap_or(self.config.player.spawn);
        let enemy_cfg = self.config.enemy.clone();
        let radius = enemy_cfg.pursuit.body_radius;
        let request = PlacementRequest::new(radius, enemy_cfg.min_separation, enemy_cfg.max_attempts);
        // Enemies carry no footprint of their own; keep this batch apart
        let mut existing = self.lifecycle.footprints(level);

        for index in 0..spec.enemy_count as usize {
            let Some(model) = spec.enemy_model(index) else {
                log::warn!("Level {} has no enemy models", level);
                break;
            };
            let mut candidates = AnnulusSampler::ring(center, enemy_cfg.spawn_distance, enemy_cfg.spawn_height);
            let placement = self.placer.place(request, &mut candidates, &existing, &mut self.rng);
            if let Some(e) = placement.exhausted() {
                log::warn!("Enemy in level {}: {}", level, e);
            }
            match self.lifecycle.spawn_enemy(level, model, placement.position, &enemy_cfg, &self.resources) {
                Ok(id) => {
                    existing.push(Footprint::new(placement.position, radius));
                    self.enemies.push(Enemy {
                        id,
                        controller: PursuitController::new(enemy_cfg.pursuit.clone()),
                    });
                }
                Err(e) => log::warn!("Skipping enemy {}: {}", model, e),
            }
        }
        log::info!("Level {}: {} enemies spawned", level, self.enemies.len());
    }

    fn spawn_dynamic_collectible(&mut self, level: LevelId) {
        if self.machine.current() != LevelState::LevelActive(level) {
            log::debug!("Collectible for level {} not spawned in {:?}", level, self.machine.current());
            return;
        }
        let remaining = self.registry.progress(level).map_or(0, |p| p.dynamic_remaining());
        if remaining == 0 || !self.live_dynamic(level).is_empty() {
            return;
        }

        let cfg = &self.config.collectible;
        let center = self.player_position().unwrap_or(self.config.player.spawn);
        let mut candidates = AnnulusSampler::new(center, cfg.spawn_inner_radius, cfg.spawn_outer_radius, cfg.spawn_height);
        let request = PlacementRequest::new(cfg.footprint_radius, cfg.min_separation, cfg.max_attempts);
        let existing = self.lifecycle.footprints(level);
        let placement = self.placer.place(request, &mut candidates, &existing, &mut self.rng);
        if let Some(e) = placement.exhausted() {
            log::warn!("Collectible in level {}: {}", level, e);
        }

        let footprint = cfg.footprint_radius;
        let kind = EntityKind::DynamicCollectible;
        match self.lifecycle.spawn_collectible(level, kind, placement.position, footprint, &self.resources) {
            Ok(id) => {
                self.registry.register_dynamic(level, id);
                self.register_pickup(id, placement.position);
                log::debug!("Dynamic collectible {} at {:?} ({} to go)", id, placement.position, remaining);
            }
            Err(e) => log::error!("Dynamic collectible for level {} could not spawn: {}", level, e),
        }
    }

    fn live_dynamic(&self, level: LevelId) -> Vec<EntityId> {
        self.lifecycle.entities(level, EntityKind::DynamicCollectible)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn state(&self) -> LevelState {
        self.machine.current()
    }

    pub fn state_machine(&self) -> &LevelStateMachine {
        &self.machine
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn registry(&self) -> &CollectibleRegistry {
        &self.registry
    }

    pub fn lifecycle(&self) -> &EntityLifecycleManager<P, S> {
        &self.lifecycle
    }

    pub fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    pub fn pickups_enabled(&self) -> bool {
        self.pickups_enabled
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn player_position(&self) -> Option<[f32; 3]> {
        self.lifecycle.position(self.player?)
    }

    pub fn player_heading(&self) -> f32 {
        self.player_ctl.heading()
    }

    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies.iter().map(|e| e.id).collect()
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    pub fn portal_position(&self) -> Option<[f32; 3]> {
        self.lifecycle.position(self.portal?)
    }

    /// Live, uncollected collectibles of the current level with their positions
    pub fn collectibles(&self) -> Vec<(EntityId, [f32; 3])> {
        let Some(level) = self.machine.current().level() else {
            return Vec::new();
        };
        [EntityKind::ScriptedCollectible, EntityKind::DynamicCollectible]
            .into_iter()
            .flat_map(|kind| self.lifecycle.entities(level, kind))
            .filter_map(|id| Some((id, self.lifecycle.position(id)?)))
            .collect()
    }

    /// Nearest live collectible to the player
    pub fn nearest_collectible(&self) -> Option<[f32; 3]> {
        let from = self.player_position()?;
        self.collectibles()
            .into_iter()
            .map(|(_, p)| p)
            .min_by(|a, b| {
                let da = chase_core::math::planar_distance(from, *a);
                let db = chase_core::math::planar_distance(from, *b);
                da.total_cmp(&db)
            })
    }

    /// Put the player at `position` moving at `velocity`
    pub fn teleport_player(&mut self, position: [f32; 3], velocity: [f32; 3]) -> Result<()> {
        let player = self.player.ok_or(chase_core::Error::Handle(chase_core::HandleError::Null))?;
        self.lifecycle.teleport(player, position)?;
        self.lifecycle.set_velocity(player, velocity)
    }

    /// Events published since the last drain, oldest first
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }
}

/// Log a failed body operation and carry on
fn absorb(result: Result<()>, what: &str) {
    if let Err(e) = result {
        log::warn!("{} failed: {}", what, e);
    }
}

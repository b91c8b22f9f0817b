//! Entity lifecycle
//!
//! The lifecycle manager owns the physics backend and the scene graph. It is
//! the only code that adds or removes bodies and visuals, and it hands out
//! [`EntityId`]s instead of handles, so nothing outside can hold a body or
//! visual across a teardown.
//!
//! Every level-scoped entity is registered in its level's set when it is
//! created. Teardown walks that set; there is no scene traversal.

use crate::config::{EnemyConfig, FloorConfig, PlayerConfig};
use crate::placer::{footprint_radius, AnnulusSampler, Footprint, PlacementRequest, SpatialPlacer};
use crate::resources::{ModelInfo, ModelKey, ResourceSet};
use crate::scene::{SceneGraph, Visual, VisualHandle};
use chase_core::{EntityId, Error, HandleError, IdGenerator, Result};
use chase_gamestate::{BuildingPopulation, EnemyModel, LevelId};
use chase_physics::{BodyDesc, BodyHandle, ColliderShape, PhysicsBackend};
use chase_services::BlockRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::f32::consts::TAU;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Floor,
    Player,
    Building,
    Road,
    Enemy,
    ScriptedCollectible,
    DynamicCollectible,
    Portal,
}

impl EntityKind {
    pub fn is_collectible(&self) -> bool {
        matches!(self, Self::ScriptedCollectible | Self::DynamicCollectible)
    }
}

/// A live entity
#[derive(Debug, Clone)]
pub struct EntityRecord {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Owning level; `None` for session-scoped entities
    pub level: Option<LevelId>,
    pub model: ModelKey,
    /// Ground-plane radius other placements must keep clear of
    pub footprint: Option<f32>,
    /// Spawn position for static entities, last synced position otherwise
    pub position: [f32; 3],
    pub yaw: f32,
    body: Option<BodyHandle>,
    visual: Option<VisualHandle>,
}

impl EntityRecord {
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Outcome of a building batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub spawned: usize,
    /// Skipped for a missing model
    pub skipped: usize,
    pub relaxed: usize,
    pub degraded: usize,
    /// Separation violations summed over accepted placements
    pub violations: u32,
}

/// Offset that recentres block records on the origin
///
/// Zero when the records' centroid already lies within `beyond` of it.
pub fn block_offset(records: &[BlockRecord], beyond: f32) -> [f32; 3] {
    if records.is_empty() {
        return [0.0; 3];
    }
    let n = records.len() as f32;
    let cx = records.iter().map(|r| r.x).sum::<f32>() / n;
    let cz = records.iter().map(|r| r.z).sum::<f32>() / n;
    if (cx * cx + cz * cz).sqrt() <= beyond {
        [0.0; 3]
    } else {
        [cx, 0.0, cz]
    }
}

/// Solid box body matching a scaled model, shrunk by `shrink`
fn building_body(info: &ModelInfo, scale: f32, position: [f32; 3], yaw: f32, shrink: f32, kinematic: bool) -> Option<BodyDesc> {
    let size = info.size();
    let shape = ColliderShape::from_size(size[0] * scale * shrink, size[1] * scale * shrink, size[2] * scale * shrink);
    if !shape.is_valid() {
        return None;
    }
    let c = info.center();
    let (ox, oz) = (c[0] * scale, c[2] * scale);
    let (sin, cos) = yaw.sin_cos();
    let center = [
        position[0] + ox * cos + oz * sin,
        position[1] + c[1] * scale,
        position[2] - ox * sin + oz * cos,
    ];
    Some(BodyDesc::new(shape, 0.0, center, kinematic).with_yaw(yaw))
}

/// Spawns and despawns entities with their bodies and visuals
pub struct EntityLifecycleManager<P: PhysicsBackend, S: SceneGraph> {
    physics: P,
    scene: S,
    ids: IdGenerator,
    entities: BTreeMap<EntityId, EntityRecord>,
    by_level: BTreeMap<LevelId, BTreeSet<EntityId>>,
}

impl<P: PhysicsBackend, S: SceneGraph> EntityLifecycleManager<P, S> {
    pub fn new(physics: P, scene: S) -> Self {
        Self {
            physics,
            scene,
            ids: IdGenerator::new(),
            entities: BTreeMap::new(),
            by_level: BTreeMap::new(),
        }
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn(
        &mut self,
        kind: EntityKind,
        level: Option<LevelId>,
        model: ModelKey,
        visual: Option<Visual>,
        body: Option<BodyDesc>,
        footprint: Option<f32>,
        position: [f32; 3],
        yaw: f32,
    ) -> EntityId {
        let id = self.ids.next();
        let body = body.map(|desc| self.physics.add_body(desc.with_user_data(id.user_data())));
        let visual = visual.map(|v| self.scene.add_visual(v));

        self.entities.insert(
            id,
            EntityRecord {
                id,
                kind,
                level,
                model,
                footprint,
                position,
                yaw,
                body,
                visual,
            },
        );
        if let Some(level) = level {
            self.by_level.entry(level).or_default().insert(id);
        }
        log::trace!("Spawned {:?} {} at {:?}", kind, id, position);
        id
    }

    /// Ground box, top surface at y = 0
    pub fn spawn_floor(&mut self, config: &FloorConfig) -> EntityId {
        let half = config.thickness / 2.0;
        let position = [0.0, -half, 0.0];
        let body = BodyDesc::fixed(ColliderShape::cuboid(config.half_extent, half, config.half_extent))
            .with_position(position[0], position[1], position[2]);
        let visual = Visual::new(ModelKey::Floor, [0.0; 3]).with_scale(config.half_extent * 2.0);
        self.spawn(EntityKind::Floor, None, ModelKey::Floor, Some(visual), Some(body), None, position, 0.0)
    }

    pub fn spawn_player(&mut self, config: &PlayerConfig) -> EntityId {
        let [x, y, z] = config.spawn;
        let body = BodyDesc::dynamic(ColliderShape::sphere(config.radius))
            .with_position(x, y, z)
            .with_mass(config.mass)
            .with_damping(config.linear_damping, config.angular_damping)
            .with_locked_tilt();
        let visual = Visual::new(ModelKey::Player, config.spawn);
        self.spawn(EntityKind::Player, None, ModelKey::Player, Some(visual), Some(body), None, config.spawn, 0.0)
    }

    pub fn spawn_enemy(
        &mut self,
        level: LevelId,
        model: EnemyModel,
        position: [f32; 3],
        config: &EnemyConfig,
        resources: &ResourceSet,
    ) -> Result<EntityId> {
        let key = ModelKey::Enemy(model);
        resources.require(&key)?;
        let [x, y, z] = position;
        let body = BodyDesc::dynamic(ColliderShape::sphere(config.pursuit.body_radius))
            .with_position(x, y, z)
            .with_mass(config.mass)
            .with_damping(config.linear_damping, config.angular_damping)
            .with_locked_tilt();
        let visual = Visual::new(key.clone(), position);
        Ok(self.spawn(EntityKind::Enemy, Some(level), key, Some(visual), Some(body), None, position, 0.0))
    }

    /// Collectible visual; pickups are proximity checks, so there is no body
    pub fn spawn_collectible(
        &mut self,
        level: LevelId,
        kind: EntityKind,
        position: [f32; 3],
        footprint: f32,
        resources: &ResourceSet,
    ) -> Result<EntityId> {
        if !kind.is_collectible() {
            return Err(Error::InvariantViolation(format!("{:?} is not a collectible", kind)));
        }
        resources.require(&ModelKey::Cheese)?;
        let visual = Visual::new(ModelKey::Cheese, position);
        Ok(self.spawn(kind, Some(level), ModelKey::Cheese, Some(visual), None, Some(footprint), position, 0.0))
    }

    /// Portal visual; it never gets a body
    pub fn spawn_portal(&mut self, level: LevelId, position: [f32; 3], radius: f32, resources: &ResourceSet) -> Result<EntityId> {
        resources.require(&ModelKey::Portal)?;
        let visual = Visual::new(ModelKey::Portal, position);
        Ok(self.spawn(EntityKind::Portal, Some(level), ModelKey::Portal, Some(visual), None, Some(radius), position, 0.0))
    }

    /// Square road decoration centred on `center`
    pub fn spawn_road(&mut self, level: LevelId, center: [f32; 3], size: f32, resources: &ResourceSet) -> Result<EntityId> {
        resources.require(&ModelKey::Road)?;
        let position = [center[0], 0.01, center[2]];
        let visual = Visual::new(ModelKey::Road, position).with_scale(size);
        Ok(self.spawn(EntityKind::Road, Some(level), ModelKey::Road, Some(visual), None, None, position, 0.0))
    }

    /// Buildings from level data records, moved by `offset`
    ///
    /// Records are scripted positions; they do not go through the placer.
    pub fn spawn_block_buildings(
        &mut self,
        level: LevelId,
        records: &[BlockRecord],
        offset: [f32; 3],
        scale: f32,
        shrink: f32,
        resources: &ResourceSet,
    ) -> SpawnReport {
        let mut report = SpawnReport::default();
        for record in records.iter().filter(|r| !r.is_collectible()) {
            let key = ModelKey::Block(record.name.clone());
            let info = match resources.require(&key) {
                Ok(info) => info,
                Err(e) => {
                    log::warn!("Skipping block '{}': {}", record.name, e);
                    report.skipped += 1;
                    continue;
                }
            };
            let position = [
                record.x - offset[0],
                record.y + info.ground_offset(scale),
                record.z - offset[2],
            ];
            let body = building_body(&info, scale, position, 0.0, shrink, true);
            if body.is_none() {
                log::warn!("Block '{}' has a degenerate box; spawning without a body", record.name);
            }
            let visual = Visual::new(key.clone(), position).with_scale(scale);
            let radius = footprint_radius(info.size(), scale);
            self.spawn(EntityKind::Building, Some(level), key, Some(visual), body, Some(radius), position, 0.0);
            report.spawned += 1;
        }
        report
    }

    /// Buildings from a model pool, placed around `center`
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_procedural_buildings<R: Rng>(
        &mut self,
        level: LevelId,
        population: &BuildingPopulation,
        center: [f32; 3],
        shrink: f32,
        placer: &SpatialPlacer,
        resources: &ResourceSet,
        rng: &mut R,
    ) -> SpawnReport {
        let mut queue: Vec<_> = population
            .models
            .iter()
            .flat_map(|m| std::iter::repeat(*m).take(population.instances_per_model as usize))
            .collect();
        queue.shuffle(rng);

        let mut existing = self.footprints(level);
        let mut report = SpawnReport::default();

        for model in queue {
            let key = ModelKey::Building(model);
            let info = match resources.require(&key) {
                Ok(info) => info,
                Err(e) => {
                    log::warn!("Skipping building: {}", e);
                    report.skipped += 1;
                    continue;
                }
            };

            let scale = population.scale.scale_for(info.max_dimension());
            let radius = footprint_radius(info.size(), scale).max(population.min_footprint_radius);
            let mut candidates = AnnulusSampler::new(center, population.inner_radius, population.outer_radius, 0.0);
            let request = PlacementRequest::new(radius, population.min_separation, placer.config().max_attempts)
                .with_relaxed_factor(population.relaxed_factor);
            let placement = placer.place(request, &mut candidates, &existing, rng);

            if let Some(e) = placement.exhausted() {
                log::warn!("{} in level {}: {}", model, level, e);
                report.degraded += 1;
            } else if placement.relaxed {
                report.relaxed += 1;
            }
            report.violations += placement.violations;

            let yaw = if population.random_yaw { rng.gen::<f32>() * TAU } else { 0.0 };
            let position = [placement.position[0], info.ground_offset(scale), placement.position[2]];
            let body = building_body(&info, scale, position, yaw, shrink, false);
            let visual = Visual::new(key.clone(), position).with_scale(scale).with_yaw(yaw);
            self.spawn(EntityKind::Building, Some(level), key, Some(visual), body, Some(radius), position, yaw);

            existing.push(Footprint::new(position, radius));
            report.spawned += 1;
        }

        log::info!(
            "Level {}: {} buildings placed ({} relaxed, {} degraded, {} violations, {} skipped)",
            level,
            report.spawned,
            report.relaxed,
            report.degraded,
            report.violations,
            report.skipped
        );
        report
    }

    /// Remove an entity with its visual and body
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(record) = self.entities.remove(&id) else {
            return false;
        };
        if let Some(level) = record.level {
            if let Some(set) = self.by_level.get_mut(&level) {
                set.remove(&id);
            }
        }
        if let Some(visual) = record.visual {
            self.scene.remove_visual(visual);
        }
        if let Some(body) = record.body {
            self.physics.remove_body(body);
        }
        true
    }

    /// Remove every entity of `level`; returns how many were removed
    pub fn teardown_level(&mut self, level: LevelId) -> usize {
        let ids = self.by_level.remove(&level).unwrap_or_default();
        let mut removed = 0;
        for id in ids {
            if self.despawn(id) {
                removed += 1;
            }
        }
        log::info!("Level {} torn down: {} entities removed", level, removed);
        removed
    }

    /// Remove everything, session-scoped entities included
    pub fn teardown_all(&mut self) -> usize {
        let ids: Vec<EntityId> = self.entities.keys().copied().collect();
        let removed = ids.into_iter().filter(|id| self.despawn(*id)).count();
        self.by_level.clear();
        log::info!("All entities torn down: {} removed", removed);
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityRecord> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities of `kind` in `level`
    pub fn entities(&self, level: LevelId, kind: EntityKind) -> Vec<EntityId> {
        self.by_level
            .get(&level)
            .into_iter()
            .flatten()
            .filter(|id| self.entities.get(id).is_some_and(|r| r.kind == kind))
            .copied()
            .collect()
    }

    /// Live entities of `kind`, any level
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|r| r.kind == kind).count()
    }

    pub fn level_entity_count(&self, level: LevelId) -> usize {
        self.by_level.get(&level).map_or(0, BTreeSet::len)
    }

    /// Footprints in `level` that placement must avoid
    pub fn footprints(&self, level: LevelId) -> Vec<Footprint> {
        self.by_level
            .get(&level)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entities.get(id))
            .filter_map(|r| r.footprint.map(|radius| Footprint::new(r.position, radius)))
            .collect()
    }

    /// Ground-plane bounds of `kind` in `level` as (min, max)
    pub fn bounds(&self, level: LevelId, kind: EntityKind) -> Option<([f32; 3], [f32; 3])> {
        let mut ids = self.entities(level, kind).into_iter().filter_map(|id| self.entities.get(&id));
        let first = ids.next()?;
        let mut min = first.position;
        let mut max = first.position;
        for r in ids {
            for axis in 0..3 {
                min[axis] = min[axis].min(r.position[axis]);
                max[axis] = max[axis].max(r.position[axis]);
            }
        }
        Some((min, max))
    }

    fn body_of(&self, id: EntityId) -> Result<BodyHandle> {
        self.entities
            .get(&id)
            .and_then(|r| r.body)
            .ok_or(Error::Handle(HandleError::Stale))
    }

    pub fn position(&self, id: EntityId) -> Option<[f32; 3]> {
        let record = self.entities.get(&id)?;
        match record.body {
            Some(body) => self.physics.position(body),
            None => Some(record.position),
        }
    }

    pub fn velocity(&self, id: EntityId) -> Option<[f32; 3]> {
        self.physics.velocity(self.entities.get(&id)?.body?)
    }

    pub fn apply_force(&mut self, id: EntityId, force: [f32; 3]) -> Result<()> {
        let body = self.body_of(id)?;
        Ok(self.physics.apply_force(body, force)?)
    }

    pub fn set_velocity(&mut self, id: EntityId, velocity: [f32; 3]) -> Result<()> {
        let body = self.body_of(id)?;
        Ok(self.physics.set_velocity(body, velocity)?)
    }

    pub fn set_yaw(&mut self, id: EntityId, yaw: f32) -> Result<()> {
        let body = self.body_of(id)?;
        self.physics.set_yaw(body, yaw)?;
        if let Some(record) = self.entities.get_mut(&id) {
            record.yaw = yaw;
        }
        Ok(())
    }

    /// Move an entity, body and visual together
    pub fn teleport(&mut self, id: EntityId, position: [f32; 3]) -> Result<()> {
        let record = self.entities.get_mut(&id).ok_or(Error::Handle(HandleError::Stale))?;
        record.position = position;
        let (body, visual, yaw) = (record.body, record.visual, record.yaw);
        if let Some(body) = body {
            self.physics.set_position(body, position)?;
        }
        if let Some(visual) = visual {
            self.scene.set_transform(visual, position, yaw);
        }
        Ok(())
    }

    /// Zero an entity's velocity
    pub fn freeze(&mut self, id: EntityId) -> Result<()> {
        let body = self.body_of(id)?;
        Ok(self.physics.freeze(body)?)
    }

    /// Step physics and move visuals of moving entities to their bodies
    ///
    /// Returns the entity pairs whose bodies started touching during the step.
    pub fn step(&mut self, delta_time: f32) -> Vec<(EntityId, EntityId)> {
        self.physics.step(delta_time);
        let contacts: Vec<(EntityId, EntityId)> = self
            .physics
            .drain_contacts()
            .into_iter()
            .filter_map(|pair| {
                let a = EntityId::from_raw(u64::try_from(pair.user_data1).ok()?);
                let b = EntityId::from_raw(u64::try_from(pair.user_data2).ok()?);
                (self.entities.contains_key(&a) && self.entities.contains_key(&b)).then_some((a, b))
            })
            .collect();
        if !contacts.is_empty() {
            log::trace!("{} contacts started", contacts.len());
        }

        for record in self.entities.values_mut() {
            if !matches!(record.kind, EntityKind::Player | EntityKind::Enemy) {
                continue;
            }
            let Some(position) = record.body.and_then(|b| self.physics.position(b)) else {
                continue;
            };
            record.position = position;
            if let Some(visual) = record.visual {
                self.scene.set_transform(visual, position, record.yaw);
            }
        }
        contacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceManifest;
    use crate::scene::InMemoryScene;
    use chase_gamestate::{BuildingModel, LevelTable};
    use chase_physics::{PhysicsConfig, PhysicsWorld};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn manager() -> EntityLifecycleManager<PhysicsWorld, InMemoryScene> {
        EntityLifecycleManager::new(PhysicsWorld::new(PhysicsConfig::default()), InMemoryScene::new())
    }

    fn resources() -> ResourceSet {
        ResourceSet::load(ResourceManifest::builtin(), ResourceSet::REQUIRED).unwrap()
    }

    fn block(name: &str, x: f32, z: f32) -> BlockRecord {
        BlockRecord {
            name: name.into(),
            x,
            y: 0.0,
            z,
            level: None,
            role: None,
        }
    }

    #[test]
    fn test_block_offset() {
        let near = vec![block("a", 1.0, 1.0), block("b", -1.0, 3.0)];
        assert_eq!(block_offset(&near, 10.0), [0.0; 3]);

        let far = vec![block("a", 100.0, 0.0), block("b", 120.0, 20.0)];
        assert_eq!(block_offset(&far, 10.0), [110.0, 0.0, 10.0]);
        assert_eq!(block_offset(&[], 10.0), [0.0; 3]);
    }

    #[test]
    fn test_teardown_removes_bodies_and_visuals() {
        let mut m = manager();
        let res = resources();
        m.spawn_floor(&FloorConfig::default());
        m.spawn_player(&PlayerConfig::default());
        m.spawn_enemy(1, EnemyModel::Walk, [10.0, 1.0, 0.0], &EnemyConfig::default(), &res).unwrap();
        m.spawn_collectible(1, EntityKind::DynamicCollectible, [5.0, 0.3, 0.0], 0.5, &res).unwrap();
        m.spawn_block_buildings(1, &[block("house", 30.0, 30.0)], [0.0; 3], 0.05, 0.9, &res);

        assert_eq!(m.physics().body_count(), 4);
        assert_eq!(m.scene().visual_count(), 5);

        assert_eq!(m.teardown_level(1), 3);
        assert_eq!(m.physics().body_count(), 2, "floor and player stay");
        assert_eq!(m.scene().visual_count(), 2);
        assert_eq!(m.level_entity_count(1), 0);
        assert_eq!(m.scene().disposed_count(), 3);

        assert_eq!(m.teardown_all(), 2);
        assert_eq!(m.physics().body_count(), 0);
        assert_eq!(m.entity_count(), 0);
    }

    #[test]
    fn test_collectibles_from_blocks_are_not_buildings() {
        let mut m = manager();
        let records = vec![block("coin1", 0.0, 0.0), block("wall", 5.0, 5.0)];
        let report = m.spawn_block_buildings(1, &records, [0.0; 3], 0.05, 0.9, &resources());
        assert_eq!(report.spawned, 1);
        assert_eq!(m.entities(1, EntityKind::Building).len(), 1);
    }

    #[test]
    fn test_missing_model_skips_only_that_entity() {
        let mut manifest = ResourceManifest::builtin();
        manifest.remove(&ModelKey::Building(BuildingModel::OldCastle));
        let res = ResourceSet::load(manifest, ResourceSet::REQUIRED).unwrap();

        let table = LevelTable::default();
        let chase_gamestate::BuildingSource::Procedural(pop) = &table.get(2).unwrap().buildings else {
            panic!("level 2 is procedural");
        };
        let mut m = manager();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let report = m.spawn_procedural_buildings(2, pop, [0.0; 3], 0.9, &SpatialPlacer::default(), &res, &mut rng);

        assert_eq!(report.skipped, 15);
        assert_eq!(report.spawned, pop.total() - 15);
        assert_eq!(m.entities(2, EntityKind::Building).len(), report.spawned);
    }

    #[test]
    fn test_buildings_stand_on_ground() {
        let mut m = manager();
        let res = resources();
        m.spawn_block_buildings(1, &[block("tower", 0.0, 0.0)], [0.0; 3], 0.05, 0.9, &res);
        let id = m.entities(1, EntityKind::Building)[0];
        let record = m.get(id).unwrap();
        assert_eq!(record.position[1], 0.0, "grounded model has bbox min y = 0");
        assert!(record.has_body());
    }

    #[test]
    fn test_procedural_placement_respects_separation() {
        let table = LevelTable::default();
        let chase_gamestate::BuildingSource::Procedural(pop) = &table.get(3).unwrap().buildings else {
            panic!("level 3 is procedural");
        };
        let mut m = manager();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let report = m.spawn_procedural_buildings(3, pop, [0.0; 3], 0.9, &SpatialPlacer::default(), &resources(), &mut rng);

        let footprints = m.footprints(3);
        assert_eq!(footprints.len(), report.spawned);
        if report.relaxed == 0 && report.degraded == 0 {
            for (i, a) in footprints.iter().enumerate() {
                for b in &footprints[i + 1..] {
                    assert!(a.is_clear_of(b.position, b.radius, pop.min_separation));
                }
            }
        }
    }

    #[test]
    fn test_stale_entity_operations_fail_softly() {
        let mut m = manager();
        let id = m.spawn_player(&PlayerConfig::default());
        assert!(m.despawn(id));
        assert!(!m.despawn(id));
        assert!(m.apply_force(id, [1.0, 0.0, 0.0]).is_err());
        assert!(m.position(id).is_none());
    }

    #[test]
    fn test_step_reports_body_contacts() {
        let mut m = manager();
        let player = m.spawn_player(&PlayerConfig::default());
        let [x, y, z] = PlayerConfig::default().spawn;
        let enemy = m
            .spawn_enemy(1, EnemyModel::ALL[0], [x + 0.5, y, z], &EnemyConfig::default(), &resources())
            .unwrap();

        let contacts = m.step(0.05);
        assert!(
            contacts.iter().any(|&pair| pair == (player, enemy) || pair == (enemy, player)),
            "contacts: {:?}",
            contacts
        );
    }
}

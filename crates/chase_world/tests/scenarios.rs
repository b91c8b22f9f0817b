mod common;

use chase_core::math::{distance, planar_distance};
use chase_gamestate::{CollectibleKind, LevelState, LevelTable, Role, TransitionPhase};
use chase_world::prelude::*;
use common::*;

fn collect_all(world: &mut TestWorld) {
    for (_, position) in world.collectibles() {
        step_onto(world, position);
    }
}

#[test]
fn test_level_one_to_level_two() {
    let mut world = world(config(3, 1, 0), town_blocks());
    world.start();
    assert_eq!(world.state(), LevelState::LevelActive(1));
    assert_eq!(world.lifecycle().entities(1, EntityKind::Building).len(), 2);
    assert_eq!(world.lifecycle().entities(1, EntityKind::Road).len(), 1);
    assert_eq!(world.collectibles().len(), 3);

    // Pickups are gated for the first two seconds
    step_onto(&mut world, [5.0, 0.0, 0.0]);
    assert_eq!(world.registry().cumulative_points(), 0);

    run(&mut world, 2.1);
    assert!(world.pickups_enabled());
    let dynamic = world.lifecycle().entities(1, EntityKind::DynamicCollectible);
    assert_eq!(dynamic.len(), 1, "first dynamic collectible after one second");

    collect_all(&mut world);
    let progress = *world.registry().progress(1).unwrap();
    assert_eq!(progress.ordinary_collected, 2);
    assert!(progress.final_prize_collected);
    assert_eq!(progress.dynamic_collected, 1);
    assert_eq!(world.session().cumulative_points(), 4);

    let player = world.player_position().unwrap();
    let portal = world.portal_position().expect("portal opens once the level is complete");
    assert!((planar_distance(player, portal) - 12.0).abs() < 0.5);
    assert!(matches!(
        world.state(),
        LevelState::Transitioning { from: 1, to: Some(2), phase: TransitionPhase::PortalOpen }
    ));

    let events = world.drain_events();
    let collected = events.iter().filter(|e| matches!(e, GameEvent::Collected { .. })).count();
    assert_eq!(collected, 4);
    assert!(events.iter().any(|e| matches!(e, GameEvent::PortalOpened { level: 1, .. })));

    step_onto(&mut world, portal);
    assert_eq!(world.lifecycle().level_entity_count(1), 0, "level 1 is gone in the same tick");
    assert!(world.portal_position().is_none());

    run(&mut world, 0.2);
    assert_eq!(world.state(), LevelState::LevelActive(2));
    let phases: Vec<LevelState> = world.state_machine().history().iter().map(|t| t.to).collect();
    assert_eq!(phases.len(), 5, "begin, portal open, tear down, spawn, active: {:?}", phases);
    assert_eq!(phases[4], LevelState::LevelActive(2));
    assert_eq!(world.session().current_level(), 2);
    assert!(!world.lifecycle().entities(2, EntityKind::Building).is_empty());

    run(&mut world, 2.1);
    assert_eq!(world.enemy_count(), 3);
    assert_eq!(world.lifecycle().count_kind(EntityKind::Enemy), 3);
    assert_eq!(world.lifecycle().level_entity_count(1), 0, "nothing respawns into a torn down level");
    assert_eq!(world.lifecycle().entities(2, EntityKind::DynamicCollectible).len(), 1);
    assert!(world
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::LevelChanged { level: 2 })));
}

#[test]
fn test_second_pickup_of_same_item_is_ignored() {
    let mut world = world(config(1, 0, 0), town_blocks());
    world.start();
    run(&mut world, 2.1);
    let coin = world.collectibles()[0].0;

    step_onto(&mut world, [5.0, 0.0, 0.0]);
    assert_eq!(world.registry().cumulative_points(), 1);
    assert!(world.registry().is_collected(coin));
    step_onto(&mut world, [5.0, 0.0, 0.0]);
    step_onto(&mut world, [6.0, 0.0, 0.0]);
    step_onto(&mut world, [5.0, 0.0, 0.0]);
    assert_eq!(world.registry().cumulative_points(), 1);
    assert_eq!(world.collectibles().len(), 2);
}

#[test]
fn test_standing_still_collects_nothing() {
    let mut world = world(config(1, 0, 0), town_blocks());
    world.start();
    run(&mut world, 2.1);

    world.teleport_player([5.0, 0.0, 0.0], [0.0; 3]).unwrap();
    world.tick(DT, PlayerInput::default());
    assert_eq!(world.registry().cumulative_points(), 0);
}

#[test]
fn test_enemy_contact_ends_the_game_once() {
    let mut world = world(config(9, 1, 1), town_blocks());
    world.start();
    run(&mut world, 2.1);
    assert_eq!(world.enemy_count(), 1);
    world.drain_events();

    let enemy = world.enemy_ids()[0];
    let at = world.lifecycle().position(enemy).unwrap();
    world.teleport_player(at, [0.0; 3]).unwrap();
    world.tick(DT, PlayerInput::default());

    assert_eq!(world.state(), LevelState::GameOver { level: 1 });
    assert!(world.session().is_game_over());
    let player = world.player().unwrap();
    assert_eq!(world.lifecycle().velocity(player), Some([0.0; 3]));
    assert_eq!(world.scheduler().pending_count(), 0);

    run(&mut world, 3.0);
    let overs = world
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);
    assert_eq!(world.state(), LevelState::GameOver { level: 1 });
}

#[test]
fn test_restart_resets_everything() {
    let mut world = world(config(4, 1, 1), town_blocks());
    world.start();
    assert!(!world.restart(), "restart needs a finished session");

    run(&mut world, 2.1);
    step_onto(&mut world, [5.0, 0.0, 0.0]);
    assert_eq!(world.session().cumulative_points(), 1);

    let enemy = world.enemy_ids()[0];
    let at = world.lifecycle().position(enemy).unwrap();
    world.teleport_player(at, [0.0; 3]).unwrap();
    world.tick(DT, PlayerInput::default());
    assert!(world.state().is_terminal());

    assert!(world.restart());
    assert_eq!(world.state(), LevelState::LevelActive(1));
    assert_eq!(world.session().cumulative_points(), 0);
    assert_eq!(world.registry().cumulative_points(), 0);
    assert!(!world.session().is_game_over());
    assert!(!world.pickups_enabled());
    assert_eq!(world.enemy_count(), 0);
    assert_eq!(world.lifecycle().count_kind(EntityKind::Enemy), 0);
    assert_eq!(world.lifecycle().count_kind(EntityKind::Player), 1);
    assert_eq!(world.lifecycle().count_kind(EntityKind::Floor), 1);
    assert_eq!(world.collectibles().len(), 3, "scripted items are back");

    run(&mut world, 1.1);
    assert_eq!(world.enemy_count(), 1, "enemies follow one second after a restart");
    assert!(!world.pickups_enabled());
    run(&mut world, 1.0);
    assert!(world.pickups_enabled());
}

#[test]
fn test_final_portal_completes_the_game() {
    let mut table = LevelTable::default();
    let mut only = table.get(1).cloned().unwrap();
    only.dynamic_target = 0;
    only.enemy_count = 0;
    table = LevelTable::new(vec![only]);
    let config = WorldConfig::default().with_seed(2).with_levels(table);

    let blocks = vec![common::record("coin1", 3.0, 0.0, None)];
    let mut world = world(config, blocks);
    world.start();
    run(&mut world, 2.1);

    step_onto(&mut world, [3.0, 0.0, 0.0]);
    assert!(matches!(world.state(), LevelState::Transitioning { from: 1, to: None, .. }));
    let portal = world.portal_position().unwrap();
    step_onto(&mut world, portal);

    assert_eq!(world.state(), LevelState::GameComplete);
    assert!(world.session().is_complete());
    let complete = world
        .drain_events()
        .into_iter()
        .find_map(|e| match e {
            GameEvent::GameComplete { payload, .. } => Some(payload),
            _ => None,
        })
        .expect("game complete event");
    assert_eq!(complete.total_points, 1);
    assert_eq!(complete.points_by_level.level1, 1);
    assert_eq!(complete.game_time, Some(2));

    let elapsed = world.session().elapsed();
    run(&mut world, 1.0);
    assert_eq!(world.session().elapsed(), elapsed, "the clock stops at completion");
}

#[test]
fn test_dynamic_collectibles_respawn_until_target() {
    let mut world = world(config(12, 2, 0), Vec::new());
    world.start();
    assert!(world.collectibles().is_empty());
    run(&mut world, 2.1);

    for expected in 1..=2 {
        let (id, position) = world.collectibles()[0];
        step_onto(&mut world, position);
        assert!(!world.lifecycle().contains(id));
        assert_eq!(world.registry().progress(1).unwrap().dynamic_collected, expected);
        run(&mut world, 0.6);
    }
    assert!(world.lifecycle().entities(1, EntityKind::DynamicCollectible).is_empty());
    assert!(world.portal_position().is_some());

    let kinds: Vec<CollectibleKind> = world
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::Collected { kind, .. } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![CollectibleKind::Dynamic, CollectibleKind::Dynamic]);
    assert!(!kinds.contains(&CollectibleKind::Scripted(Role::FinalPrize)));
}

#[test]
fn test_dynamic_spawns_stay_in_annulus() {
    for seed in 0..16 {
        let mut world = world(config(seed, 1, 0), Vec::new());
        world.start();
        run(&mut world, 1.1);

        let spawn = world.config().player.spawn;
        let (_, position) = world.collectibles()[0];
        let d = planar_distance(spawn, position);
        assert!((79.99..=100.01).contains(&d), "seed {}: distance {}", seed, d);
        assert_eq!(position[1], 0.3);
    }
}

#[test]
fn test_same_seed_same_world() {
    let layout = |seed| {
        let mut world = world(config(seed, 1, 0), Vec::new());
        world.start();
        run(&mut world, 1.1);
        world.collectibles()[0].1
    };
    assert_eq!(layout(21), layout(21));
}

#[test]
fn test_pickup_gate_survives_an_early_transition() {
    let mut config = config(1, 0, 0);
    if let Some(level) = config.levels.get_mut(2) {
        level.enemy_count = 0;
    }
    let mut world = world(config, Vec::new());
    world.start();
    world.tick(DT, PlayerInput::default());
    let portal = world.portal_position().expect("an empty level is complete at once");
    step_onto(&mut world, portal);
    assert!(!world.pickups_enabled());
    assert!(world.scheduler().is_pending(&DeferredStep::EnablePickup));

    run(&mut world, 2.5);
    assert_eq!(world.state(), LevelState::LevelActive(2));
    assert!(world.pickups_enabled(), "the gate opens two seconds after start");

    let (_, position) = world.collectibles()[0];
    step_onto(&mut world, position);
    assert_eq!(world.registry().progress(2).unwrap().dynamic_collected, 1);
}

#[test]
fn test_enemies_spawn_clear_of_buildings() {
    let mut spec = LevelTable::default().get(2).cloned().unwrap();
    spec.enemy_count = 5;
    let level = spec.id;

    for seed in 0..20 {
        let config = WorldConfig::default().with_seed(seed).with_levels(LevelTable::new(vec![spec.clone()]));
        let radius = config.enemy.pursuit.body_radius;
        let mut world = world(config, Vec::new());
        world.start();
        assert!(!world.lifecycle().entities(level, EntityKind::Building).is_empty());

        for _ in 0..300 {
            if world.enemy_count() > 0 {
                break;
            }
            world.tick(DT, PlayerInput::default());
        }
        assert_eq!(world.enemy_count(), 5);

        let footprints = world.lifecycle().footprints(level);
        for enemy in world.enemy_ids() {
            let at = world.lifecycle().position(enemy).unwrap();
            assert!(
                footprints.iter().all(|f| f.is_clear_of(at, radius, 0.0)),
                "seed {}: enemy at {:?} overlaps a footprint",
                seed,
                at
            );
        }
    }
}

#[test]
fn test_pursuing_enemy_catches_a_standing_player() {
    let mut config = config(5, 1, 1);
    let contact = config.enemy.pursuit.contact_distance(config.player.radius);
    config.enemy.spawn_distance = contact * 2.0;
    let mut world = world(config, Vec::new());
    world.start();

    while world.enemy_count() == 0 {
        world.tick(DT, PlayerInput::default());
    }
    let enemy = world.enemy_ids()[0];
    let player = world.player_position().unwrap();
    let start = distance(world.lifecycle().position(enemy).unwrap(), player);
    assert!(start > contact, "enemy starts out of reach at {}", start);

    let mut caught_after = None;
    for tick in 1..=600 {
        world.tick(DT, PlayerInput::default());
        let gap = distance(world.lifecycle().position(enemy).unwrap(), player);
        if gap < contact {
            caught_after = Some(tick);
            break;
        }
        assert_eq!(world.state(), LevelState::LevelActive(1), "no contact yet at {}", gap);
    }

    assert!(caught_after.is_some(), "enemy never closed in");
    assert_eq!(world.state(), LevelState::GameOver { level: 1 });
    let overs = world
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(overs, 1);
}

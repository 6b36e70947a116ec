use pacman_core::entity::ghost::{GhostKind, GhostState};
use pacman_core::events::GameEvent;
use pacman_core::house::DoorMan;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::Harness;

fn state_of(ghosts: &[pacman_core::entity::ghost::Ghost], kind: GhostKind) -> GhostState {
    ghosts.iter().find(|g| g.kind() == kind).unwrap().state()
}

#[test]
fn test_blinky_and_pinky_leave_first() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);

    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Blinky));
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Pinky));
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), None);
    assert_eq!(
        harness.drain_events(),
        vec![GameEvent::GhostUnlocked(GhostKind::Blinky), GameEvent::GhostUnlocked(GhostKind::Pinky)]
    );
    assert_eq!(state_of(&ghosts, GhostKind::Inky), GhostState::Locked);
}

#[test]
fn test_personal_counter_releases_on_the_same_tick() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);
    door_man.update(&mut ghosts, &mut harness.ctx());
    door_man.update(&mut ghosts, &mut harness.ctx());

    for _ in 0..29 {
        door_man.on_food_eaten(&ghosts);
        assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), None);
    }
    assert_eq!(door_man.personal_counter(GhostKind::Inky), 29);

    door_man.on_food_eaten(&ghosts);
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Inky));
    assert_eq!(state_of(&ghosts, GhostKind::Inky), GhostState::LeavingHouse);

    // Clyde is preferred now and counts from zero
    door_man.on_food_eaten(&ghosts);
    assert_eq!(door_man.personal_counter(GhostKind::Clyde), 1);
    assert_eq!(door_man.personal_counter(GhostKind::Inky), 30);
}

#[test]
fn test_global_counter_after_a_life_is_lost() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);
    door_man.on_life_lost();

    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Blinky));

    let mut released = Vec::new();
    for eaten in 1..=32 {
        door_man.on_food_eaten(&ghosts);
        if let Some(kind) = door_man.update(&mut ghosts, &mut harness.ctx()) {
            released.push((eaten, kind));
        }
    }

    assert_eq!(released, vec![(7, GhostKind::Pinky), (17, GhostKind::Inky)]);
    // Reaching 32 with Clyde still inside switches the global counter off
    assert_that(&door_man.is_global_counter_enabled()).is_false();
    assert_eq!(door_man.global_counter(), 0);
    assert_eq!(state_of(&ghosts, GhostKind::Clyde), GhostState::Locked);
}

#[test]
fn test_starving_pacman_releases_a_ghost() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);
    door_man.update(&mut ghosts, &mut harness.ctx());
    door_man.update(&mut ghosts, &mut harness.ctx());
    assert_eq!(door_man.starving_ticks(), 0);

    for _ in 0..239 {
        assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), None);
    }
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Inky));
    assert_eq!(door_man.starving_ticks(), 0);
}

#[test]
fn test_eating_resets_starvation() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(5, 60);
    for kind in [GhostKind::Blinky, GhostKind::Pinky, GhostKind::Inky] {
        assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(kind));
    }
    // Past level 2 every personal limit is zero, so Clyde follows at once
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Clyde));

    for _ in 0..100 {
        door_man.update(&mut ghosts, &mut harness.ctx());
    }
    door_man.on_food_eaten(&ghosts);
    assert_eq!(door_man.starving_ticks(), 0);
}

#[test]
fn test_doors_open_for_passing_ghosts() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);
    let door = ghosts[1].door();

    door_man.update_doors(&harness.world, &ghosts);
    assert_that(&door_man.is_door_open(door)).is_false();

    door_man.update(&mut ghosts, &mut harness.ctx());
    door_man.update(&mut ghosts, &mut harness.ctx());
    door_man.update_doors(&harness.world, &ghosts);
    assert_that(&door_man.is_door_open(door)).is_true();
}

#[test]
fn test_clyde_leaves_on_his_sixtieth_dot() {
    let mut harness = Harness::arcade();
    let mut ghosts = harness.ghosts();
    let mut door_man = DoorMan::new(1, 60);
    door_man.set_personal_counter(GhostKind::Inky, 30);
    for kind in [GhostKind::Blinky, GhostKind::Pinky, GhostKind::Inky] {
        assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(kind));
    }

    door_man.set_personal_counter(GhostKind::Clyde, 59);
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), None);
    door_man.on_food_eaten(&ghosts);
    assert_eq!(door_man.update(&mut ghosts, &mut harness.ctx()), Some(GhostKind::Clyde));
    assert_eq!(state_of(&ghosts, GhostKind::Clyde), GhostState::LeavingHouse);
}

use rand::rngs::StdRng;
use rand::SeedableRng;

use platform_duel::compute::init_state;
use platform_duel::entities::*;

#[test]
fn entity_enums_compare() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(EnemyKind::Patrol, EnemyKind::Patrol);
    assert_ne!(EnemyKind::Patrol, EnemyKind::Shooter);
    assert_eq!(Difficulty::Easy, Difficulty::Easy);
    assert_ne!(Difficulty::Easy, Difficulty::Hard);
    assert_eq!(MatchPhase::Active, MatchPhase::Active);
    assert_ne!(MatchPhase::Active, MatchPhase::Ended);
    assert_eq!(ProjectileOwner::Player(0), ProjectileOwner::Player(0));
    assert_ne!(ProjectileOwner::Player(0), ProjectileOwner::Player(1));
    assert_ne!(ProjectileOwner::Player(0), ProjectileOwner::Enemy(0));
    assert_ne!(Winner::PlayerOne, Winner::Draw);

    // Clone must produce an equal value
    let kind = EnemySkin::Collector;
    assert_eq!(kind.clone(), EnemySkin::Collector);
}

#[test]
fn difficulty_parse_and_multiplier() {
    assert_eq!(Difficulty::parse("easy"), Difficulty::Easy);
    assert_eq!(Difficulty::parse("  HARD "), Difficulty::Hard);
    assert_eq!(Difficulty::parse("medium"), Difficulty::Medium);
    // Unrecognised input falls back to Medium instead of erroring
    assert_eq!(Difficulty::parse("brutal"), Difficulty::Medium);
    assert_eq!(Difficulty::parse(""), Difficulty::Medium);

    assert_eq!(Difficulty::Easy.multiplier(), 0.7);
    assert_eq!(Difficulty::Medium.multiplier(), 1.0);
    assert_eq!(Difficulty::Hard.multiplier(), 1.4);
}

#[test]
fn game_state_clone_is_independent() {
    let mut rng = StdRng::seed_from_u64(42);
    let original = init_state(Difficulty::Medium, 1000.0, 800.0, &mut rng);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.players[0].x = 99.0;
    cloned.scores[0] = 999;
    cloned.enemies.clear();
    cloned.phase = MatchPhase::Ended;

    assert_eq!(original.players[0].x, 120.0);
    assert_eq!(original.scores[0], 0);
    assert_eq!(original.enemies.len(), 2);
    assert_eq!(original.phase, MatchPhase::Countdown);
}

#[test]
fn respawn_resets_motion_but_keeps_lives() {
    let mut rng = StdRng::seed_from_u64(42);
    let state = init_state(Difficulty::Medium, 1000.0, 800.0, &mut rng);

    let mut p = state.players[0].clone();
    p.x = 555.0;
    p.y = 123.0;
    p.vx = -100.0;
    p.vy = 400.0;
    p.on_ground = true;
    p.crouching = true;
    p.flying = true;
    p.fly_timer = 0.6;
    p.hit_flash = 0.1;
    p.lives = 4;

    p.respawn();

    assert_eq!(p.x, p.spawn_x);
    assert_eq!(p.y, p.spawn_y);
    assert_eq!(p.vx, 0.0);
    assert_eq!(p.vy, 0.0);
    assert!(!p.on_ground);
    assert!(!p.crouching);
    assert!(!p.flying);
    assert_eq!(p.fly_timer, 0.0);
    assert_eq!(p.hit_flash, 0.0);
    assert_eq!(p.lives, 4);
}

#[test]
fn bounds_mirror_entity_position() {
    let mut rng = StdRng::seed_from_u64(42);
    let state = init_state(Difficulty::Medium, 1000.0, 800.0, &mut rng);

    let p = &state.players[1];
    let b = p.bounds();
    assert_eq!((b.x, b.y, b.w, b.h), (p.x, p.y, p.w, p.h));
    assert_eq!(p.center_x(), p.x + p.w / 2.0);

    let e = &state.enemies[0];
    let b = e.bounds();
    assert_eq!((b.x, b.y, b.w, b.h), (e.x, e.y, e.w, e.h));

    let h = state.heart.bounds();
    assert_eq!((h.w, h.h), (32.0, 32.0));
}

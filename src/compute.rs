/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so a seeded
/// RNG makes whole matches reproducible.

use std::cmp::Ordering;

use rand::Rng;

use crate::entities::{
    Difficulty, Enemy, EnemyKind, EnemySkin, GameState, Heart, MatchPhase, Player, Projectile,
    ProjectileOwner, Winner,
};
use crate::geometry::{clamp, overlaps, Rect};
use crate::input::{MatchInput, PlayerInput};
use crate::level::create_level;

// ── Timing ───────────────────────────────────────────────────────────────────

/// Fixed simulation timestep (60 Hz).
pub const DT: f32 = 1.0 / 60.0;

/// Longest real-time gap a single `advance` call will simulate; anything
/// beyond is dropped so a stall never snowballs into a catch-up spiral.
pub const MAX_FRAME_TIME: f32 = 0.25;

const COUNTDOWN_SECS: f32 = 3.0;

// ── Player tuning ────────────────────────────────────────────────────────────

const PLAYER_W: f32 = 48.0;
const PLAYER_H: f32 = 64.0;
const PLAYER_GRAVITY: f32 = 1800.0;
const PLAYER_SPEED: f32 = 320.0;
const JUMP_IMPULSE: f32 = -680.0;
/// Constant lift while holding jump during flight — weaker than a jump.
const FLY_IMPULSE: f32 = -300.0;
const FLY_DURATION: f32 = 1.0;
/// Extra downward velocity while crouching, per second.
const CROUCH_SINK: f32 = 180.0;
const SHOOT_COOLDOWN: f32 = 0.35;
const PLAYER_SHOT_SPEED: f32 = 820.0;
const START_LIVES: i32 = 10;
const HIT_FLASH: f32 = 0.2;

// ── Enemy tuning ─────────────────────────────────────────────────────────────

const ENEMY_W: f32 = 56.0;
const ENEMY_H: f32 = 64.0;
const ENEMY_GRAVITY: f32 = 1400.0;
const PATROL_SPEED: f32 = 80.0;
const PATROL_PERIOD: f32 = 2.2;
/// Shooter horizontal tracking: vx = gain · Δx, capped by difficulty.
const TRACK_GAIN: f32 = 0.4;
const TRACK_SPEED_CAP: f32 = 160.0;
const ENEMY_SHOT_SPEED: f32 = 460.0;
const ENEMY_HEALTH: i32 = 2;
/// Score awarded per enemy destroyed.
const KILL_SCORE: u32 = 150;

// ── Projectile / pickup tuning ───────────────────────────────────────────────

const PROJECTILE_W: f32 = 12.0;
const PROJECTILE_H: f32 = 8.0;
const PROJECTILE_LIFE: f32 = 3.5;
/// Projectiles survive this far past the world edge before culling.
const WORLD_MARGIN: f32 = 100.0;

const HEART_SIZE: f32 = 32.0;
const HEART_PERIOD: f32 = 30.0;
const HEART_DURATION: f32 = 10.0;

// ── Constructors ─────────────────────────────────────────────────────────────

fn new_player(x: f32, y: f32) -> Player {
    Player {
        x,
        y,
        w: PLAYER_W,
        h: PLAYER_H,
        vx: 0.0,
        vy: 0.0,
        facing: 1.0,
        on_ground: false,
        crouching: false,
        flying: false,
        fly_timer: 0.0,
        shoot_cooldown: 0.0,
        lives: START_LIVES,
        hit_flash: 0.0,
        spawn_x: x,
        spawn_y: y,
    }
}

fn new_enemy(x: f32, y: f32, kind: EnemyKind, skin: EnemySkin, rng: &mut impl Rng) -> Enemy {
    let dir = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    Enemy {
        x,
        y,
        w: ENEMY_W,
        h: ENEMY_H,
        vx: dir * PATROL_SPEED,
        vy: 0.0,
        kind,
        skin,
        health: ENEMY_HEALTH,
        shoot_cooldown: rng.gen_range(1.0..2.5),
        patrol_timer: 0.0,
        hit_flash: 0.0,
    }
}

fn spawn_enemy(width: f32, height: f32, rng: &mut impl Rng) -> Enemy {
    let x = rng.gen_range(100.0..width - 100.0);
    let kind = if rng.gen_bool(0.5) {
        EnemyKind::Patrol
    } else {
        EnemyKind::Shooter
    };
    let skin = if rng.gen_bool(0.5) {
        EnemySkin::Bruiser
    } else {
        EnemySkin::Collector
    };
    new_enemy(x, height - 500.0, kind, skin, rng)
}

/// Build the initial match state for a given difficulty and viewport.
/// The match starts in the countdown phase with the two stock enemies —
/// a patroller mid-field and a shooter on the right.
pub fn init_state(
    difficulty: Difficulty,
    width: f32,
    height: f32,
    rng: &mut impl Rng,
) -> GameState {
    GameState {
        players: vec![
            new_player(120.0, height - 300.0),
            new_player(width - 180.0, height - 300.0),
        ],
        enemies: vec![
            new_enemy(
                width * 0.5,
                height - 500.0,
                EnemyKind::Patrol,
                EnemySkin::Bruiser,
                rng,
            ),
            new_enemy(
                width * 0.7,
                height - 500.0,
                EnemyKind::Shooter,
                EnemySkin::Collector,
                rng,
            ),
        ],
        projectiles: Vec::new(),
        platforms: create_level(width, height),
        heart: Heart {
            x: 0.0,
            y: 0.0,
            w: HEART_SIZE,
            h: HEART_SIZE,
            active: false,
            duration: 0.0,
            spawn_timer: 0.0,
        },
        scores: [0, 0],
        phase: MatchPhase::Countdown,
        countdown: COUNTDOWN_SECS,
        winner: None,
        difficulty,
        width,
        height,
        accumulator: 0.0,
    }
}

/// Rebuild everything for a fresh match at the current difficulty and
/// viewport: entities, platforms, scores, lives and the countdown.
pub fn reset(state: &GameState, rng: &mut impl Rng) -> GameState {
    init_state(state.difficulty, state.width, state.height, rng)
}

/// Adopt a new viewport size: regenerate the platform layout wholesale and
/// pull respawn points up if the world got shorter.
pub fn handle_resize(state: &GameState, width: f32, height: f32) -> GameState {
    let mut next = state.clone();
    next.width = width;
    next.height = height;
    next.platforms = create_level(width, height);
    for p in &mut next.players {
        p.spawn_y = p.spawn_y.min(height - 120.0);
    }
    next
}

// ── Fixed-timestep driver ────────────────────────────────────────────────────

/// Feed one real frame's elapsed time into the accumulator and drain it in
/// fixed `DT` steps.  The flight triggers in `input` are one-shot: they are
/// cleared after the first drained step so a double-tap fires exactly once
/// however many steps this frame drains.  A frame short enough to drain no
/// step leaves the triggers set, so the caller can carry them into the next
/// frame instead of losing the tap.
pub fn advance(
    state: &GameState,
    input: &mut MatchInput,
    frame_time: f32,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    next.accumulator += frame_time.min(MAX_FRAME_TIME);
    while next.accumulator >= DT {
        next = step(&next, input, DT, rng);
        next.accumulator -= DT;
        input.consume_triggers();
    }
    next
}

// ── One fixed step ───────────────────────────────────────────────────────────

/// Advance the simulation by one timestep of `dt` seconds.
///
/// Update order is fixed: players → enemies → projectiles (combat) →
/// enemy replenishment → heart pickup.  An ended match is a no-op; the
/// countdown phase only ticks the countdown.
pub fn step(state: &GameState, input: &MatchInput, dt: f32, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    match next.phase {
        MatchPhase::Ended => return next,
        MatchPhase::Countdown => {
            next.countdown -= dt;
            if next.countdown <= 0.0 {
                next.countdown = 0.0;
                next.phase = MatchPhase::Active;
            }
            return next;
        }
        MatchPhase::Active => {}
    }

    // Shots fired this step join the projectile pass below, same as the
    // projectiles already in flight.
    let mut fired: Vec<Projectile> = Vec::new();

    for (i, player) in next.players.iter_mut().enumerate() {
        update_player(
            player,
            &input.players[i],
            i,
            &next.platforms,
            next.width,
            dt,
            &mut fired,
        );
    }

    let mult = next.difficulty.multiplier();
    for (i, enemy) in next.enemies.iter_mut().enumerate() {
        update_enemy(
            enemy,
            i,
            &next.players,
            &next.platforms,
            next.width,
            mult,
            dt,
            &mut fired,
            rng,
        );
    }

    next.projectiles.extend(fired);
    run_projectile_pass(&mut next, dt);

    if next.enemies.is_empty() {
        let count = if next.difficulty == Difficulty::Hard { 2 } else { 1 };
        for _ in 0..count {
            let e = spawn_enemy(next.width, next.height, rng);
            next.enemies.push(e);
        }
    }

    update_heart(&mut next, dt);

    next
}

// ── Player controller ────────────────────────────────────────────────────────

fn update_player(
    p: &mut Player,
    input: &PlayerInput,
    owner: usize,
    platforms: &[Rect],
    width: f32,
    dt: f32,
    fired: &mut Vec<Projectile>,
) {
    // Flight starts only from the ground, via the double-tap trigger.
    if input.fly_trigger && p.on_ground && !p.flying {
        p.flying = true;
        p.fly_timer = FLY_DURATION;
    }

    if p.hit_flash > 0.0 {
        p.hit_flash = (p.hit_flash - dt).max(0.0);
    }

    if !p.flying {
        p.vy += PLAYER_GRAVITY * dt;
    }

    if input.left {
        p.vx = -PLAYER_SPEED;
        p.facing = -1.0;
    } else if input.right {
        p.vx = PLAYER_SPEED;
        p.facing = 1.0;
    } else {
        p.vx = 0.0;
    }

    // `on_ground` is last step's collision result, so the jump check sees
    // the surface the player was standing on when this step began.
    if input.jump && p.on_ground {
        p.vy = JUMP_IMPULSE;
        p.on_ground = false;
    }

    if p.flying {
        p.fly_timer -= dt;
        if p.fly_timer <= 0.0 {
            p.flying = false;
        } else if input.jump {
            p.vy = FLY_IMPULSE;
        }
    }

    p.crouching = false;
    if input.down {
        p.vy += CROUCH_SINK * dt;
        p.crouching = true;
    }

    p.x += p.vx * dt;
    p.y += p.vy * dt;
    p.x = clamp(p.x, 0.0, width - p.w);

    p.on_ground = false;
    for plat in platforms {
        if p.vy >= 0.0 && p.x + p.w > plat.x && p.x < plat.x + plat.w {
            // Swept foot test: land only if the foot crossed the surface
            // during this step's motion.
            let foot = p.y + p.h;
            if foot > plat.y && foot - p.vy * dt <= plat.y + 2.0 {
                p.y = plat.y - p.h;
                p.vy = 0.0;
                p.on_ground = true;
                p.flying = false;
            }
        }
    }

    if input.shoot && p.shoot_cooldown <= 0.0 {
        fired.push(player_shot(p, owner));
        p.shoot_cooldown = SHOOT_COOLDOWN;
    }
    if p.shoot_cooldown > 0.0 {
        p.shoot_cooldown = (p.shoot_cooldown - dt).max(0.0);
    }
}

fn player_shot(p: &Player, owner: usize) -> Projectile {
    let x = if p.facing > 0.0 {
        p.x + p.w
    } else {
        p.x - PROJECTILE_W
    };
    Projectile {
        x,
        y: p.y + p.h * 0.45,
        w: PROJECTILE_W,
        h: PROJECTILE_H,
        vx: p.facing * PLAYER_SHOT_SPEED,
        vy: 0.0,
        owner: ProjectileOwner::Player(owner),
        life: PROJECTILE_LIFE,
    }
}

// ── Enemy AI controller ──────────────────────────────────────────────────────

/// Nearest player by horizontal distance; ties keep the first in list order.
fn nearest_player(players: &[Player], x: f32) -> Option<&Player> {
    players.iter().min_by(|a, b| {
        (a.x - x)
            .abs()
            .partial_cmp(&(b.x - x).abs())
            .unwrap_or(Ordering::Equal)
    })
}

#[allow(clippy::too_many_arguments)]
fn update_enemy(
    e: &mut Enemy,
    index: usize,
    players: &[Player],
    platforms: &[Rect],
    width: f32,
    mult: f32,
    dt: f32,
    fired: &mut Vec<Projectile>,
    rng: &mut impl Rng,
) {
    if e.hit_flash > 0.0 {
        e.hit_flash = (e.hit_flash - dt).max(0.0);
    }

    e.patrol_timer += dt;
    match e.kind {
        EnemyKind::Patrol => {
            // Patrol speed ignores difficulty; only the period matters.
            if e.patrol_timer > PATROL_PERIOD {
                e.vx = -e.vx;
                e.patrol_timer = 0.0;
            }
            e.x += e.vx * dt;
        }
        EnemyKind::Shooter => {
            if let Some(target) = nearest_player(players, e.x) {
                let dx = target.center_x() - e.center_x();
                let cap = TRACK_SPEED_CAP * mult;
                e.vx = clamp(dx * TRACK_GAIN, -cap, cap);
                e.x += e.vx * dt;
            }
        }
    }

    e.vy += ENEMY_GRAVITY * dt;
    e.y += e.vy * dt;

    for plat in platforms {
        if e.vy >= 0.0 && e.x + e.w > plat.x && e.x < plat.x + plat.w {
            let foot = e.y + e.h;
            if foot > plat.y && foot - e.vy * dt <= plat.y + 2.0 {
                e.y = plat.y - e.h;
                e.vy = 0.0;
            }
        }
    }

    if e.x < 0.0 || e.x + e.w > width {
        e.vx = -e.vx;
        e.x = clamp(e.x, 0.0, width - e.w);
    }

    // Harder difficulty drains the cooldown faster.
    e.shoot_cooldown -= dt * mult;
    if e.shoot_cooldown <= 0.0 {
        if let Some(target) = nearest_player(players, e.x) {
            let dx = target.center_x() - e.center_x();
            let dir = if dx < 0.0 { -1.0 } else { 1.0 };
            fired.push(enemy_shot(e, index, dir, mult));
        }
        e.shoot_cooldown = rng.gen_range(1.2..2.8);
    }
}

fn enemy_shot(e: &Enemy, index: usize, dir: f32, mult: f32) -> Projectile {
    let x = if dir > 0.0 { e.x + e.w } else { e.x - PROJECTILE_W };
    Projectile {
        x,
        y: e.y + e.h * 0.5,
        w: PROJECTILE_W,
        h: PROJECTILE_H,
        vx: dir * ENEMY_SHOT_SPEED * mult,
        vy: 0.0,
        owner: ProjectileOwner::Enemy(index),
        life: PROJECTILE_LIFE,
    }
}

// ── Projectiles & combat resolution ──────────────────────────────────────────

/// Move every projectile, absorb platform hits, cull the expired and
/// out-of-bounds, and resolve at most one combat hit per projectile.
fn run_projectile_pass(state: &mut GameState, dt: f32) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for mut b in projectiles {
        b.x += b.vx * dt;
        b.y += b.vy * dt;
        b.life -= dt;

        // Platforms absorb projectiles without dealing damage.
        if state.platforms.iter().any(|p| overlaps(&b.bounds(), p)) {
            b.life = 0.0;
        }
        if b.life <= 0.0 || b.x < -WORLD_MARGIN || b.x > state.width + WORLD_MARGIN {
            continue;
        }

        if !resolve_hit(&b, state) {
            survivors.push(b);
        }
    }

    state.projectiles = survivors;
}

/// First-match-wins hit resolution for one projectile.  Returns `true`
/// when the projectile was consumed by a hit.
fn resolve_hit(b: &Projectile, state: &mut GameState) -> bool {
    let bounds = b.bounds();
    match b.owner {
        ProjectileOwner::Player(owner) => {
            // Other players first, then enemies.
            let victim = state.players.iter().enumerate().find_map(|(j, p)| {
                (j != owner && !p.crouching && overlaps(&bounds, &p.bounds())).then_some(j)
            });
            if let Some(j) = victim {
                damage_player(state, j);
                return true;
            }

            if let Some(j) = state
                .enemies
                .iter()
                .position(|e| overlaps(&bounds, &e.bounds()))
            {
                let enemy = &mut state.enemies[j];
                enemy.health -= 1;
                enemy.hit_flash = HIT_FLASH;
                if enemy.health <= 0 {
                    state.enemies.remove(j);
                    state.scores[owner] += KILL_SCORE;
                }
                return true;
            }
            false
        }
        ProjectileOwner::Enemy(_) => {
            let victim = state.players.iter().enumerate().find_map(|(j, p)| {
                (!p.crouching && overlaps(&bounds, &p.bounds())).then_some(j)
            });
            if let Some(j) = victim {
                damage_player(state, j);
                return true;
            }
            false
        }
    }
}

/// Crouching players never reach here — eligibility is checked by the
/// caller.  Dropping to 0 lives ends the match on the spot.
fn damage_player(state: &mut GameState, j: usize) {
    let p = &mut state.players[j];
    p.lives -= 1;
    p.hit_flash = HIT_FLASH;
    if p.lives <= 0 {
        end_match(state);
    }
}

fn end_match(state: &mut GameState) {
    state.phase = MatchPhase::Ended;
    let dead = [state.players[0].lives <= 0, state.players[1].lives <= 0];
    state.winner = Some(match dead {
        [true, true] => Winner::Draw,
        [true, false] => Winner::PlayerTwo,
        _ => Winner::PlayerOne,
    });
}

// ── Heart pickup ─────────────────────────────────────────────────────────────

/// Dormant → active every `HEART_PERIOD` seconds of play; active hearts
/// expire after `HEART_DURATION` or on the first overlapping player, who
/// gains a life.  At most one heart exists.
fn update_heart(state: &mut GameState, dt: f32) {
    // The spawn accumulator pauses while a heart is out, so windows are
    // strictly periodic: 30 s dormant, up to 10 s active, repeat.  A heart
    // activated this step is live from the next step on.
    if state.heart.active {
        state.heart.duration -= dt;
        if state.heart.duration <= 0.0 {
            state.heart.active = false;
        }
        let hb = state.heart.bounds();
        for p in &mut state.players {
            if overlaps(&p.bounds(), &hb) {
                p.lives += 1;
                state.heart.active = false;
                break;
            }
        }
    } else {
        state.heart.spawn_timer += dt;
        if state.heart.spawn_timer >= HEART_PERIOD {
            state.heart.active = true;
            state.heart.duration = HEART_DURATION;
            state.heart.spawn_timer = 0.0;
            state.heart.x = state.width / 2.0 - HEART_SIZE / 2.0;
            state.heart.y = state.height / 2.0 - HEART_SIZE / 2.0;
        }
    }
}

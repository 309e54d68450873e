/// All game entity types — pure data, no logic.

use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Scalar applied to shooter tracking speed and cooldown decay.
    pub fn multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 0.7,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.4,
        }
    }

    /// Parse a difficulty name.  Unrecognised input falls back to `Medium`
    /// rather than erroring — the simulation loop must never stall on a bad
    /// configuration string.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchPhase {
    /// Pre-match countdown; nothing but the timer advances.
    Countdown,
    /// Full simulation.
    Active,
    /// Frozen; `winner` is set.  Stepping is a no-op until reset.
    Ended,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Winner {
    PlayerOne,
    PlayerTwo,
    Draw,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Who fired a projectile.  The index points into the owning collection at
/// fire time; for players it selects whose score a kill credits and who is
/// exempt from the hit test.  Enemy indices are informational only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProjectileOwner {
    Player(usize),
    Enemy(usize),
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub owner: ProjectileOwner,
    /// Seconds of flight remaining; any collision zeroes it.
    pub life: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Players ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    /// +1 facing right, −1 facing left.
    pub facing: f32,
    pub on_ground: bool,
    /// While crouching the player is immune to projectiles.
    pub crouching: bool,
    pub flying: bool,
    /// Seconds of flight remaining once flying.
    pub fly_timer: f32,
    pub shoot_cooldown: f32,
    pub lives: i32,
    /// Seconds of hit-flash remaining (cosmetic, not an immunity window).
    pub hit_flash: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Return to the spawn point and clear transient motion state.
    /// Lives are deliberately untouched — they reset only with the match.
    pub fn respawn(&mut self) {
        self.x = self.spawn_x;
        self.y = self.spawn_y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.on_ground = false;
        self.crouching = false;
        self.hit_flash = 0.0;
        self.flying = false;
        self.fly_timer = 0.0;
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyKind {
    /// Walks back and forth, reversing on a fixed period.
    Patrol,
    /// Tracks the nearest player horizontally.
    Shooter,
}

/// Cosmetic sprite choice; has no effect on behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemySkin {
    Bruiser,
    Collector,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub vx: f32,
    pub vy: f32,
    pub kind: EnemyKind,
    pub skin: EnemySkin,
    /// Dies (and scores for the shooter) at 0.
    pub health: i32,
    pub shoot_cooldown: f32,
    pub patrol_timer: f32,
    pub hit_flash: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }
}

// ── Heart pickup ──────────────────────────────────────────────────────────────

/// The singleton healing pickup.  `spawn_timer` accumulates whenever the
/// match is active; the heart itself is only collidable while `active`.
#[derive(Clone, Debug)]
pub struct Heart {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub active: bool,
    /// Seconds left in the current window while active.
    pub duration: f32,
    /// Seconds accumulated toward the next spawn.
    pub spawn_timer: f32,
}

impl Heart {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire match state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Always exactly two players; index doubles as the player id.
    pub players: Vec<Player>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Static collision geometry; a pure function of the viewport.
    pub platforms: Vec<Rect>,
    pub heart: Heart,
    /// Points per player, parallel to `players`.
    pub scores: [u32; 2],
    pub phase: MatchPhase,
    /// Seconds left in the countdown phase (clamped to 0 on transition).
    pub countdown: f32,
    /// Set exactly when `phase` becomes `Ended`.
    pub winner: Option<Winner>,
    pub difficulty: Difficulty,
    /// Viewport/world size in world units.
    pub width: f32,
    pub height: f32,
    /// Fixed-timestep drain carried between `advance` calls.
    pub accumulator: f32,
}

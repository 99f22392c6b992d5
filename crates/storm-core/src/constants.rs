//! Simulation constants and tuning parameters.
//!
//! Values are tuned by hand; keep them as they are unless the difficulty
//! curve itself is being reworked.

/// Tick period of the external driver (milliseconds).
pub const TICK_PERIOD_MS: u64 = 40;

// --- Speeds ---

/// Base speed unit (pixels per tick).
pub const BASE_SPEED: i32 = 4;

pub const OBSTACLE_SPEED: i32 = 3 * BASE_SPEED;

pub const PROJECTILE_SPEED: i32 = 6 * BASE_SPEED;

/// Both axes; the horizontal sign comes from the spawn direction.
pub const PATROL_FIGHTER_SPEED: i32 = 3 * BASE_SPEED;

pub const SAUCER_SPEED: i32 = 3 * BASE_SPEED;

/// Horizontal step per tick while a move intent is held.
pub const PLAYER_SPEED: i32 = 5 * BASE_SPEED;

// --- Dimensions (width, height) ---

pub const OBSTACLE_SIZE: (f64, f64) = (18.0, 15.0);

pub const PROJECTILE_SIZE: (f64, f64) = (6.0, 16.0);

pub const PATROL_FIGHTER_SIZE: (f64, f64) = (47.0, 24.0);

pub const SAUCER_SIZE: (f64, f64) = (54.0, 27.0);

pub const PLAYER_SIZE: (f64, f64) = (48.0, 45.0);

/// Player hitbox is shrunk inside the sprite: (left, top, right, bottom).
pub const PLAYER_HITBOX_INSET: (f64, f64, f64, f64) = (10.0, 10.0, 10.0, 15.0);

/// Gap between a firer's edge and the projectile it spawns.
pub const PROJECTILE_SPAWN_GAP: f64 = 1.0;

// --- Waits (ticks) ---

pub const SHORT_WAIT: u64 = 2;

pub const MEDIUM_WAIT: u64 = 5;

pub const LONG_WAIT: u64 = 50;

pub const PLAYER_FIRE_COOLDOWN: u64 = SHORT_WAIT;

pub const PATROL_FIGHTER_FIRE_COOLDOWN: u64 = MEDIUM_WAIT;

pub const SAUCER_FIRE_COOLDOWN: u64 = 2 * MEDIUM_WAIT;

/// Ticks a destroyed enemy lingers before removal.
pub const GRACE_TICKS: u64 = SHORT_WAIT;

// --- Arena ---

/// Vertical spawn row for enemies.
pub const ARENA_TOP: f64 = 25.0;

/// Distance of the player's row from the bottom edge.
pub const PLAYER_ROW_OFFSET: f64 = 60.0;

/// Player cannot move closer than this to either side.
pub const PLAYER_SIDE_MARGIN: f64 = 30.0;

/// Enemies spawn at least this far from either side.
pub const SPAWN_SIDE_MARGIN: f64 = 20.0;

pub const DEFAULT_ARENA_WIDTH: f64 = 800.0;

pub const DEFAULT_ARENA_HEIGHT: f64 = 600.0;

// --- Spawner ---

/// No enemies spawn until the clock passes this tick.
pub const SPAWN_WARMUP_TICKS: u64 = LONG_WAIT;

/// Upper bound (exclusive) of the spawn draws.
pub const SPAWN_ROLL_RANGE: u32 = 100;

/// Base spawn threshold before score scaling.
pub const SPAWN_BASE_THRESHOLD: u32 = 10;

/// Score offset and divisor of the score-scaled threshold.
pub const SPAWN_SCORE_OFFSET: u32 = 10;
pub const SPAWN_SCORE_DIVISOR: u32 = 20;

/// Forced roll that lands in the patrol fighter band.
pub const FORCED_FIGHTER_ROLL: u32 = 10;

/// Rolls above this spawn an obstacle.
pub const OBSTACLE_BAND_FLOOR: u32 = 18;

/// Rolls at or below this spawn a saucer.
pub const SAUCER_BAND_CEILING: u32 = 1;

/// Patrol fighters are forced when none has spawned for this long.
pub const FIGHTER_FORCE_INTERVAL: u64 = LONG_WAIT;

pub const FIGHTER_SPAWN_COOLDOWN: u64 = MEDIUM_WAIT;

pub const SAUCER_SPAWN_COOLDOWN: u64 = LONG_WAIT;

// --- Scoring ---

pub const POINTS_PER_KILL: u32 = 10;

pub const INITIAL_LIVES: u32 = 3;

/// All game entity types: plain data plus the shared `Entity` shape.
///
/// World units are pixel-equivalent floats on a 623 × 150 playfield.  The
/// display layer is responsible for mapping them onto terminal cells.

// ── World constants ───────────────────────────────────────────────────────────

pub const WORLD_WIDTH: f32 = 623.0;
pub const WORLD_HEIGHT: f32 = 150.0;

/// Player and obstacle sprites share one size.
pub const SPRITE_SIZE: f32 = 44.0;

pub const PLAYER_X: f32 = 10.0;
/// Ground line for the player's top edge.
pub const PLAYER_REST_Y: f32 = 80.0;
pub const OBSTACLE_Y: f32 = 80.0;

/// Upward velocity applied by a jump (world units per frame).
pub const JUMP_IMPULSE: f32 = 7.0;
/// Added to the vertical velocity once per simulated frame.
pub const GRAVITY_STEP: f32 = 0.3;
/// Run-animation phase advance per grounded frame.
pub const ANIMATION_SPEED: f32 = 0.1;
pub const ANIMATION_FRAMES: u8 = 3;

/// Minimum clear space between two consecutive obstacles, on top of the
/// player's own width.
pub const MIN_GAP: i64 = 84;
/// Spawn window for the first obstacle, measured past the right edge.
pub const FIRST_SPAWN_MIN: i64 = 100;
pub const FIRST_SPAWN_MAX: i64 = 200;
/// A new obstacle is spawned on every frame divisible by this.
pub const SPAWN_INTERVAL: u64 = 100;

pub const COLLISION_DISTANCE: f32 = 35.0;

pub const FRAMES_PER_POINT: u64 = 10;
pub const MILESTONE_POINTS: u32 = 100;

/// Horizontal scroll speed in world units per second.
pub const DEFAULT_SPEED: f32 = 180.0;

// ── Shared shape ──────────────────────────────────────────────────────────────

/// Anything with a top-left anchor and a fixed axis-aligned box.
pub trait Entity {
    fn anchor(&self) -> (f32, f32);
    fn size(&self) -> (f32, f32);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Signed vertical velocity, positive = falling.
    pub gravity_velocity: f32,
    pub rest_y: f32,
    /// Accumulator in `[0, 3)`; only advances while grounded.
    pub animation_phase: f32,
    /// `floor(animation_phase)`, one of 0, 1, 2.
    pub animation_frame: u8,
}

impl Entity for Player {
    fn anchor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

// ── Obstacles ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Entity for Obstacle {
    fn anchor(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Live obstacles, oldest first.  The last element is the spacing reference
/// for the next spawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObstacleTrack {
    pub obstacles: Vec<Obstacle>,
}

// ── Background ────────────────────────────────────────────────────────────────

/// Looping horizontal offset in `(-WORLD_WIDTH, 0]`.  Visual only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScrollingBackground {
    pub x: f32,
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreTracker {
    pub current_score: u32,
    /// Best score seen by this process; survives session rebuilds.
    pub high_score: u32,
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Playing,
    GameOver,
}

/// Logical input actions, already decoupled from any key binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    Reset,
    Quit,
}

/// Sound cues raised by the simulation for the audio sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Jump,
    /// Score milestone (positive multiple of 100).
    Point,
    Die,
}

/// Tunables carried unchanged across rebuilds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSettings {
    /// Scroll speed in world units per second.
    pub speed: f32,
    /// Drop obstacles that have scrolled fully past the left edge.
    pub evict_offscreen: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            evict_offscreen: true,
        }
    }
}

/// The whole session.  Cloneable so pure update functions can return a new
/// copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub track: ObstacleTrack,
    pub score: ScoreTracker,
    pub background: ScrollingBackground,
    pub state: SessionState,
    /// Simulated frames since the run started.
    pub frame: u64,
    pub settings: SessionSettings,
    /// Sounds raised since the driver last drained them.
    pub sounds: Vec<Sound>,
}

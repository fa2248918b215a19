/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to its input (and,
/// where needed, an RNG handle) and returns a brand-new value.  Side effects
/// are limited to the injected RNG and log output.
///
/// Gravity and the run animation advance once per simulated frame.  Scrolling
/// is scaled by the wall-clock `dt`.

use log::{debug, info, trace};
use rand::Rng;

use crate::entities::{
    Entity, GameSession, InputEvent, Obstacle, ObstacleTrack, Player, ScoreTracker,
    ScrollingBackground, SessionSettings, SessionState, Sound, ANIMATION_FRAMES,
    ANIMATION_SPEED, COLLISION_DISTANCE, FIRST_SPAWN_MAX, FIRST_SPAWN_MIN, FRAMES_PER_POINT,
    GRAVITY_STEP, JUMP_IMPULSE, MILESTONE_POINTS, MIN_GAP, OBSTACLE_Y, PLAYER_REST_Y, PLAYER_X,
    SPAWN_INTERVAL, SPRITE_SIZE, WORLD_WIDTH,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// A grounded player at the start of the track.
pub fn new_player() -> Player {
    Player {
        x: PLAYER_X,
        y: PLAYER_REST_Y,
        width: SPRITE_SIZE,
        height: SPRITE_SIZE,
        gravity_velocity: 0.0,
        rest_y: PLAYER_REST_Y,
        animation_phase: 0.0,
        animation_frame: 0,
    }
}

/// Build a fresh idle session with one obstacle already queued off-screen.
pub fn init_session(
    high_score: u32,
    settings: SessionSettings,
    rng: &mut impl Rng,
) -> GameSession {
    let player = new_player();
    let track = spawn_obstacle(&ObstacleTrack::default(), player.width, rng);
    GameSession {
        player,
        track,
        score: ScoreTracker {
            current_score: 0,
            high_score,
        },
        background: ScrollingBackground::default(),
        state: SessionState::Idle,
        frame: 0,
        settings,
        sounds: Vec::new(),
    }
}

/// Discard the whole entity graph and start over in `Idle`.  Only the high
/// score (and the session settings) carry forward.
pub fn rebuild(state: &GameSession, rng: &mut impl Rng) -> GameSession {
    info!("session reset (high score {})", state.score.high_score);
    init_session(state.score.high_score, state.settings, rng)
}

// ── Player ───────────────────────────────────────────────────────────────────

pub fn is_grounded(player: &Player) -> bool {
    player.y >= player.rest_y
}

/// Start a jump.  Airborne players cannot jump again; the call is a no-op.
pub fn player_jump(player: &Player) -> Player {
    if !is_grounded(player) {
        return player.clone();
    }
    Player {
        gravity_velocity: -JUMP_IMPULSE,
        animation_phase: 0.0,
        animation_frame: 0,
        ..player.clone()
    }
}

/// Advance jump physics and the run animation by exactly one frame.
pub fn update_player(player: &Player) -> Player {
    let gravity_velocity = player.gravity_velocity + GRAVITY_STEP;
    let y = player.y + gravity_velocity;

    if y < player.rest_y {
        return Player {
            y,
            gravity_velocity,
            ..player.clone()
        };
    }

    let mut animation_phase = player.animation_phase + ANIMATION_SPEED;
    if animation_phase >= ANIMATION_FRAMES as f32 {
        animation_phase = 0.0;
    }
    Player {
        y: player.rest_y,
        gravity_velocity,
        animation_phase,
        animation_frame: animation_phase.floor() as u8,
        ..player.clone()
    }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// Inclusive range of x positions the next obstacle may take.
pub fn spawn_range(track: &ObstacleTrack, player_width: f32) -> (i64, i64) {
    let width = WORLD_WIDTH as i64;
    match track.obstacles.last() {
        Some(prev) => {
            let lo = prev.x as i64 + player_width as i64 + MIN_GAP;
            (lo, lo + width)
        }
        None => (width + FIRST_SPAWN_MIN, width + FIRST_SPAWN_MAX),
    }
}

/// Append one obstacle, spaced from the most recent one.
pub fn spawn_obstacle(
    track: &ObstacleTrack,
    player_width: f32,
    rng: &mut impl Rng,
) -> ObstacleTrack {
    let (lo, hi) = spawn_range(track, player_width);
    let x = rng.gen_range(lo..=hi);
    trace!("spawn obstacle at x={} (range {}..={})", x, lo, hi);

    let mut obstacles = track.obstacles.clone();
    obstacles.push(Obstacle {
        x: x as f32,
        y: OBSTACLE_Y,
        width: SPRITE_SIZE,
        height: SPRITE_SIZE,
    });
    ObstacleTrack { obstacles }
}

pub fn scroll_obstacles(track: &ObstacleTrack, dx: f32) -> ObstacleTrack {
    ObstacleTrack {
        obstacles: track
            .obstacles
            .iter()
            .map(|o| Obstacle {
                x: o.x + dx,
                ..o.clone()
            })
            .collect(),
    }
}

/// Drop obstacles whose right edge has passed the left boundary.  The newest
/// obstacle is always kept because the next spawn is spaced from it.
pub fn evict_offscreen(track: &ObstacleTrack) -> ObstacleTrack {
    let newest = track.obstacles.len().saturating_sub(1);
    ObstacleTrack {
        obstacles: track
            .obstacles
            .iter()
            .enumerate()
            .filter(|(i, o)| *i == newest || o.x + o.width >= 0.0)
            .map(|(_, o)| o.clone())
            .collect(),
    }
}

// ── Background ───────────────────────────────────────────────────────────────

pub fn scroll_background(background: &ScrollingBackground, dx: f32) -> ScrollingBackground {
    let mut x = background.x + dx;
    if x <= -WORLD_WIDTH {
        x = 0.0;
    }
    ScrollingBackground { x }
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Proximity test between two top-left anchors, not an AABB overlap.  The
/// hit zone is a 35-unit circle around the anchor.
pub fn collides(a: &impl Entity, b: &impl Entity) -> bool {
    let (ax, ay) = a.anchor();
    let (bx, by) = b.anchor();
    let distance = ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt();
    distance < COLLISION_DISTANCE
}

// ── Score ────────────────────────────────────────────────────────────────────

pub fn update_score(score: &ScoreTracker, elapsed_frames: u64) -> ScoreTracker {
    let current_score = u32::try_from(elapsed_frames / FRAMES_PER_POINT).unwrap_or(u32::MAX);
    ScoreTracker {
        current_score,
        high_score: score.high_score.max(current_score),
    }
}

/// True on every frame whose score is a positive multiple of 100, so the cue
/// repeats for the whole 10-frame bucket.
pub fn is_milestone(score: &ScoreTracker) -> bool {
    score.current_score > 0 && score.current_score % MILESTONE_POINTS == 0
}

pub fn reset_score(score: &ScoreTracker) -> ScoreTracker {
    ScoreTracker {
        current_score: 0,
        ..score.clone()
    }
}

// ── Session transitions ──────────────────────────────────────────────────────

/// `Idle → Playing`.  Any other state is returned unchanged.
pub fn start(state: &GameSession) -> GameSession {
    if state.state != SessionState::Idle {
        return state.clone();
    }
    info!("run started");
    GameSession {
        state: SessionState::Playing,
        frame: 0,
        score: reset_score(&state.score),
        ..state.clone()
    }
}

/// Apply one logical input event between frames.  `Quit` is the driver's
/// business and leaves the session untouched.
pub fn apply_input(state: &GameSession, event: InputEvent, rng: &mut impl Rng) -> GameSession {
    match (event, state.state) {
        (InputEvent::Jump, SessionState::Idle) => start(state),
        (InputEvent::Jump, SessionState::Playing) => {
            if !is_grounded(&state.player) {
                return state.clone();
            }
            let mut sounds = state.sounds.clone();
            sounds.push(Sound::Jump);
            GameSession {
                player: player_jump(&state.player),
                sounds,
                ..state.clone()
            }
        }
        (InputEvent::Jump, SessionState::GameOver) => state.clone(),
        (InputEvent::Reset, _) => rebuild(state, rng),
        (InputEvent::Quit, _) => state.clone(),
    }
}

/// Take every sound raised since the last call.
pub fn take_sounds(state: &mut GameSession) -> Vec<Sound> {
    std::mem::take(&mut state.sounds)
}

// ── Per-frame tick (nearly pure, RNG is injected) ───────────────────────────

/// Advance the simulation by one frame of `dt` wall-clock seconds.  Outside
/// `Playing` nothing moves and the frame counter stays put.
pub fn tick(state: &GameSession, dt: f32, rng: &mut impl Rng) -> GameSession {
    if state.state != SessionState::Playing {
        return state.clone();
    }

    let frame = state.frame + 1;
    let dx = -state.settings.speed * dt;

    // ── 1. Background and player ────────────────────────────────────────────
    let background = scroll_background(&state.background, dx);
    let player = update_player(&state.player);

    // ── 2. Spawn on schedule, then scroll everything ────────────────────────
    let track = if frame % SPAWN_INTERVAL == 0 {
        spawn_obstacle(&state.track, player.width, rng)
    } else {
        state.track.clone()
    };
    let track = scroll_obstacles(&track, dx);

    // ── 3. Collision ────────────────────────────────────────────────────────
    let hit = track.obstacles.iter().any(|o| collides(&player, o));

    let track = if state.settings.evict_offscreen {
        evict_offscreen(&track)
    } else {
        track
    };

    // ── 4. Score and status ─────────────────────────────────────────────────
    let score = update_score(&state.score, frame);
    let mut sounds = state.sounds.clone();

    let status = if hit {
        info!("game over at frame {} with score {}", frame, score.current_score);
        sounds.push(Sound::Die);
        SessionState::GameOver
    } else {
        SessionState::Playing
    };

    if is_milestone(&score) {
        debug!("milestone {}", score.current_score);
        sounds.push(Sound::Point);
    }

    GameSession {
        player,
        track,
        score,
        background,
        state: status,
        frame,
        sounds,
        ..state.clone()
    }
}

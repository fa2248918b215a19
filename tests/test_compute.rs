use dino_runner::compute::*;
use dino_runner::entities::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn obstacle_at(x: f32, y: f32) -> Obstacle {
    Obstacle {
        x,
        y,
        width: SPRITE_SIZE,
        height: SPRITE_SIZE,
    }
}

fn track_with(xs: &[f32]) -> ObstacleTrack {
    ObstacleTrack {
        obstacles: xs.iter().map(|&x| obstacle_at(x, OBSTACLE_Y)).collect(),
    }
}

// ── new_player ────────────────────────────────────────────────────────────────

#[test]
fn new_player_starts_grounded() {
    let p = new_player();
    assert_eq!(p.x, 10.0);
    assert_eq!(p.y, 80.0);
    assert_eq!(p.rest_y, 80.0);
    assert_eq!(p.width, 44.0);
    assert_eq!(p.height, 44.0);
    assert_eq!(p.gravity_velocity, 0.0);
    assert_eq!(p.animation_frame, 0);
    assert!(is_grounded(&p));
}

// ── player_jump ───────────────────────────────────────────────────────────────

#[test]
fn jump_sets_upward_velocity_and_resets_animation() {
    let mut p = new_player();
    p.animation_phase = 1.7;
    p.animation_frame = 1;
    let p2 = player_jump(&p);
    assert_eq!(p2.gravity_velocity, -7.0);
    assert_eq!(p2.animation_frame, 0);
    assert_eq!(p2.animation_phase, 0.0);
    assert_eq!(p2.y, p.y);
}

#[test]
fn jump_while_airborne_is_ignored() {
    let p = update_player(&player_jump(&new_player()));
    assert!(!is_grounded(&p));
    let p2 = player_jump(&p);
    assert_eq!(p2, p);
}

#[test]
fn jump_does_not_mutate_original() {
    let p = new_player();
    let _p2 = player_jump(&p);
    assert_eq!(p.gravity_velocity, 0.0);
}

// ── update_player ─────────────────────────────────────────────────────────────

#[test]
fn first_frame_after_jump_applies_gravity_then_moves() {
    let p = update_player(&player_jump(&new_player()));
    assert!((p.gravity_velocity - -6.7).abs() < 1e-5);
    assert!((p.y - 73.3).abs() < 1e-4);
}

#[test]
fn jump_arc_returns_to_ground() {
    let mut p = player_jump(&new_player());
    let mut peak = p.y;
    let mut frames = 0;
    loop {
        p = update_player(&p);
        frames += 1;
        peak = peak.min(p.y);
        assert!(p.y <= p.rest_y);
        if is_grounded(&p) {
            break;
        }
        assert!(frames < 100, "never landed");
    }
    // v = -7 + 0.3n reaches the ground again after 46 frames
    assert!((44..=50).contains(&frames), "landed after {}", frames);
    assert!(peak < 10.0, "peak was {}", peak);
    assert_eq!(p.y, p.rest_y);
}

#[test]
fn animation_holds_while_airborne() {
    let mut p = player_jump(&new_player());
    for _ in 0..10 {
        p = update_player(&p);
        assert_eq!(p.animation_phase, 0.0);
        assert_eq!(p.animation_frame, 0);
    }
}

#[test]
fn animation_cycles_through_three_frames() {
    let mut p = new_player();
    for _ in 0..15 {
        p = update_player(&p);
    }
    assert_eq!(p.animation_frame, 1);
    for _ in 0..10 {
        p = update_player(&p);
    }
    assert_eq!(p.animation_frame, 2);
    for _ in 0..10 {
        p = update_player(&p);
    }
    assert_eq!(p.animation_frame, 0);
}

#[test]
fn animation_phase_stays_in_range() {
    let mut p = new_player();
    for _ in 0..500 {
        p = update_player(&p);
        assert!(p.animation_phase >= 0.0 && p.animation_phase < 3.0);
        assert!(p.animation_frame < ANIMATION_FRAMES);
        assert_eq!(p.animation_frame, p.animation_phase.floor() as u8);
    }
}

// ── spawn_obstacle ────────────────────────────────────────────────────────────

#[test]
fn first_spawn_lands_past_the_right_edge() {
    assert_eq!(spawn_range(&ObstacleTrack::default(), 44.0), (723, 823));
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let track = spawn_obstacle(&ObstacleTrack::default(), 44.0, &mut rng);
        assert_eq!(track.obstacles.len(), 1);
        let o = &track.obstacles[0];
        assert!(o.x >= 723.0 && o.x <= 823.0, "x = {}", o.x);
        assert_eq!(o.y, OBSTACLE_Y);
        assert_eq!(o.x.fract(), 0.0);
    }
}

#[test]
fn later_spawn_is_spaced_from_newest() {
    let track = track_with(&[900.0, 300.0]);
    assert_eq!(spawn_range(&track, 44.0), (428, 1051));
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = spawn_obstacle(&track, 44.0, &mut rng);
        assert_eq!(next.obstacles.len(), 3);
        let x = next.obstacles[2].x;
        assert!((428.0..=1051.0).contains(&x), "x = {}", x);
    }
}

#[test]
fn spawn_truncates_fractional_reference() {
    assert_eq!(spawn_range(&track_with(&[300.9]), 44.0), (428, 1051));
    // Truncation is toward zero, not floor
    assert_eq!(spawn_range(&track_with(&[-10.7]), 44.0), (118, 741));
}

#[test]
fn spawn_keeps_existing_obstacles_in_order() {
    let track = track_with(&[100.0, 200.0]);
    let next = spawn_obstacle(&track, 44.0, &mut seeded_rng());
    assert_eq!(next.obstacles[0].x, 100.0);
    assert_eq!(next.obstacles[1].x, 200.0);
    assert_eq!(track.obstacles.len(), 2);
}

// ── scroll / evict ────────────────────────────────────────────────────────────

#[test]
fn scroll_moves_every_obstacle() {
    let track = scroll_obstacles(&track_with(&[100.0, 250.0]), -3.0);
    assert_eq!(track.obstacles[0].x, 97.0);
    assert_eq!(track.obstacles[1].x, 247.0);
}

#[test]
fn evict_drops_fully_offscreen_obstacles() {
    let track = evict_offscreen(&track_with(&[-50.0, -40.0, 300.0]));
    let xs: Vec<f32> = track.obstacles.iter().map(|o| o.x).collect();
    // -40 still has 4 units of its right edge on screen
    assert_eq!(xs, vec![-40.0, 300.0]);
}

#[test]
fn evict_keeps_newest_even_when_offscreen() {
    let track = evict_offscreen(&track_with(&[-300.0, -200.0]));
    let xs: Vec<f32> = track.obstacles.iter().map(|o| o.x).collect();
    assert_eq!(xs, vec![-200.0]);
}

#[test]
fn evict_on_empty_track() {
    assert!(evict_offscreen(&ObstacleTrack::default()).obstacles.is_empty());
}

// ── background ────────────────────────────────────────────────────────────────

#[test]
fn background_scrolls_left() {
    let bg = scroll_background(&ScrollingBackground::default(), -3.0);
    assert_eq!(bg.x, -3.0);
}

#[test]
fn background_wraps_after_one_width() {
    let bg = scroll_background(&ScrollingBackground { x: -620.0 }, -3.0);
    assert_eq!(bg.x, 0.0);
    let bg = scroll_background(&ScrollingBackground { x: -619.0 }, -3.0);
    assert_eq!(bg.x, -622.0);
}

// ── collides ──────────────────────────────────────────────────────────────────

#[test]
fn collision_boundary_is_exclusive() {
    let p = new_player(); // anchor (10, 80)
    assert!(!collides(&p, &obstacle_at(45.0, 80.0))); // exactly 35
    assert!(collides(&p, &obstacle_at(44.999, 80.0))); // 34.999
}

#[test]
fn collision_uses_euclidean_distance() {
    let mut p = new_player();
    p.y = 108.0;
    // 21-28-35 triangle: exactly on the threshold
    assert!(!collides(&p, &obstacle_at(31.0, 80.0)));
    assert!(collides(&p, &obstacle_at(30.0, 80.0)));
}

#[test]
fn cleared_jump_does_not_collide() {
    let mut p = new_player();
    p.y = 40.0;
    assert!(!collides(&p, &obstacle_at(10.0, 80.0)));
    p.y = 46.0;
    assert!(collides(&p, &obstacle_at(10.0, 80.0)));
}

// ── score ─────────────────────────────────────────────────────────────────────

#[test]
fn score_is_frames_over_ten() {
    let mut score = ScoreTracker::default();
    let mut last = 0;
    for f in 0..2_000u64 {
        score = update_score(&score, f);
        assert_eq!(score.current_score as u64, f / 10);
        assert!(score.current_score >= last);
        assert!(score.high_score >= score.current_score);
        last = score.current_score;
    }
}

#[test]
fn high_score_is_kept_when_lower() {
    let score = ScoreTracker {
        current_score: 0,
        high_score: 50,
    };
    let score = update_score(&score, 120);
    assert_eq!(score.current_score, 12);
    assert_eq!(score.high_score, 50);
}

#[test]
fn milestone_holds_for_the_whole_bucket() {
    let at = |f| is_milestone(&update_score(&ScoreTracker::default(), f));
    assert!(!at(0));
    assert!(!at(999));
    assert!(at(1000));
    assert!(at(1009));
    assert!(!at(1010));
    assert!(at(2000));
}

#[test]
fn reset_score_keeps_high_score() {
    let score = ScoreTracker {
        current_score: 33,
        high_score: 40,
    };
    let score = reset_score(&score);
    assert_eq!(score.current_score, 0);
    assert_eq!(score.high_score, 40);
}

// ── properties ────────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn player_never_falls_below_ground(jumps in prop::collection::vec(any::<bool>(), 1..400)) {
        let mut p = new_player();
        for jump in jumps {
            if jump {
                p = player_jump(&p);
            }
            p = update_player(&p);
            prop_assert!(p.y <= p.rest_y);
        }
    }

    #[test]
    fn next_spawn_within_bounds(px in -2_000.0f32..5_000.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = spawn_obstacle(&track_with(&[px]), 44.0, &mut rng);
        let base = px as i64;
        let x = next.obstacles[1].x as i64;
        prop_assert!(x >= base + 128 && x <= base + 623 + 128);
    }

    #[test]
    fn high_score_dominates_history(frames in prop::collection::vec(0u64..50_000, 1..50)) {
        let mut score = ScoreTracker::default();
        let mut best = 0;
        for f in frames {
            score = update_score(&reset_score(&score), f);
            best = best.max(score.current_score);
            prop_assert!(score.high_score >= best);
        }
    }
}

//! Fixed-timestep update: gravity, flap, scrolling, spawning and scoring.

use rand::Rng;

use crate::difficulty::DifficultyTier;
use crate::state::{GameState, Obstacle};
use crate::world;

/// Advances `state` by one frame and returns how many obstacles were passed.
///
/// All randomness comes from `rng`, so the same flap sequence and the same
/// random stream always produce the same states.
pub fn step<R: Rng + ?Sized>(
    state: &mut GameState,
    tier: &DifficultyTier,
    flap: bool,
    rng: &mut R,
) -> u32 {
    let bird = &mut state.bird;
    if flap {
        bird.vy = tier.flap_impulse;
    } else {
        bird.vy += tier.gravity;
    }
    bird.y += bird.vy;

    for obstacle in &mut state.obstacles {
        obstacle.x -= tier.scroll_speed;
    }
    state.obstacles.retain(|o| !o.is_offscreen());

    let should_spawn = match state.rightmost() {
        None => true,
        Some(last) => last.x < world::WIDTH - world::OBSTACLE_SPACING,
    };
    if should_spawn {
        let obstacle = spawn(tier, rng);
        log::debug!(
            "spawned obstacle gap_center={:.1} gap_size={:.1}",
            obstacle.gap_center,
            obstacle.gap_size
        );
        state.obstacles.push(obstacle);
    }
    debug_assert!(state.is_sorted());

    let bird_x = state.bird.x;
    let mut scored = 0;
    for obstacle in &mut state.obstacles {
        if !obstacle.passed && obstacle.center_x() < bird_x {
            obstacle.passed = true;
            scored += 1;
        }
    }
    state.score += scored;
    scored
}

/// Range of gap centers that keeps the whole gap inside the playable band.
pub fn gap_center_range(gap_size: f64) -> (f64, f64) {
    let min = world::TOP + world::GAP_MARGIN + gap_size / 2.0;
    let max = world::GROUND_Y - world::GAP_MARGIN - gap_size / 2.0;
    (min, max.max(min))
}

/// A new obstacle at the right edge of the world.
pub fn spawn<R: Rng + ?Sized>(tier: &DifficultyTier, rng: &mut R) -> Obstacle {
    let (min, max) = gap_center_range(tier.gap_size);
    let gap_center = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    Obstacle::new(world::WIDTH, gap_center, tier.gap_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Level;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_gravity_accumulates_without_flap() {
        let tier = Level::Easy.tier();
        let mut state = GameState::new();
        state.bird.y = 200.0;
        let mut rng = rng();

        let mut last_y = state.bird.y;
        let mut last_vy = state.bird.vy;
        for _ in 0..20 {
            step(&mut state, &tier, false, &mut rng);
            assert!(state.bird.y > last_y);
            assert!(state.bird.vy > last_vy);
            last_y = state.bird.y;
            last_vy = state.bird.vy;
        }
        assert!((state.bird.vy - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        let tier = Level::Easy.tier();
        let mut state = GameState::new();
        state.bird.vy = 9.5;
        let mut rng = rng();

        step(&mut state, &tier, true, &mut rng);
        assert_eq!(state.bird.vy, tier.flap_impulse);
        assert_eq!(state.bird.y, world::BIRD_START_Y + tier.flap_impulse);
    }

    #[test]
    fn test_first_step_spawns_at_right_edge() {
        let tier = Level::Medium.tier();
        let mut state = GameState::new();
        let mut rng = rng();

        step(&mut state, &tier, false, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        let obstacle = &state.obstacles[0];
        assert_eq!(obstacle.x, world::WIDTH);
        assert_eq!(obstacle.gap_size, tier.gap_size);
    }

    #[test]
    fn test_obstacles_scroll_left() {
        let tier = Level::Hard.tier();
        let mut state = GameState::new();
        state.obstacles.push(Obstacle::new(700.0, 260.0, tier.gap_size));
        let mut rng = rng();

        step(&mut state, &tier, false, &mut rng);
        assert_eq!(state.obstacles[0].x, 700.0 - tier.scroll_speed);
    }

    #[test]
    fn test_offscreen_obstacle_removed() {
        let tier = Level::Easy.tier();
        let mut state = GameState::new();
        state
            .obstacles
            .push(Obstacle::new(-world::OBSTACLE_WIDTH + 1.0, 260.0, 170.0));
        state.obstacles.push(Obstacle::new(world::WIDTH - 10.0, 260.0, 170.0));
        state.obstacles[0].passed = true;
        let mut rng = rng();

        step(&mut state, &tier, false, &mut rng);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].x, world::WIDTH - 10.0 - tier.scroll_speed);
    }

    #[test]
    fn test_spawn_waits_for_spacing() {
        let tier = Level::Easy.tier();
        let mut state = GameState::new();
        let mut rng = rng();
        step(&mut state, &tier, false, &mut rng);

        let frames_until_next = (world::OBSTACLE_SPACING / tier.scroll_speed) as usize;
        for _ in 0..frames_until_next - 1 {
            step(&mut state, &tier, true, &mut rng);
            assert_eq!(state.obstacles.len(), 1);
        }
        for _ in 0..2 {
            step(&mut state, &tier, true, &mut rng);
        }
        assert_eq!(state.obstacles.len(), 2);
        assert!(state.is_sorted());
    }

    #[test]
    fn test_spawned_gap_stays_in_bounds() {
        let mut rng = rng();
        for level in Level::ALL {
            let tier = level.tier();
            for _ in 0..200 {
                let obstacle = spawn(&tier, &mut rng);
                assert!(obstacle.gap_top() >= world::TOP + world::GAP_MARGIN - 1e-9);
                assert!(obstacle.gap_bottom() <= world::GROUND_Y - world::GAP_MARGIN + 1e-9);
            }
        }
    }

    #[test]
    fn test_oversized_gap_collapses_range() {
        let (min, max) = gap_center_range(world::GROUND_Y * 2.0);
        assert_eq!(min, max);
    }

    #[test]
    fn test_scoring_once_per_obstacle() {
        let tier = Level::Easy.tier();
        let mut state = GameState::new();
        let start = world::BIRD_X - world::OBSTACLE_WIDTH / 2.0 + 1.0;
        state.obstacles.push(Obstacle::new(start, 260.0, 170.0));
        state.obstacles.push(Obstacle::new(world::WIDTH - 1.0, 260.0, 170.0));
        let mut rng = rng();

        assert_eq!(step(&mut state, &tier, true, &mut rng), 1);
        assert_eq!(state.score, 1);
        assert!(state.obstacles[0].passed);

        assert_eq!(step(&mut state, &tier, true, &mut rng), 0);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let tier = Level::Hard.tier();
        let run = |seed: u64| {
            let mut state = GameState::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for frame in 0..400 {
                step(&mut state, &tier, frame % 20 == 0, &mut rng);
            }
            state
        };
        assert_eq!(run(42), run(42));
    }
}

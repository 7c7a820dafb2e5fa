//! Entity state for one life: the bird, the obstacles and the score.

use crate::world;

#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Fixed horizontal position; the world scrolls past the bird.
    pub x: f64,
    /// Vertical position, growing downward.
    pub y: f64,
    /// Vertical velocity in world units per frame (positive = downward).
    pub vy: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: world::BIRD_X,
            y: world::BIRD_START_Y,
            vy: 0.0,
        }
    }

    pub fn left(&self) -> f64 {
        self.x - world::BIRD_HALF_WIDTH
    }

    pub fn right(&self) -> f64 {
        self.x + world::BIRD_HALF_WIDTH
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

/// A pipe pair with a gap between the top and bottom columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge.
    pub x: f64,
    pub gap_center: f64,
    /// Copied from the tier at spawn time.
    pub gap_size: f64,
    /// Whether this obstacle has already been scored.
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f64, gap_center: f64, gap_size: f64) -> Self {
        Self {
            x,
            gap_center,
            gap_size,
            passed: false,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + world::OBSTACLE_WIDTH
    }

    pub fn center_x(&self) -> f64 {
        self.x + world::OBSTACLE_WIDTH / 2.0
    }

    pub fn gap_top(&self) -> f64 {
        self.gap_center - self.gap_size / 2.0
    }

    pub fn gap_bottom(&self) -> f64 {
        self.gap_center + self.gap_size / 2.0
    }

    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub bird: Bird,
    /// Spawn order, which is also ascending `x` order.
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub alive: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            bird: Bird::new(),
            obstacles: Vec::new(),
            score: 0,
            alive: true,
        }
    }

    /// Back to the start of a life. Obstacles are respawned by the next step.
    pub fn reset(&mut self) {
        self.bird = Bird::new();
        self.obstacles.clear();
        self.score = 0;
        self.alive = true;
    }

    pub fn rightmost(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    pub fn is_sorted(&self) -> bool {
        self.obstacles.windows(2).all(|w| w[0].x <= w[1].x)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new();
        assert!(state.alive);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.bird.x, world::BIRD_X);
        assert_eq!(state.bird.y, world::BIRD_START_Y);
        assert_eq!(state.bird.vy, 0.0);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new();
        state.bird.y = 10.0;
        state.bird.vy = 4.0;
        state.score = 7;
        state.alive = false;
        state.obstacles.push(Obstacle::new(300.0, 200.0, 150.0));

        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut once = GameState::new();
        once.score = 3;
        once.obstacles.push(Obstacle::new(500.0, 250.0, 140.0));
        let mut twice = once.clone();

        once.reset();
        twice.reset();
        twice.reset();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_gap_band() {
        let obstacle = Obstacle::new(0.0, 150.0, 100.0);
        assert_eq!(obstacle.gap_top(), 100.0);
        assert_eq!(obstacle.gap_bottom(), 200.0);
        assert!(!obstacle.passed);
    }

    #[test]
    fn test_offscreen_only_past_left_edge() {
        let mut obstacle = Obstacle::new(-world::OBSTACLE_WIDTH + 1.0, 150.0, 100.0);
        assert!(!obstacle.is_offscreen());
        obstacle.x = -world::OBSTACLE_WIDTH - 0.5;
        assert!(obstacle.is_offscreen());
    }
}

//! Bird versus ceiling, ground and pipe columns.

use crate::state::{Bird, GameState, Obstacle};
use crate::world;

pub fn collided(state: &GameState) -> bool {
    let bird = &state.bird;
    out_of_bounds(bird) || state.obstacles.iter().any(|o| hits_obstacle(bird, o))
}

pub fn out_of_bounds(bird: &Bird) -> bool {
    bird.y <= world::TOP || bird.y >= world::GROUND_Y
}

/// True when the bird is inside the obstacle's columns but outside its gap.
pub fn hits_obstacle(bird: &Bird, obstacle: &Obstacle) -> bool {
    overlaps_horizontally(bird, obstacle)
        && (bird.y < obstacle.gap_top() || bird.y > obstacle.gap_bottom())
}

pub fn overlaps_horizontally(bird: &Bird, obstacle: &Obstacle) -> bool {
    bird.right() > obstacle.x && bird.left() < obstacle.right()
}

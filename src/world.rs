//! Logical playfield geometry.
//!
//! Physics runs in these units regardless of terminal size; the renderer
//! scales them onto its pixel buffer.

/// Width of the visible playfield.
pub const WIDTH: f64 = 960.0;
/// Full height, including the ground strip.
pub const HEIGHT: f64 = 600.0;
/// Ceiling the bird must stay below.
pub const TOP: f64 = 0.0;
/// Ground surface the bird must stay above.
pub const GROUND_Y: f64 = 520.0;

pub const OBSTACLE_WIDTH: f64 = 80.0;
/// Horizontal distance between consecutive obstacles.
pub const OBSTACLE_SPACING: f64 = 300.0;
/// Minimum distance between a gap edge and the ceiling or ground.
pub const GAP_MARGIN: f64 = 50.0;

pub const BIRD_X: f64 = 200.0;
pub const BIRD_START_Y: f64 = 260.0;
/// Half of the bird's horizontal extent, used for obstacle overlap.
pub const BIRD_HALF_WIDTH: f64 = 20.0;
/// Half of the bird's drawn height.
pub const BIRD_HALF_HEIGHT: f64 = 15.0;

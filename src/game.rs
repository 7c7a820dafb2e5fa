//! The Playing/Dead state machine driven once per frame.

use rand::Rng;

use crate::collision;
use crate::difficulty::DifficultyTier;
use crate::physics;
use crate::state::GameState;

/// Ground scroll per frame while the bird hovers before the first flap.
const HOVER_SCROLL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Frozen after a crash; restarts once `frames_left` runs out.
    Dead { frames_left: u32 },
}

/// Things that happened during a tick, for sound and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    Scored,
    Crashed,
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOptions {
    /// Frames spent in `Dead` before the automatic restart.
    pub restart_frames: u32,
    /// Hold the bird in place at the start of each life until the first flap.
    pub hover: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            restart_frames: 90,
            hover: true,
        }
    }
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub state: &'a GameState,
    pub tier: &'a DifficultyTier,
    pub phase: Phase,
    pub best: u32,
    pub hovering: bool,
    pub frame: u64,
    /// Distance the ground has scrolled, for parallax decoration.
    pub scroll: f64,
}

pub struct Game<R> {
    tier: DifficultyTier,
    options: GameOptions,
    state: GameState,
    phase: Phase,
    best: u32,
    hovering: bool,
    frame: u64,
    scroll: f64,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(tier: DifficultyTier, options: GameOptions, rng: R) -> Self {
        Self {
            tier,
            options,
            state: GameState::new(),
            phase: Phase::Playing,
            best: 0,
            hovering: options.hover,
            frame: 0,
            scroll: 0.0,
            rng,
        }
    }

    /// Runs one frame of the state machine.
    pub fn tick(&mut self, flap: bool) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.frame += 1;

        match self.phase {
            Phase::Playing => {
                if self.hovering {
                    if !flap {
                        self.scroll += HOVER_SCROLL;
                        return events;
                    }
                    self.hovering = false;
                }
                if flap {
                    events.push(GameEvent::Flapped);
                }

                let scored = physics::step(&mut self.state, &self.tier, flap, &mut self.rng);
                events.extend((0..scored).map(|_| GameEvent::Scored));
                self.scroll += self.tier.scroll_speed;

                if collision::collided(&self.state) {
                    self.die();
                    events.push(GameEvent::Crashed);
                }
            }
            Phase::Dead { frames_left: 0 } => {
                self.restart();
                events.push(GameEvent::Restarted);
            }
            Phase::Dead { frames_left } => {
                self.phase = Phase::Dead {
                    frames_left: frames_left - 1,
                };
            }
        }
        events
    }

    fn die(&mut self) {
        self.state.alive = false;
        self.phase = Phase::Dead {
            frames_left: self.options.restart_frames,
        };
        log::info!("crashed with score {}", self.state.score);
        if self.state.score > self.best {
            self.best = self.state.score;
            log::info!("new best score {}", self.best);
        }
    }

    /// The Dead to Playing transition: a fresh life on the same tier.
    pub fn restart(&mut self) {
        self.state.reset();
        self.phase = Phase::Playing;
        self.hovering = self.options.hover;
        log::debug!("restarted on {}", self.tier.level);
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            state: &self.state,
            tier: &self.tier,
            phase: self.phase,
            best: self.best,
            hovering: self.hovering,
            frame: self.frame,
            scroll: self.scroll,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn tier(&self) -> &DifficultyTier {
        &self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Level;
    use crate::state::Obstacle;
    use crate::world;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game(options: GameOptions) -> Game<ChaCha8Rng> {
        Game::new(Level::Easy.tier(), options, ChaCha8Rng::seed_from_u64(1))
    }

    fn no_hover(restart_frames: u32) -> GameOptions {
        GameOptions {
            restart_frames,
            hover: false,
        }
    }

    #[test]
    fn test_starts_playing() {
        let game = game(GameOptions::default());
        assert_eq!(game.phase(), Phase::Playing);
        assert!(game.is_hovering());
        assert_eq!(game.state(), &GameState::new());
    }

    #[test]
    fn test_hover_holds_until_flap() {
        let mut game = game(GameOptions::default());
        for _ in 0..30 {
            assert!(game.tick(false).is_empty());
        }
        assert_eq!(game.state(), &GameState::new());

        let events = game.tick(true);
        assert_eq!(events, vec![GameEvent::Flapped]);
        assert!(!game.is_hovering());
        assert_eq!(game.state().bird.vy, game.tier().flap_impulse);
    }

    #[test]
    fn test_falling_to_ground_kills() {
        let mut game = game(no_hover(3));
        let mut crashed = false;
        for _ in 0..200 {
            if game.tick(false).contains(&GameEvent::Crashed) {
                crashed = true;
                break;
            }
        }
        assert!(crashed);
        assert!(!game.state().alive);
        assert_eq!(game.phase(), Phase::Dead { frames_left: 3 });
    }

    #[test]
    fn test_dead_restarts_after_delay() {
        let mut game = game(no_hover(2));
        game.state_mut().bird.y = world::GROUND_Y + 1.0;
        assert_eq!(game.tick(false), vec![GameEvent::Crashed]);

        // Flaps are ignored while dead.
        assert!(game.tick(true).is_empty());
        assert!(game.tick(false).is_empty());
        assert_eq!(game.phase(), Phase::Dead { frames_left: 0 });

        assert_eq!(game.tick(false), vec![GameEvent::Restarted]);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.state(), &GameState::new());
    }

    #[test]
    fn test_zero_delay_restarts_next_frame() {
        let mut game = game(no_hover(0));
        game.state_mut().bird.y = world::TOP - 1.0;
        game.tick(false);
        assert!(matches!(game.phase(), Phase::Dead { .. }));
        assert_eq!(game.tick(false), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut game = game(GameOptions::default());
        game.tick(true);
        for _ in 0..10 {
            game.tick(false);
        }
        game.restart();
        let once = game.state().clone();
        game.restart();
        assert_eq!(game.state(), &once);
        assert!(game.is_hovering());
    }

    #[test]
    fn test_best_score_survives_restart() {
        let mut game = game(no_hover(0));
        game.state_mut().score = 4;
        game.state_mut().bird.y = world::GROUND_Y;
        game.tick(false);
        assert_eq!(game.best(), 4);

        game.tick(false);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.best(), 4);

        game.state_mut().score = 2;
        game.state_mut().bird.y = world::GROUND_Y;
        game.tick(false);
        assert_eq!(game.best(), 4);
    }

    #[test]
    fn test_pipe_hit_kills() {
        let mut game = game(no_hover(5));
        let tier = *game.tier();
        game.state_mut().obstacles.push(Obstacle::new(
            world::BIRD_X - 10.0 + tier.scroll_speed,
            100.0,
            tier.gap_size,
        ));
        let events = game.tick(false);
        assert!(events.contains(&GameEvent::Crashed));
    }

    #[test]
    fn test_scored_event() {
        let mut game = game(no_hover(5));
        let start = world::BIRD_X - world::OBSTACLE_WIDTH / 2.0 + 1.0;
        game.state_mut()
            .obstacles
            .push(Obstacle::new(start, world::BIRD_START_Y, 400.0));
        game.state_mut()
            .obstacles
            .push(Obstacle::new(world::WIDTH, world::BIRD_START_Y, 400.0));
        let events = game.tick(true);
        assert_eq!(events, vec![GameEvent::Flapped, GameEvent::Scored]);
        assert_eq!(game.state().score, 1);
    }
}

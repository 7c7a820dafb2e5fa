//! A Flappy Bird clone for the terminal.
//!
//! The game core ([`physics`], [`collision`], [`game`]) is plain data and
//! functions over a [`state::GameState`]; the terminal, keyboard and sound
//! live behind [`render::Renderer`], [`input::InputSource`] and
//! [`audio::Audio`].

pub mod app;
pub mod audio;
pub mod collision;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod input;
pub mod physics;
pub mod render;
pub mod state;
pub mod world;

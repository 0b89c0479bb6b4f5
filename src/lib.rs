//! neonbird - a neon-styled Flappy Bird for the terminal.
//!
//! The simulation core (physics, obstacles, collision, scoring, difficulty,
//! and the assisted/strict ruleset switch) lives here as plain logic; the
//! binary wires it to crossterm input, a ratatui scene, rodio audio, and a
//! JSON profile on disk.

pub mod audio;
pub mod bird;
pub mod collision;
pub mod constants;
pub mod difficulty;
pub mod feedback;
pub mod particle;
pub mod pipe;
pub mod profile;
pub mod ruleset;
pub mod session;
pub mod ui;

pub use constants::Canvas;
pub use ruleset::{Mode, Ruleset};
pub use session::{GameSession, SessionPhase};

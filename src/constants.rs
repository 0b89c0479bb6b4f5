//! Geometry and timing constants for the simulation core.
//!
//! The game runs on a fixed logical canvas; the render scene scales it to
//! whatever terminal area is available.

// Logical canvas geometry
pub const CANVAS_WIDTH: f64 = 360.0;
pub const CANVAS_HEIGHT: f64 = 640.0;
pub const FLOOR_HEIGHT: f64 = 50.0;

// Bird geometry
pub const BIRD_WIDTH: f64 = 40.0;
pub const BIRD_HEIGHT: f64 = 30.0;

// Pipe geometry
pub const PIPE_WIDTH: f64 = 60.0;

// Timing
pub const TICK_INTERVAL_MS: u64 = 16;
/// Delay before the automatic kickoff flap after a session starts.
pub const KICKOFF_DELAY_MS: u64 = 100;
/// Delay before the final score is surfaced after termination.
pub const SCORE_REVEAL_DELAY_MS: u64 = 1000;

// Particles
/// A trail particle is emitted every Nth entity tick while running.
pub const TRAIL_TICK_PERIOD: u64 = 3;
pub const SCORE_BURST_COUNT: usize = 10;
pub const EXPLOSION_BURST_COUNT: usize = 30;
pub const PARTICLE_LIFE_TICKS: i32 = 30;
pub const PARTICLE_ALPHA_DECAY: f64 = 0.02;

/// Fixed logical drawing surface the core simulates against.
///
/// Injected as configuration; the core never discovers its surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub floor_height: f64,
}

impl Canvas {
    /// The standard 360x640 playfield with a 50-unit floor strip.
    pub fn standard() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            floor_height: FLOOR_HEIGHT,
        }
    }

    /// Y coordinate of the top of the floor strip.
    pub fn floor_y(&self) -> f64 {
        self.height - self.floor_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_canvas_floor() {
        let canvas = Canvas::standard();
        assert!((canvas.floor_y() - 590.0).abs() < f64::EPSILON);
    }
}

//! Obstacle generation: pipe pairs with a randomized, constrained gap.

use crate::constants::{Canvas, PIPE_WIDTH};
use crate::ruleset::Ruleset;
use rand::Rng;

/// A vertical pipe pair the bird must pass through.
///
/// The gap always spans exactly the ruleset's spacing, and sits between the
/// top margin and the floor-side bottom margin.
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge; decreases monotonically as the pipe scrolls.
    pub x: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    pub width: f64,
    /// Set once when the bird earns this pipe's point.
    pub scored: bool,
}

impl Pipe {
    /// Construct a pipe at the right edge of the canvas with the gap top
    /// drawn uniformly from the legal placement range.
    ///
    /// The draw is re-clamped to the same bounds afterwards; with a valid
    /// ruleset the clamp is a no-op, and the gap invariants hold either way.
    pub fn spawn<R: Rng>(rng: &mut R, canvas: &Canvas, rules: &Ruleset) -> Self {
        let min_top = rules.min_top_margin;
        let range = rules.gap_range(canvas).max(0.0);
        let mut gap_top = min_top + rng.gen::<f64>() * range;
        gap_top = gap_top.clamp(min_top, min_top + range);

        Self {
            x: canvas.width,
            gap_top,
            gap_bottom: gap_top + rules.pipe_spacing,
            width: PIPE_WIDTH,
            scored: false,
        }
    }

    /// Scroll left by the current game speed.
    pub fn advance(&mut self, speed: f64) {
        self.x -= speed;
    }

    /// Fully past the left edge; the orchestrator prunes these.
    pub fn off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::Mode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gap_invariants_over_many_spawns() {
        let canvas = Canvas::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for mode in [Mode::Assisted, Mode::Strict] {
            let rules = Ruleset::for_mode(mode);
            for _ in 0..200 {
                let pipe = Pipe::spawn(&mut rng, &canvas, &rules);
                assert!(
                    (pipe.gap_bottom - pipe.gap_top - rules.pipe_spacing).abs() < 1e-9,
                    "gap span must equal spacing"
                );
                assert!(pipe.gap_top >= rules.min_top_margin);
                assert!(pipe.gap_bottom <= canvas.floor_y() - rules.min_bottom_margin + 1e-9);
                assert!((pipe.x - canvas.width).abs() < f64::EPSILON);
                assert!(!pipe.scored);
            }
        }
    }

    #[test]
    fn test_zero_range_pins_gap_to_top_margin() {
        // Exactly-zero placement range is valid config; the gap has one
        // legal position.
        let canvas = Canvas::standard();
        let mut rules = Ruleset::strict();
        rules.pipe_spacing = canvas.floor_y() - rules.min_top_margin - rules.min_bottom_margin;
        assert!(rules.validate(&canvas).is_ok());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pipe = Pipe::spawn(&mut rng, &canvas, &rules);
        assert!((pipe.gap_top - rules.min_top_margin).abs() < 1e-9);
    }

    #[test]
    fn test_advance_and_retirement() {
        let canvas = Canvas::standard();
        let rules = Ruleset::assisted();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut pipe = Pipe::spawn(&mut rng, &canvas, &rules);
        let x0 = pipe.x;
        pipe.advance(1.3);
        assert!((x0 - pipe.x - 1.3).abs() < f64::EPSILON);
        assert!(!pipe.off_screen());

        pipe.x = -pipe.width + 0.5;
        assert!(!pipe.off_screen());
        pipe.x = -pipe.width - 0.5;
        assert!(pipe.off_screen());
    }
}

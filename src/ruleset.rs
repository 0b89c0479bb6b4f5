//! Rulesets: the immutable constant bundles selected by game mode.
//!
//! Every component reads its tuning from the active [`Ruleset`] instead of
//! branching on a mode flag. Switching modes constructs a fresh bundle.

use crate::constants::Canvas;
use serde::{Deserialize, Serialize};
use std::io;

/// The two rule variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Shielded play: no pipe collisions, floor bounces, periodic auto-flap.
    Assisted,
    /// Full collision detection and floor death.
    Strict,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Assisted => Self::Strict,
            Self::Strict => Self::Assisted,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Assisted => "ASSISTED",
            Self::Strict => "STRICT",
        }
    }
}

/// Where along a pipe the bird must be to earn its point.
///
/// Assisted mode awards at the gap midpoint, strict mode at the trailing
/// edge. The asymmetry is deliberate and changes observable scoring timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringThreshold {
    GapMidpoint,
    TrailingEdge,
}

/// Periodic flap assistance, active in assisted mode only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssistPolicy {
    /// How often the assistance timer fires.
    pub period_ms: u64,
    /// Flap only when the bird is falling faster than this.
    pub velocity_threshold: f64,
}

/// The full constant set consumed by physics, spawning, collision and
/// difficulty. Constructed per mode; never mutated mid-session except by a
/// whole-bundle swap on mode toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ruleset {
    pub mode: Mode,

    // Entity physics (per tick)
    pub gravity: f64,
    pub lift: f64,
    pub max_fall_speed: f64,
    pub rotation_factor: f64,
    pub max_rotation: f64,
    /// Upward velocity applied when the bird clips the ceiling.
    pub ceiling_bounce: f64,
    /// `Some(v)` bounces off the floor with velocity `v` (plus an auto-flap);
    /// `None` means floor contact terminates the session.
    pub floor_bounce: Option<f64>,

    // Obstacle construction
    pub pipe_spacing: f64,
    pub min_top_margin: f64,
    pub min_bottom_margin: f64,

    // Collision & scoring
    pub collision_enabled: bool,
    /// Forgiveness margin shrinking both hitboxes before the overlap test.
    pub hitbox_padding: f64,
    pub scoring_threshold: ScoringThreshold,

    // Difficulty ramp
    pub base_speed: f64,
    pub speed_step: f64,
    pub speed_cap: f64,
    pub base_interval_ms: u64,
    pub interval_step_ms: u64,
    pub interval_floor_ms: u64,
    /// Ramp applies while `band_start < score <= band_end`.
    pub band_start: u32,
    pub band_end: u32,

    /// Extra delay added before the first pipe of a session.
    pub first_pipe_delay_ms: u64,

    pub assist: Option<AssistPolicy>,
}

impl Ruleset {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Assisted => Self::assisted(),
            Mode::Strict => Self::strict(),
        }
    }

    /// Gentle physics, wide gaps, no collision enforcement.
    pub fn assisted() -> Self {
        Self {
            mode: Mode::Assisted,
            gravity: 0.12,
            lift: -5.0,
            max_fall_speed: 5.0,
            rotation_factor: 0.02,
            max_rotation: std::f64::consts::PI / 8.0,
            ceiling_bounce: 1.0,
            floor_bounce: Some(-3.0),
            pipe_spacing: 250.0,
            min_top_margin: 100.0,
            min_bottom_margin: 150.0,
            collision_enabled: false,
            hitbox_padding: 15.0,
            scoring_threshold: ScoringThreshold::GapMidpoint,
            base_speed: 1.0,
            speed_step: 0.02,
            speed_cap: 1.4,
            base_interval_ms: 3000,
            interval_step_ms: 20,
            interval_floor_ms: 2200,
            band_start: 10,
            band_end: 30,
            first_pipe_delay_ms: 2000,
            assist: Some(AssistPolicy {
                period_ms: 1500,
                velocity_threshold: 1.0,
            }),
        }
    }

    /// Full-rules play: heavier gravity, tighter gaps, collisions kill.
    pub fn strict() -> Self {
        Self {
            mode: Mode::Strict,
            gravity: 0.25,
            lift: -6.5,
            max_fall_speed: 8.0,
            rotation_factor: 0.03,
            max_rotation: std::f64::consts::PI / 6.0,
            ceiling_bounce: 2.0,
            floor_bounce: None,
            pipe_spacing: 200.0,
            min_top_margin: 80.0,
            min_bottom_margin: 120.0,
            collision_enabled: true,
            hitbox_padding: 5.0,
            scoring_threshold: ScoringThreshold::TrailingEdge,
            base_speed: 1.5,
            speed_step: 0.03,
            speed_cap: 2.0,
            base_interval_ms: 2500,
            interval_step_ms: 30,
            interval_floor_ms: 1800,
            band_start: 5,
            band_end: 20,
            first_pipe_delay_ms: 1500,
            assist: None,
        }
    }

    /// Available vertical range for the gap top on the given canvas.
    pub fn gap_range(&self, canvas: &Canvas) -> f64 {
        canvas.floor_y() - self.pipe_spacing - self.min_top_margin - self.min_bottom_margin
    }

    /// Reject configurations that cannot place a gap on the canvas.
    ///
    /// Checked at session start; a negative placement range is a fatal
    /// configuration error, never silently clamped.
    pub fn validate(&self, canvas: &Canvas) -> io::Result<()> {
        if canvas.floor_height >= canvas.height {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "floor height {} leaves no playfield on a {}-unit canvas",
                    canvas.floor_height, canvas.height
                ),
            ));
        }
        if self.gap_range(canvas) < 0.0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "pipe spacing {} plus margins {}+{} exceeds the {} units above the floor",
                    self.pipe_spacing,
                    self.min_top_margin,
                    self.min_bottom_margin,
                    canvas.floor_y()
                ),
            ));
        }
        Ok(())
    }
}

//! Entity kinematics: the bird's vertical physics and boundary policy.

use crate::constants::{Canvas, BIRD_HEIGHT, BIRD_WIDTH, TRAIL_TICK_PERIOD};
use crate::ruleset::Ruleset;

/// What the bird hit (if anything) during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloorContact {
    None,
    /// Assisted floor policy: clamped and bounced back up.
    Bounced,
    /// Strict floor policy: clamped, velocity zeroed, session should end.
    Grounded,
}

/// Outcome of one kinematics tick, consumed by the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct StepResult {
    pub floor: FloorContact,
    /// Cosmetic trail particle due this tick.
    pub spawn_trail: bool,
}

/// The player entity. X is fixed for the whole session; only y, velocity and
/// the derived rotation change.
#[derive(Debug, Clone)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical velocity, positive downward.
    pub velocity: f64,
    /// Derived from velocity each tick, bounded by the ruleset.
    pub rotation: f64,
    trail_tick: u64,
}

impl Bird {
    /// Spawn at a third of the canvas width, vertically centered, with the
    /// half-lift starting velocity so the bird is not in free fall at t=0.
    pub fn new(canvas: &Canvas, rules: &Ruleset) -> Self {
        Self {
            x: canvas.width / 3.0,
            y: canvas.height / 2.0,
            width: BIRD_WIDTH,
            height: BIRD_HEIGHT,
            velocity: rules.lift / 2.0,
            rotation: 0.0,
            trail_tick: 0,
        }
    }

    /// Set velocity to the ruleset's lift. The lift is read at call time, so
    /// a mode toggle changes the very next flap.
    pub fn flap(&mut self, rules: &Ruleset) {
        self.velocity = rules.lift;
    }

    /// One tick of simulation: gravity, integration, fall clamp, rotation,
    /// then floor and ceiling policy.
    pub fn update(&mut self, rules: &Ruleset, canvas: &Canvas) -> StepResult {
        self.velocity += rules.gravity;
        self.y += self.velocity;

        if self.velocity > rules.max_fall_speed {
            self.velocity = rules.max_fall_speed;
        }

        // Rotation tracks the pre-boundary velocity.
        self.rotation =
            (self.velocity * rules.rotation_factor).clamp(-rules.max_rotation, rules.max_rotation);

        let mut floor = FloorContact::None;
        let floor_y = canvas.floor_y();
        if self.y + self.height > floor_y {
            self.y = floor_y - self.height;
            match rules.floor_bounce {
                Some(bounce) => {
                    self.velocity = bounce;
                    floor = FloorContact::Bounced;
                }
                None => {
                    self.velocity = 0.0;
                    floor = FloorContact::Grounded;
                }
            }
        }

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = rules.ceiling_bounce;
        }

        self.trail_tick += 1;
        StepResult {
            floor,
            spawn_trail: self.trail_tick % TRAIL_TICK_PERIOD == 0,
        }
    }
}

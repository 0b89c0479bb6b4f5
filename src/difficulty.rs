//! Difficulty ramp: obstacle speed and spawn interval as a function of score.
//!
//! Re-evaluated on spawn events only. Within the ruleset's score band the
//! values move linearly toward their caps; outside the band they hold at the
//! last computed level, so difficulty never relaxes within a session.

use crate::ruleset::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Horizontal pipe speed per tick.
    pub speed: f64,
    /// Milliseconds between spawns.
    pub interval_ms: u64,
}

impl Difficulty {
    pub fn initial(rules: &Ruleset) -> Self {
        Self {
            speed: rules.base_speed,
            interval_ms: rules.base_interval_ms,
        }
    }

    /// Recompute from the current score if it falls inside the ramp band.
    pub fn reevaluate(&mut self, score: u32, rules: &Ruleset) {
        if score > rules.band_start && score <= rules.band_end {
            let steps = score - rules.band_start;
            self.speed = (rules.base_speed + f64::from(steps) * rules.speed_step).min(rules.speed_cap);
            self.interval_ms = rules
                .base_interval_ms
                .saturating_sub(u64::from(steps) * rules.interval_step_ms)
                .max(rules.interval_floor_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_matches_ruleset() {
        let rules = Ruleset::assisted();
        let d = Difficulty::initial(&rules);
        assert!((d.speed - 1.0).abs() < f64::EPSILON);
        assert_eq!(d.interval_ms, 3000);
    }

    #[test]
    fn test_assisted_example_scenario_score_25() {
        let rules = Ruleset::assisted();
        let mut d = Difficulty::initial(&rules);
        d.reevaluate(25, &rules);
        assert!((d.speed - 1.3).abs() < 1e-9);
        assert_eq!(d.interval_ms, 2700);
    }

    #[test]
    fn test_assisted_speed_caps_at_band_end() {
        let rules = Ruleset::assisted();
        let mut d = Difficulty::initial(&rules);
        d.reevaluate(30, &rules);
        assert!((d.speed - 1.4).abs() < 1e-9);
        assert_eq!(d.interval_ms, 2600);
    }

    #[test]
    fn test_caps_clamp_with_steep_steps() {
        let mut rules = Ruleset::assisted();
        rules.speed_step = 1.0;
        rules.interval_step_ms = 500;
        let mut d = Difficulty::initial(&rules);
        d.reevaluate(20, &rules);
        assert!((d.speed - rules.speed_cap).abs() < f64::EPSILON);
        assert_eq!(d.interval_ms, rules.interval_floor_ms);
    }

    #[test]
    fn test_holds_outside_band() {
        let rules = Ruleset::strict();
        let mut d = Difficulty::initial(&rules);

        // Below the band: nothing moves.
        d.reevaluate(5, &rules);
        assert_eq!(d, Difficulty::initial(&rules));

        // Ride to the band end, then past it: values hold.
        d.reevaluate(20, &rules);
        let at_end = d;
        d.reevaluate(21, &rules);
        d.reevaluate(50, &rules);
        assert_eq!(d, at_end);
    }

    #[test]
    fn test_monotonic_across_rising_scores() {
        for rules in [Ruleset::assisted(), Ruleset::strict()] {
            let mut d = Difficulty::initial(&rules);
            let mut prev = d;
            for score in 0..=40 {
                d.reevaluate(score, &rules);
                assert!(d.speed >= prev.speed, "speed regressed at score {score}");
                assert!(
                    d.interval_ms <= prev.interval_ms,
                    "interval grew at score {score}"
                );
                prev = d;
            }
        }
    }
}

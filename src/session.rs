//! Session orchestration: the tick sequencer and session state machine.
//!
//! One `GameSession` owns all mutable game state for the process. A tick
//! advances the bird, scrolls and scores pipes, spawns new obstacles on the
//! cadence the difficulty controller dictates, prunes expired entities, and
//! drives the Idle -> Running -> Ended state machine. All timing is injected
//! through `Instant` arguments so tests control the clock.

use crate::bird::{Bird, FloorContact};
use crate::constants::{Canvas, KICKOFF_DELAY_MS, SCORE_REVEAL_DELAY_MS};
use crate::difficulty::Difficulty;
use crate::feedback::{FeedbackEvent, FeedbackSink};
use crate::particle::{self, Particle};
use crate::pipe::Pipe;
use crate::profile::ScoreStore;
use crate::ruleset::{Mode, Ruleset};
use rand::Rng;
use std::io;
use std::time::{Duration, Instant};

/// Where the session is in its lifecycle.
///
/// `Idle` means never started this process; `Ended` means a run finished.
/// Both accept `start_session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Running,
    Ended,
}

/// The one session/context object. No globals: everything the components
/// need flows through here.
pub struct GameSession {
    pub canvas: Canvas,
    pub rules: Ruleset,
    pub phase: SessionPhase,

    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub particles: Vec<Particle>,

    pub score: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,

    /// Final score surfaced for display, set after the reveal delay.
    pub final_score: Option<u32>,
    /// Feedback or persistence requests that failed and were swallowed.
    pub swallowed_failures: u32,

    // Scheduled deadlines owned by the session; all cancelled on Ended.
    last_spawn: Option<Instant>,
    kickoff_at: Option<Instant>,
    assist_due: Option<Instant>,
    reveal_at: Option<Instant>,

    sink: Box<dyn FeedbackSink>,
    store: Box<dyn ScoreStore>,
}

impl GameSession {
    /// Build the idle session shown before the first run. The display bird
    /// hangs motionless until `start_session`.
    pub fn new(
        canvas: Canvas,
        mode: Mode,
        high_score: u32,
        sink: Box<dyn FeedbackSink>,
        store: Box<dyn ScoreStore>,
    ) -> Self {
        let rules = Ruleset::for_mode(mode);
        let mut bird = Bird::new(&canvas, &rules);
        bird.velocity = 0.0;
        Self {
            canvas,
            rules,
            phase: SessionPhase::Idle,
            bird,
            pipes: Vec::new(),
            particles: Vec::new(),
            score: 0,
            high_score,
            difficulty: Difficulty::initial(&rules),
            final_score: None,
            swallowed_failures: 0,
            last_spawn: None,
            kickoff_at: None,
            assist_due: None,
            reveal_at: None,
            sink,
            store,
        }
    }

    pub fn mode(&self) -> Mode {
        self.rules.mode
    }

    /// Reset all per-session state and enter `Running`.
    ///
    /// Validates the active ruleset against the canvas first; an impossible
    /// gap placement is a fatal configuration error. The first pipe is
    /// scheduled one spawn interval plus the mode's extra delay out, and a
    /// kickoff flap is queued so the bird moves before any player input.
    pub fn start_session(&mut self, now: Instant) -> io::Result<()> {
        self.rules.validate(&self.canvas)?;

        self.bird = Bird::new(&self.canvas, &self.rules);
        self.pipes.clear();
        self.particles.clear();
        self.score = 0;
        self.difficulty = Difficulty::initial(&self.rules);
        self.final_score = None;
        self.reveal_at = None;

        self.last_spawn = Some(now + Duration::from_millis(self.rules.first_pipe_delay_ms));
        self.kickoff_at = Some(now + Duration::from_millis(KICKOFF_DELAY_MS));
        self.schedule_assist(now);

        self.phase = SessionPhase::Running;
        self.emit(FeedbackEvent::AmbientStart);
        Ok(())
    }

    /// Swap the full ruleset for the other mode.
    ///
    /// Permitted mid-session: the live bird's lift changes with the bundle
    /// (it is read at flap time), and the assist timer is created or torn
    /// down to match the new mode immediately.
    pub fn toggle_mode(&mut self, now: Instant) {
        self.rules = Ruleset::for_mode(self.rules.mode.toggled());
        if self.phase == SessionPhase::Running {
            self.schedule_assist(now);
        } else {
            self.assist_due = None;
        }
    }

    /// Player (or assist timer) flap. Ignored outside `Running`.
    pub fn flap(&mut self) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.bird.flap(&self.rules);
        self.emit(FeedbackEvent::Thrust);
    }

    /// End the running session. Idempotent: calling again while `Ended` is
    /// a no-op. Cancels every scheduled task, persists a new high score at
    /// most once, and spawns the explosion burst.
    pub fn terminate<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        if self.phase != SessionPhase::Running {
            return;
        }
        self.phase = SessionPhase::Ended;
        self.assist_due = None;
        self.kickoff_at = None;
        self.last_spawn = None;

        self.emit(FeedbackEvent::Impact);
        self.emit(FeedbackEvent::AmbientStop);
        particle::spawn_explosion(rng, &mut self.particles, self.bird.x, self.bird.y);

        if self.score > self.high_score {
            self.high_score = self.score;
            if self.store.save_high_score(self.score).is_err() {
                self.swallowed_failures += 1;
            }
        }

        self.reveal_at = Some(now + Duration::from_millis(SCORE_REVEAL_DELAY_MS));
    }

    /// One frame of simulation. Only `Running` sessions advance; an `Ended`
    /// session merely waits out the score-reveal delay, so no gameplay tick
    /// can dangle after termination.
    pub fn tick<R: Rng>(&mut self, now: Instant, rng: &mut R) {
        match self.phase {
            SessionPhase::Idle => return,
            SessionPhase::Ended => {
                if let Some(at) = self.reveal_at {
                    if now >= at {
                        self.final_score = Some(self.score);
                        self.reveal_at = None;
                    }
                }
                return;
            }
            SessionPhase::Running => {}
        }

        // Deferred kickoff flap shortly after start.
        if let Some(at) = self.kickoff_at {
            if now >= at {
                self.kickoff_at = None;
                self.flap();
            }
        }

        // Assist timer: the one external mutation of entity state, applied
        // here so it is atomic with respect to the tick.
        if let (Some(due), Some(assist)) = (self.assist_due, self.rules.assist) {
            if now >= due {
                if self.bird.velocity > assist.velocity_threshold {
                    self.flap();
                }
                self.assist_due = Some(now + Duration::from_millis(assist.period_ms));
            }
        }

        // Entity kinematics and floor policy.
        let step = self.bird.update(&self.rules, &self.canvas);
        match step.floor {
            FloorContact::Bounced => self.flap(),
            FloorContact::Grounded => {
                self.terminate(now, rng);
                return;
            }
            FloorContact::None => {}
        }
        if step.spawn_trail {
            self.particles.push(particle::spawn_trail(rng, &self.bird));
        }

        // Obstacles: scroll, then the two independent checks per pipe.
        let mut newly_scored = 0u32;
        let mut collided = false;
        for pipe in &mut self.pipes {
            pipe.advance(self.difficulty.speed);
            if !pipe.scored && crate::collision::passed_scoring_line(&self.bird, pipe, &self.rules) {
                pipe.scored = true;
                newly_scored += 1;
            }
            if crate::collision::overlaps_pipe(&self.bird, pipe, &self.rules) {
                collided = true;
            }
        }
        self.pipes.retain(|p| !p.off_screen());

        for _ in 0..newly_scored {
            self.score += 1;
            self.emit(FeedbackEvent::Score);
            particle::spawn_score_burst(
                rng,
                &mut self.particles,
                self.bird.x + self.bird.width,
                self.bird.y,
            );
        }

        if collided {
            self.terminate(now, rng);
            return;
        }

        // Spawn cadence; difficulty reacts per spawn event, not per tick.
        if let Some(last) = self.last_spawn {
            if now.saturating_duration_since(last).as_millis() as u64 > self.difficulty.interval_ms {
                self.difficulty.reevaluate(self.score, &self.rules);
                self.pipes.push(Pipe::spawn(rng, &self.canvas, &self.rules));
                self.last_spawn = Some(now);
            }
        }

        // Particles: update, then compact expired entries.
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(|p| !p.expired());
    }

    fn schedule_assist(&mut self, now: Instant) {
        self.assist_due = self
            .rules
            .assist
            .map(|a| now + Duration::from_millis(a.period_ms));
    }

    /// Fire-and-forget: a sink failure is counted, never propagated.
    fn emit(&mut self, event: FeedbackEvent) {
        if self.sink.request(event).is_err() {
            self.swallowed_failures += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SilentSink;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct NullStore;
    impl ScoreStore for NullStore {
        fn save_high_score(&mut self, _score: u32) -> io::Result<()> {
            Ok(())
        }
    }

    fn session(mode: Mode) -> GameSession {
        GameSession::new(
            Canvas::standard(),
            mode,
            0,
            Box::new(SilentSink),
            Box::new(NullStore),
        )
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(Mode::Assisted);
        assert_eq!(s.phase, SessionPhase::Idle);
        assert_eq!(s.score, 0);
        assert!(s.pipes.is_empty());
        assert!((s.bird.velocity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_idle_session_does_not_advance() {
        let mut s = session(Mode::Assisted);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let y0 = s.bird.y;
        s.tick(Instant::now(), &mut rng);
        assert!((s.bird.y - y0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_state_machine_is_reentrant() {
        let mut s = session(Mode::Strict);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let t0 = Instant::now();

        s.start_session(t0).unwrap();
        assert_eq!(s.phase, SessionPhase::Running);

        s.terminate(t0, &mut rng);
        assert_eq!(s.phase, SessionPhase::Ended);

        s.start_session(t0 + Duration::from_secs(1)).unwrap();
        assert_eq!(s.phase, SessionPhase::Running);
        assert_eq!(s.score, 0);
        assert!(s.final_score.is_none());
    }

    #[test]
    fn test_invalid_ruleset_rejected_at_start() {
        let mut s = session(Mode::Assisted);
        s.rules.pipe_spacing = 10_000.0;
        let err = s.start_session(Instant::now()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(s.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_start_resets_state() {
        let mut s = session(Mode::Assisted);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let t0 = Instant::now();
        s.start_session(t0).unwrap();
        s.score = 9;
        s.pipes.push(Pipe::spawn(&mut rng, &s.canvas, &s.rules));
        s.terminate(t0, &mut rng);

        s.start_session(t0 + Duration::from_secs(2)).unwrap();
        assert_eq!(s.score, 0);
        assert!(s.pipes.is_empty());
        assert!(s.particles.is_empty());
        assert_eq!(s.difficulty, Difficulty::initial(&s.rules));
    }
}

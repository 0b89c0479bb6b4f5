//! Fire-and-forget feedback requests (sound effects and the ambient loop).
//!
//! The core calls the sink unconditionally; a sink failure must never block
//! or fail a tick. The orchestrator swallows errors and counts them.

use std::io;

/// Events the core asks the collaborator to play. No return value is
/// consumed beyond success/failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    /// A flap happened.
    Thrust,
    /// A pipe was scored.
    Score,
    /// The session terminated.
    Impact,
    AmbientStart,
    AmbientStop,
}

/// Capability interface for whatever plays the feedback.
pub trait FeedbackSink {
    fn request(&mut self, event: FeedbackEvent) -> io::Result<()>;
}

/// Sink that accepts everything and does nothing. Used when no audio device
/// is available, and in tests.
pub struct SilentSink;

impl FeedbackSink for SilentSink {
    fn request(&mut self, _event: FeedbackEvent) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_sink_accepts_all_events() {
        let mut sink = SilentSink;
        for event in [
            FeedbackEvent::Thrust,
            FeedbackEvent::Score,
            FeedbackEvent::Impact,
            FeedbackEvent::AmbientStart,
            FeedbackEvent::AmbientStop,
        ] {
            assert!(sink.request(event).is_ok());
        }
    }
}

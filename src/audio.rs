//! Synthesized audio feedback via rodio.
//!
//! Short sine tones for thrust/score/impact and a quiet ambient drone while
//! a session runs. Every failure maps to `io::Error` and is swallowed by the
//! orchestrator; audio can never fail a tick.

use crate::feedback::{FeedbackEvent, FeedbackSink};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use std::io;
use std::time::Duration;

pub struct AudioSink {
    // Dropping the stream kills playback; keep it alive with the sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    ambient: Option<Sink>,
}

impl AudioSink {
    /// Open the default output device. Callers fall back to the silent sink
    /// when this fails (headless terminals, no audio server).
    pub fn new() -> io::Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(Self {
            _stream: stream,
            handle,
            ambient: None,
        })
    }

    fn new_sink(&self) -> io::Result<Sink> {
        Sink::try_new(&self.handle).map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    /// Play one detached tone and return immediately.
    fn tone(&self, freq: f32, ms: u64, amp: f32) -> io::Result<()> {
        let sink = self.new_sink()?;
        sink.append(
            SineWave::new(freq)
                .take_duration(Duration::from_millis(ms))
                .amplify(amp),
        );
        sink.detach();
        Ok(())
    }

    /// Descending three-step sweep for the impact sound.
    fn sweep(&self) -> io::Result<()> {
        let sink = self.new_sink()?;
        for &(freq, ms) in &[(400.0, 120), (230.0, 120), (120.0, 180)] {
            sink.append(
                SineWave::new(freq)
                    .take_duration(Duration::from_millis(ms))
                    .amplify(0.12),
            );
        }
        sink.detach();
        Ok(())
    }
}

impl FeedbackSink for AudioSink {
    fn request(&mut self, event: FeedbackEvent) -> io::Result<()> {
        match event {
            FeedbackEvent::Thrust => self.tone(660.0, 70, 0.10),
            FeedbackEvent::Score => {
                self.tone(880.0, 90, 0.10)?;
                self.tone(1318.5, 90, 0.07)
            }
            FeedbackEvent::Impact => self.sweep(),
            FeedbackEvent::AmbientStart => {
                let sink = self.new_sink()?;
                sink.append(SineWave::new(110.0).amplify(0.02));
                self.ambient = Some(sink);
                Ok(())
            }
            FeedbackEvent::AmbientStop => {
                if let Some(sink) = self.ambient.take() {
                    sink.stop();
                }
                Ok(())
            }
        }
    }
}

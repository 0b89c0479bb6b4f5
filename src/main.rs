//! Terminal wiring: raw mode, input dispatch, the fixed-cadence tick loop,
//! and profile load/save at the process edges.

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use neonbird::audio::AudioSink;
use neonbird::constants::TICK_INTERVAL_MS;
use neonbird::feedback::{FeedbackSink, SilentSink};
use neonbird::profile::ProfileManager;
use neonbird::ui::scene;
use neonbird::{Canvas, GameSession, SessionPhase};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let manager = ProfileManager::new()?;
    let profile = manager.load();

    // No audio device is not an error; play silent.
    let sink: Box<dyn FeedbackSink> = match AudioSink::new() {
        Ok(audio) => Box::new(audio),
        Err(_) => Box::new(SilentSink),
    };

    let mut session = GameSession::new(
        Canvas::standard(),
        profile.mode,
        profile.high_score,
        sink,
        Box::new(manager.clone()),
    );

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut session);

    io::stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    // Mode preference persists across runs; a failed write is not fatal.
    let _ = manager.save_mode(session.mode());

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut GameSession,
) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut last_tick = Instant::now();

    loop {
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                            match session.phase {
                                SessionPhase::Running => session.flap(),
                                SessionPhase::Idle | SessionPhase::Ended => {
                                    session.start_session(Instant::now())?;
                                }
                            }
                        }
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            session.toggle_mode(Instant::now());
                        }
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            session.tick(Instant::now(), &mut rng);
            last_tick = Instant::now();
        }

        terminal.draw(|frame| scene::render(frame, frame.size(), session))?;
    }
}

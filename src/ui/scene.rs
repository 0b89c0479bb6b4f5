//! The game scene: playfield, status bar, and the idle/game-over overlays.
//!
//! Logical 360x640 canvas coordinates are scaled to whatever terminal area
//! is available; terminal cells are coarse, so everything snaps to cells.

use crate::particle::ParticleKind;
use crate::ruleset::Mode;
use crate::session::{GameSession, SessionPhase};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::collections::HashMap;

/// Render the whole scene for the current session state.
pub fn render(frame: &mut Frame, area: Rect, session: &GameSession) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" neonbird ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(inner);

    render_play_area(frame, chunks[0], session);
    render_status_bar(frame, chunks[1], session);

    match session.phase {
        SessionPhase::Idle => render_title_overlay(frame, chunks[0]),
        SessionPhase::Ended => {
            if let Some(final_score) = session.final_score {
                render_game_over_overlay(frame, chunks[0], session, final_score);
            }
        }
        SessionPhase::Running => {}
    }
}

fn render_play_area(frame: &mut Frame, area: Rect, session: &GameSession) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let canvas = &session.canvas;
    let x_scale = canvas.width / width as f64;
    let y_scale = canvas.height / height as f64;

    // Bucket particles by display cell first; sparse against the grid.
    let mut particle_cells: HashMap<(usize, usize), ParticleKind> = HashMap::new();
    for p in &session.particles {
        let col = (p.x / x_scale) as isize;
        let row = (p.y / y_scale) as isize;
        if col >= 0 && row >= 0 && (col as usize) < width && (row as usize) < height {
            particle_cells.insert((row as usize, col as usize), p.kind);
        }
    }

    let bird = &session.bird;
    let bird_char = if bird.velocity < -0.5 {
        "▲"
    } else if bird.velocity > 2.0 {
        "▼"
    } else {
        "►"
    };
    let bird_style = match session.mode() {
        // Shielded bird reads cyan, strict bird yellow.
        Mode::Assisted => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Mode::Strict => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    };

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let y = (row as f64 + 0.5) * y_scale;
        let mut spans = Vec::with_capacity(width);
        for col in 0..width {
            let x = (col as f64 + 0.5) * x_scale;

            if x >= bird.x && x < bird.x + bird.width && y >= bird.y && y < bird.y + bird.height {
                spans.push(Span::styled(bird_char, bird_style));
                continue;
            }

            if let Some(kind) = particle_cells.get(&(row, col)) {
                let color = match kind {
                    ParticleKind::Trail => Color::Cyan,
                    ParticleKind::Score => Color::Yellow,
                    ParticleKind::Explosion => Color::Red,
                };
                spans.push(Span::styled("•", Style::default().fg(color)));
                continue;
            }

            if y >= canvas.floor_y() {
                spans.push(Span::styled("▒", Style::default().fg(Color::DarkGray)));
                continue;
            }

            let mut in_pipe = false;
            for pipe in &session.pipes {
                if x >= pipe.x && x < pipe.x + pipe.width && (y < pipe.gap_top || y > pipe.gap_bottom)
                {
                    in_pipe = true;
                    break;
                }
            }
            if in_pipe {
                spans.push(Span::styled("█", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession) {
    let mode_color = match session.mode() {
        Mode::Assisted => Color::Cyan,
        Mode::Strict => Color::Yellow,
    };
    let line = Line::from(vec![
        Span::styled(" Score ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            session.score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Best ", Style::default().fg(Color::DarkGray)),
        Span::styled(session.high_score.to_string(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(session.mode().name(), Style::default().fg(mode_color)),
        Span::styled(
            "   [Space] flap  [M] mode  [Q] quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_title_overlay(frame: &mut Frame, area: Rect) {
    let panel = centered_panel(area, 36, 7);
    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let lines = vec![
        Line::from(Span::styled(
            "N E O N B I R D",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Space to fly",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            "[M] toggles assisted/strict",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        panel,
    );
}

fn render_game_over_overlay(frame: &mut Frame, area: Rect, session: &GameSession, final_score: u32) {
    let panel = centered_panel(area, 32, 8);
    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Score  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                final_score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                session.high_score.to_string(),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        "Press Space to restart",
        Style::default().fg(Color::White),
    )));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        panel,
    );
}

/// Center a fixed-size panel inside `area`, shrinking to fit.
fn centered_panel(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

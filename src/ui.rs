use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle, Points},
        *,
    },
};

use std::time::Duration;

use crate::{app::App, readout::Readout};

/// `rotation_angle` is half a turn per phase; the dial makes a full one.
const DIAL_ANGLE_SCALE: f64 = 2.0;
const DIAL_BOUND: f64 = 1.3;
const RING_RADIUS: f64 = 1.0;
const BIG_DOT_RADIUS: f64 = 0.14;
const SMALL_DOT_RADIUS: f64 = 0.08;

pub fn render(f: &mut Frame, app: &App) {
    let readout = app.ticker.timer().readout();

    if app.compact {
        render_compact(f, app, &readout);
    } else {
        render_main(f, app, &readout);
    }

    if app.show_help {
        render_help(f, app);
    }
}

fn render_main(f: &mut Frame, app: &App, readout: &Readout) {
    let accent = app.theme.accent(readout.accent);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

    let title = Paragraph::new(Span::styled(
        "~ Pomodoro timer ~",
        Style::default().fg(app.theme.muted_color).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border_color)),
    );
    f.render_widget(title, chunks[0]);

    render_dial(f, app, readout, chunks[1]);

    // Label and control are drawn over the centre of the dial
    let dial = chunks[1];
    let mid = dial.y + dial.height / 2;
    let label_area = Rect::new(dial.x, mid.saturating_sub(1), dial.width, 1);
    let control_area = Rect::new(dial.x, (mid + 1).min(dial.bottom().saturating_sub(1)), dial.width, 1);

    f.render_widget(
        Paragraph::new(readout.label())
            .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        label_area,
    );
    f.render_widget(
        Paragraph::new(control_text(readout))
            .style(Style::default().fg(accent))
            .alignment(Alignment::Center),
        control_area,
    );

    let timer = app.ticker.timer();
    let status = format!(
        "{}  •  {}  •  {} phases done  •  {}",
        readout.phase.name(),
        readout.status(),
        timer.completed_phases(),
        chrono::Local::now().format("%H:%M"),
    );
    f.render_widget(
        Paragraph::new(status)
            .style(Style::default().fg(app.theme.muted_color))
            .alignment(Alignment::Center),
        chunks[2],
    );

    let controls = Line::from(vec![
        span_key("Space", app), Span::raw(" Start/Stop • "),
        span_key("T", app), Span::raw(" Theme • "),
        span_key("M", app), Span::raw(" Compact • "),
        span_key("H", app), Span::raw(" Help • "),
        span_key("Q", app), Span::raw(" Quit"),
    ]);
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

fn render_dial(f: &mut Frame, app: &App, readout: &Readout, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    // Terminal cells are roughly twice as tall as wide
    let x_half = DIAL_BOUND * f64::from(area.width) / (f64::from(area.height) * 2.0);
    let (dot_x, dot_y) = dot_position(readout.rotation_angle);
    let accent = app.theme.accent(readout.accent);
    let background = app.theme.background;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([-x_half, x_half])
        .y_bounds([-DIAL_BOUND, DIAL_BOUND])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: RING_RADIUS,
                color: accent,
            });
            ctx.layer();
            let big = disc(dot_x, dot_y, BIG_DOT_RADIUS);
            ctx.draw(&Points { coords: &big, color: accent });
            ctx.layer();
            let small = disc(dot_x, dot_y, SMALL_DOT_RADIUS);
            ctx.draw(&Points { coords: &small, color: background });
        });
    f.render_widget(canvas, area);
}

fn dial_angle(rotation_angle: f64) -> f64 {
    rotation_angle * DIAL_ANGLE_SCALE
}

/// Starts at twelve o'clock and moves clockwise.
fn dot_position(rotation_angle: f64) -> (f64, f64) {
    let theta = dial_angle(rotation_angle);
    (RING_RADIUS * theta.sin(), RING_RADIUS * theta.cos())
}

fn format_span(d: Duration) -> String {
    let secs = d.as_secs();
    match (secs / 60, secs % 60) {
        (0, s) => format!("{}s", s),
        (m, 0) => format!("{}m", m),
        (m, s) => format!("{}m{}s", m, s),
    }
}

fn disc(cx: f64, cy: f64, r: f64) -> Vec<(f64, f64)> {
    const STEPS: i32 = 12;
    let step = r / f64::from(STEPS);
    let mut points = Vec::new();
    for i in -STEPS..=STEPS {
        for j in -STEPS..=STEPS {
            let (dx, dy) = (f64::from(i) * step, f64::from(j) * step);
            if dx * dx + dy * dy <= r * r {
                points.push((cx + dx, cy + dy));
            }
        }
    }
    points
}

fn control_text(readout: &Readout) -> &'static str {
    if readout.running { "⏸  STOP" } else { "▶  START" }
}

fn render_compact(f: &mut Frame, app: &App, readout: &Readout) {
    let area = centered_rect(50, 40, f.size());
    let accent = app.theme.accent(readout.accent);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(readout.phase.name(), Style::default()
            .fg(accent).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(readout.label(), Style::default()
            .fg(accent).add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(control_text(readout), Style::default().fg(accent))),
        Line::from(""),
        Line::from(Span::styled("Press M to restore", Style::default()
            .fg(Color::DarkGray).add_modifier(Modifier::ITALIC))),
    ];

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default()
            .title(" Pomodoro (compact) ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app.theme.border_color)));

    f.render_widget(widget, area);
}

fn render_help(f: &mut Frame, app: &App) {
    let area = centered_rect(80, 60, f.size());
    let timer = app.ticker.timer();
    let durations = timer.durations();

    let help_text = vec![
        Line::from(""),
        help_line("Space / Enter", "Start or stop the timer"),
        help_line("T", "Cycle colour theme"),
        help_line("M", "Toggle compact view"),
        help_line("H / ?", "Toggle this help"),
        help_line("Q / Esc", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "  Work {}  •  Relax {}  •  {} theme",
                format_span(durations.work),
                format_span(durations.relax),
                app.config().theme.as_str()
            ),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            format!("  Phase boundary: {}", timer.policy().as_str()),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(help_text)
            .block(Block::default()
                .title(" Help ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(app.theme.border_color))),
        area,
    );
}

fn span_key<'a>(text: &'a str, app: &App) -> Span<'a> {
    Span::styled(text, Style::default().fg(app.theme.muted_color).add_modifier(Modifier::BOLD))
}

fn help_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("    "),
        Span::styled(key, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("  {}", desc)),
    ])
}

fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Preset};
    use crate::timer::TICK_RATE;
    use ratatui::{backend::TestBackend, buffer::Buffer};
    use std::{f64::consts::PI, time::Instant};

    fn buffer_text(buffer: &Buffer) -> String {
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn demo_app() -> App {
        App::new(Config { preset: Preset::Demo, ..Config::default() }, None)
    }

    #[test]
    fn test_initial_screen() {
        let text = draw(&demo_app());
        assert!(text.contains("~ Pomodoro timer ~"));
        assert!(text.contains("05:00"));
        assert!(text.contains("START"));
        assert!(text.contains("WORK"));
    }

    #[test]
    fn test_running_screen_counts_down() {
        let mut app = demo_app();
        let t0 = Instant::now();
        app.ticker.start(t0);
        app.ticker.pump(t0 + TICK_RATE);

        let text = draw(&app);
        assert!(text.contains("04:95"));
        assert!(text.contains("STOP"));
        assert!(text.contains("RUNNING"));
    }

    #[test]
    fn test_classic_label() {
        let text = draw(&App::new(Config::default(), None));
        assert!(text.contains("25:00"));
    }

    #[test]
    fn test_compact_and_help() {
        let mut app = demo_app();
        app.compact = true;
        let text = draw(&app);
        assert!(text.contains("Press M to restore"));
        assert!(!text.contains("~ Pomodoro timer ~"));

        app.show_help = true;
        let text = draw(&app);
        assert!(text.contains("Start or stop the timer"));
        assert!(text.contains("Work 5s"));
        assert!(text.contains("default theme"));
    }

    #[test]
    fn test_dot_starts_at_top_and_turns_clockwise() {
        let (x, y) = dot_position(0.0);
        assert!(x.abs() < 1e-12);
        assert!((y - RING_RADIUS).abs() < 1e-12);

        let (x, y) = dot_position(PI / 4.0);
        assert!(x > 0.99);
        assert!(y.abs() < 1e-12);
    }

    #[test]
    fn test_dial_sweeps_full_turn_per_phase() {
        let mut app = demo_app();
        let mut now = Instant::now();
        app.ticker.start(now);
        for _ in 0..99 {
            now += TICK_RATE;
            app.ticker.pump(now);
        }

        let readout = app.ticker.timer().readout();
        assert!(dial_angle(readout.rotation_angle).to_degrees() > 350.0);
        let (x, y) = dot_position(readout.rotation_angle);
        assert!(x < 0.0);
        assert!(y > 0.99);
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(Duration::from_secs(5)), "5s");
        assert_eq!(format_span(Duration::from_secs(25 * 60)), "25m");
        assert_eq!(format_span(Duration::from_secs(90)), "1m30s");
    }

    #[test]
    fn test_classic_help_uses_minutes() {
        let mut app = App::new(Config::default(), None);
        app.show_help = true;
        let text = draw(&app);
        assert!(text.contains("Work 25m"));
        assert!(text.contains("Relax 5m"));
        assert!(text.contains("Phase boundary: reset"));
    }

    #[test]
    fn test_disc_stays_within_radius() {
        let points = disc(0.5, -0.5, 0.1);
        assert!(!points.is_empty());
        assert!(points
            .iter()
            .all(|(x, y)| (x - 0.5).powi(2) + (y + 0.5).powi(2) <= 0.01 + 1e-12));
    }
}

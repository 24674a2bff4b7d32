use crate::app::AppState;
use crate::domain::{ModeId, ModeRegistry, TimerStatus};
use crate::timer::format_clock;
use crate::ui::styles::{
    active_tab_style, border_style, clock_style, gauge_style, idle_style, linked_style,
    paused_style, running_style, tab_style, title_style,
};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Mode tabs, e.g. " 1 Focus   2 Short break   3 Long break "
fn mode_tabs(registry: &ModeRegistry, active: ModeId) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, mode) in registry.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let text = format!(" {} {} ", idx + 1, mode.label);
        let style = if mode.id == active {
            active_tab_style(mode.id)
        } else {
            tab_style()
        };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

/// Start/pause hint with the run status badge
fn run_line(status: TimerStatus) -> Line<'static> {
    let (badge, style) = match status {
        TimerStatus::Running => ("RUNNING", running_style()),
        TimerStatus::Paused => ("PAUSED", paused_style()),
        TimerStatus::Idle => ("IDLE", idle_style()),
    };
    Line::from(vec![
        Span::styled(format!("({})", badge), style),
        Span::raw(format!("   space: {}", status.action_label().to_lowercase())),
    ])
}

/// Render the timer pane
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let timer = app.session.timer();
    let state = timer.state();
    let mode = timer.mode();

    let linked = match app.session.tasks().selected_task() {
        Some(task) => Line::from(vec![
            Span::raw("Working on: "),
            Span::styled(task.description.clone(), linked_style()),
        ]),
        None => Line::styled("No task linked (Enter on a task to link it)", idle_style()),
    };

    let lines = vec![
        mode_tabs(timer.registry(), state.mode),
        Line::raw(""),
        Line::styled(format_clock(state.remaining_secs), clock_style(state.mode)),
        Line::raw(mode.headline),
        Line::raw(""),
        run_line(state.status),
        linked,
    ];

    let date = Local::now().format("%a %b %d");
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" Fokus ⏱ ({}) ", date), title_style()));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(state.mode))
        .ratio(timer.progress().clamp(0.0, 1.0))
        .label(format!("{:.0}%", timer.progress() * 100.0));
    f.render_widget(gauge, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_tabs_lists_all_modes() {
        let registry = ModeRegistry::default();
        let line = mode_tabs(&registry, ModeId::ShortBreak);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " 1 Focus    2 Short break    3 Long break ");
    }

    #[test]
    fn test_run_line() {
        let line = run_line(TimerStatus::Paused);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "(PAUSED)   space: resume");
    }
}

use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the clear-all confirmation
pub fn render_confirm_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::ConfirmClearAll {
        return;
    }

    let modal_area = create_modal_area(area, 8);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!(
            "  Remove all {} tasks? This cannot be undone.",
            app.tasks().len()
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear all  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Clear Task List ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

/// Render the status line with the latest announcement or error
pub fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status {
        Some(status) if status.is_error => {
            Line::styled(format!(" ✗ {}", status.text), error_style())
        }
        Some(status) => Line::styled(format!(" {}", status.text), hint_style()),
        None => Line::raw(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

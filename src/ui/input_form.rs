use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing a task
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, 8);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if form.editing.is_some() {
            " Edit Task "
        } else {
            " Add Task "
        };

        let lines = vec![
            Line::raw(""),
            Line::raw("Description:"),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.description.as_str(), modal_title_style()),
                Span::styled("█", modal_title_style()),
            ]),
            Line::raw(""),
            Line::raw("Enter to save  ·  Esc to cancel"),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

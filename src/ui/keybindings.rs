use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" space start/pause   "),
        Span::raw("1/2/3 mode   "),
        Span::raw("↑/↓ move   "),
        Span::raw("Enter link   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("d done   "),
        Span::raw("x remove   "),
        Span::raw("c clear done   "),
        Span::raw("C clear all   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_clear_modal, render_status_line};
use ratatui::Frame;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area);
    render_task_pane(f, app, layout.tasks_area);
    render_status_line(f, app, layout.status_area);

    if app.ui_mode == UiMode::ConfirmClearAll {
        render_confirm_clear_modal(f, app, size);
        return;
    }

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::create_test_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_render_shows_clock_and_tasks() {
        let mut app = create_test_app();
        app.start_add_task();
        for c in "Plan sprint".chars() {
            app.input_form_add_char(c);
        }
        app.submit_input_form();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("25:00"));
        assert!(text.contains("Plan sprint"));
        assert!(text.contains("Short break"));
    }

    #[test]
    fn test_render_input_form() {
        let mut app = create_test_app();
        app.start_add_task();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(screen(&terminal).contains("Add Task"));
    }
}

use crate::app::AppState;
use crate::domain::{ModeId, UiMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmClearAll => handle_confirm_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        // Timer
        KeyCode::Char(' ') => app.toggle_timer(),
        KeyCode::Char('1') => app.select_mode(ModeId::Focus),
        KeyCode::Char('2') => app.select_mode(ModeId::ShortBreak),
        KeyCode::Char('3') => app.select_mode(ModeId::LongBreak),

        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor_down(),

        // Link task to the timer
        KeyCode::Enter => app.select_task(),

        // Task editing
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_task(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.toggle_task_done(),
        KeyCode::Char('x') | KeyCode::Delete => app.remove_task(),
        KeyCode::Char('c') => app.clear_completed(),
        KeyCode::Char('C') => app.request_clear_all(),

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        _ => {}
    }
    false
}

/// Handle keys in input form mode (adding or editing a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    false
}

/// Handle keys while the clear-all confirmation is shown
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_all(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_all(),
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::create_test_app;
    use crate::domain::TimerStatus;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_space_toggles_timer() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.timer_status(), TimerStatus::Running);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.timer_status(), TimerStatus::Paused);
    }

    #[test]
    fn test_digits_select_modes() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.session.timer().state().mode, ModeId::ShortBreak);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.timer().state().mode, ModeId::LongBreak);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.session.timer().state().mode, ModeId::Focus);
    }

    #[test]
    fn test_add_and_link_task() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "quit q typing");
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.tasks()[0].description, "quit q typing");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.tasks().selected(), Some(app.tasks()[0].id));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.tasks().selected(), None);
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "never mind");
        press(&mut app, KeyCode::Esc);
        assert!(app.tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_clear_all_confirmation_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "x");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.tasks().len(), 1);

        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.tasks().is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(!press(&mut app, KeyCode::Char('j')));
    }
}

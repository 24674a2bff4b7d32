use crate::domain::ModeId;
use ratatui::style::{Color, Modifier, Style};

/// Accent colour for each mode
pub fn mode_accent(mode: ModeId) -> Color {
    match mode {
        ModeId::Focus => Color::Magenta,
        ModeId::ShortBreak => Color::Cyan,
        ModeId::LongBreak => Color::Blue,
    }
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Cursor row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Active mode tab
pub fn active_tab_style(mode: ModeId) -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(mode_accent(mode))
        .add_modifier(Modifier::BOLD)
}

/// Inactive mode tab
pub fn tab_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Countdown digits
pub fn clock_style(mode: ModeId) -> Style {
    Style::default()
        .fg(mode_accent(mode))
        .add_modifier(Modifier::BOLD)
}

/// Running status badge style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused status badge style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Idle status badge style
pub fn idle_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Progress gauge style
pub fn gauge_style(mode: ModeId) -> Style {
    Style::default().fg(mode_accent(mode)).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Task linked to the timer
pub fn linked_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

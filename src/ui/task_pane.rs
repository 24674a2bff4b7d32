use crate::app::AppState;
use crate::domain::Task;
use crate::ui::styles::{
    border_style, default_style, done_style, linked_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Create a single line for a task
/// Format: [ ] Write proposal  ◀ linked
fn create_task_line(task: &Task, linked: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{} ", task.checkbox())),
        if task.completed {
            Span::styled(task.description.clone(), done_style())
        } else {
            Span::raw(task.description.clone())
        },
    ];

    if linked {
        spans.push(Span::styled("  ◀ linked", linked_style()));
    }

    Line::from(spans)
}

/// Render the task list pane
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let store = app.session.tasks();
    let selected = store.selected();

    let items: Vec<ListItem> = store
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, selected == Some(task.id));
            let style = if idx == app.cursor {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        " Tasks ({} open, {} done) ",
        store.pending_count(),
        store.completed_count()
    );

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

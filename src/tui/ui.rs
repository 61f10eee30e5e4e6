//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::format_due;
use crate::features::nlp::Priority;
use crate::tui::app::{App, Focus};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(3), // Preview
            Constraint::Min(0),    // List
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_input(frame, app, chunks[0]);
    render_preview(frame, app, chunks[1]);
    render_list(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);
}

const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::P1 => Color::Red,
        Priority::P2 => Color::Yellow,
        Priority::P3 => Color::Blue,
        Priority::P4 => Color::DarkGray,
    }
}

fn focus_border(app: &App<'_>, pane: Focus) -> Style {
    if app.focus == pane {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_input(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(" New task ")
            .borders(Borders::ALL)
            .border_style(focus_border(app, Focus::Input)),
    );
    frame.render_widget(input, area);

    if app.focus == Focus::Input {
        let width = u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(width).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_preview(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let preview = &app.preview;
    let line = if app.input.trim().is_empty() {
        Line::from(Span::styled(
            "e.g. Finish report by Alice tomorrow 3pm P1",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let assignee = if preview.has_assignee() {
            preview.assignee.as_str()
        } else {
            "Unassigned"
        };
        Line::from(vec![
            Span::styled(preview.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  @"),
            Span::styled(assignee.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(preview.due_display(), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(
                preview.priority.as_str(),
                Style::default().fg(priority_color(preview.priority)),
            ),
        ])
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .title(" Preview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(widget, area);
}

fn render_list(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let now = app.now();
    let items: Vec<ListItem<'_>> = app
        .tasks
        .iter()
        .map(|task| {
            let (icon, icon_color) = if task.completed {
                ("[x]", Color::Green)
            } else {
                ("[ ]", Color::White)
            };
            let title_style = if task.completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default()
            };

            let mut spans = vec![
                Span::styled(format!("{icon} "), Style::default().fg(icon_color)),
                Span::styled(
                    format!("{} ", task.priority),
                    Style::default().fg(priority_color(task.priority)),
                ),
                Span::styled(task.title.clone(), title_style),
            ];

            if !task.assignee.is_empty() {
                spans.push(Span::styled(
                    format!("  @{}", task.assignee),
                    Style::default().fg(Color::Cyan),
                ));
            }

            if let Some(due) = &task.due_date {
                let color = if task.is_overdue(now) {
                    Color::Red
                } else {
                    Color::Yellow
                };
                spans.push(Span::styled(
                    format!("  {}", format_due(due)),
                    Style::default().fg(color),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let stats = &app.stats;
    let title = format!(
        " {} ({}) | {} pending, {} done, {} overdue ",
        app.filter,
        app.tasks.len(),
        stats.pending,
        stats.completed,
        stats.overdue
    );

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(focus_border(app, Focus::List)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = ListState::default();
    if app.focus == Focus::List && !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let default = match app.focus {
        Focus::Input => "Enter:add | Esc:clear | Tab:list | Ctrl-C:quit",
        Focus::List => "j/k:nav | space:toggle | d:delete | f:filter | Tab:input | ?:help | q:quit",
    };
    let status_text = app.status.as_deref().unwrap_or(default);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::config::ViewMode;
use crate::task::Task;
use crate::ui::common::{
    centered_rect, help_header, help_line, hint_line, list_window, pad_text, truncate_text,
    COLOR_ACCENT, COLOR_BORDER_DETAIL, COLOR_BORDER_LIST, COLOR_ERROR, COLOR_INFO, COLOR_MUTED,
    COLOR_MUTED_DARK, COLOR_SUCCESS, COLOR_TEXT, COLOR_WARNING,
};

use super::app::{BrowserState, DeleteConfirmState, StatusKind};
use super::model::{plural_tasks, Row};

const CHECK_WIDTH: usize = 3;
const STATUS_WIDTH: usize = 9;
const AGE_WIDTH: usize = 4;

pub fn render(frame: &mut Frame, app: &BrowserState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);

    render_tabs(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    if app.show_detail {
        if let Some(task) = app.selected_task() {
            render_detail_modal(frame, area, task);
        }
    }
    if let Some(buffer) = app.input.as_deref() {
        render_input_modal(frame, area, buffer);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
}

fn render_tabs(frame: &mut Frame, app: &BrowserState, area: Rect) {
    let counts = app.counts();
    let tabs = [
        (ViewMode::Active, counts.total - counts.archived, COLOR_INFO),
        (ViewMode::Archived, counts.archived, COLOR_MUTED),
        (ViewMode::All, counts.total, COLOR_ACCENT),
    ];

    let mut spans = vec![Span::styled(
        format!("togo [{}]  ", app.source_label),
        Style::default().fg(COLOR_MUTED_DARK),
    )];
    for (idx, (mode, count, color)) in tabs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let style = if mode == app.mode {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(format!("{} ({count})", mode.label()), style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_list(frame: &mut Frame, app: &BrowserState, area: Rect) {
    let mut lines = Vec::new();
    let content_width = area.width.saturating_sub(2) as usize;
    let help_lines = if app.show_help {
        build_help_lines(content_width)
    } else {
        Vec::new()
    };
    let help_reserved = if help_lines.is_empty() {
        0
    } else {
        help_lines.len() + 1
    };

    if app.rows.is_empty() {
        let message = match app.mode {
            ViewMode::Archived => "No archived tasks",
            _ => "No tasks. Press a to add one.",
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(COLOR_MUTED),
        )));
    } else {
        let list_height = area
            .height
            .saturating_sub(2)
            .saturating_sub(help_reserved as u16) as usize;
        let (start, end) = list_window(app.rows.len(), Some(app.selected), list_height);
        for pos in start..end {
            let row = &app.rows[pos];
            let marked = app.marked.contains(&row.id);
            lines.push(render_list_row(
                row,
                pos == app.selected,
                marked,
                content_width,
            ));
        }
    }

    if !help_lines.is_empty() {
        lines.push(Line::from(""));
        lines.extend(help_lines);
    }

    let title = format!("Tasks ({})", app.rows.len());
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, area);
}

fn render_list_row(row: &Row, selected: bool, marked: bool, width: usize) -> Line<'static> {
    let used = CHECK_WIDTH + STATUS_WIDTH + AGE_WIDTH + 4;
    let title_width = width.saturating_sub(used);

    let check = if marked { "[x]" } else { "[ ]" };
    let title_style = if row.archived {
        Style::default()
            .fg(COLOR_MUTED_DARK)
            .add_modifier(Modifier::ITALIC)
    } else if row.completed {
        Style::default()
            .fg(COLOR_MUTED)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    let status_style = if row.archived {
        Style::default().fg(COLOR_MUTED_DARK)
    } else if row.completed {
        Style::default().fg(COLOR_SUCCESS)
    } else {
        Style::default().fg(COLOR_WARNING)
    };

    let mut spans = vec![
        Span::styled(check, Style::default().fg(COLOR_ACCENT)),
        Span::raw(" "),
        Span::styled(pad_text(&row.title, title_width), title_style),
        Span::raw(" "),
        Span::styled(pad_text(row.status, STATUS_WIDTH), status_style),
        Span::raw(" "),
        Span::styled(
            format!("{:>width$}", row.age, width = AGE_WIDTH),
            Style::default().fg(COLOR_MUTED_DARK),
        ),
    ];

    if selected {
        for span in &mut spans {
            span.style = span.style.add_modifier(Modifier::REVERSED);
        }
    }

    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &BrowserState, area: Rect) {
    let hint_span = Span::styled(footer_hint(app), Style::default().fg(COLOR_INFO));
    let line = if let Some((status, kind)) = app.status_line() {
        let status_style = match kind {
            StatusKind::Error => Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
            StatusKind::Info => Style::default().fg(COLOR_WARNING),
        };
        Line::from(vec![
            hint_span,
            Span::raw("  |  "),
            Span::styled(status, status_style),
        ])
    } else {
        Line::from(hint_span)
    };

    let counts = app.counts();
    let mut summary = format!(
        "{} pending  {} completed  {} archived",
        counts.pending, counts.completed, counts.archived
    );
    if !app.marked.is_empty() {
        summary.push_str(&format!("  |  {} marked", plural_tasks(app.marked.len())));
    }
    let counts_line = Line::from(Span::styled(summary, Style::default().fg(COLOR_ACCENT)));

    let widget = Paragraph::new(vec![line, counts_line])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(COLOR_BORDER_LIST)),
        );
    frame.render_widget(widget, area);
}

fn footer_hint(app: &BrowserState) -> String {
    if app.input.is_some() {
        "enter add  esc cancel".to_string()
    } else if app.delete_confirm.is_some() {
        "y delete  n cancel".to_string()
    } else if app.show_detail {
        "esc/enter close".to_string()
    } else {
        "t toggle  n archive  d delete  a add  . help  q quit".to_string()
    }
}

fn render_detail_modal(frame: &mut Frame, area: Rect, task: &Task) {
    let content_width = area.width.saturating_sub(8).min(72);
    let modal = centered_rect(content_width, 10, area);
    frame.render_widget(Clear, modal);

    let value_width = (content_width as usize).saturating_sub(14);
    let archived = if task.archived { "yes" } else { "no" };
    let lines = vec![
        detail_line("ID", task.id.to_string(), value_width),
        detail_line("Title", task.title.clone(), value_width),
        detail_line("Status", task.status_label().to_string(), value_width),
        detail_line("Archived", archived.to_string(), value_width),
        detail_line(
            "Created",
            task.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            value_width,
        ),
        Line::from(""),
        hint_line("esc/enter close"),
    ];

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Task")
                .border_style(Style::default().fg(COLOR_BORDER_DETAIL)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn detail_line(label: &str, value: String, width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            pad_text(&format!("{label}:"), 10),
            Style::default().fg(COLOR_MUTED_DARK),
        ),
        Span::styled(truncate_text(&value, width), Style::default().fg(COLOR_TEXT)),
    ])
}

fn render_input_modal(frame: &mut Frame, area: Rect, buffer: &str) {
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 5, area);
    frame.render_widget(Clear, modal);

    // Keep the tail of long input visible.
    let visible = (content_width as usize).saturating_sub(4);
    let chars: Vec<char> = buffer.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(visible)..].iter().collect();
    let lines = vec![
        Line::from(vec![
            Span::styled(tail, Style::default().fg(COLOR_TEXT)),
            Span::styled("_", Style::default().fg(COLOR_ACCENT)),
        ]),
        Line::from(""),
        hint_line("enter add  esc cancel"),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 6, area);
    frame.render_widget(Clear, modal);

    let title_width = (content_width as usize).saturating_sub(30);
    let question = match state.title.as_deref() {
        Some(title) => format!(
            "Are you sure you want to delete \"{}\"?",
            truncate_text(title, title_width)
        ),
        None => format!(
            "Are you sure you want to delete {} selected tasks?",
            state.ids.len()
        ),
    };
    let lines = vec![
        Line::from(Span::styled(
            question,
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        hint_line("y confirm  n/esc cancel"),
    ];

    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Delete"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

fn build_help_lines(width: usize) -> Vec<Line<'static>> {
    vec![
        help_header("Keys"),
        help_line("j/k", "move selection", width),
        help_line("g/G", "first/last task", width),
        help_line("tab", "cycle active/archived/all", width),
        help_line("space", "mark for bulk actions", width),
        help_line("t", "toggle completed", width),
        help_line("n", "archive/unarchive", width),
        help_line("d", "delete", width),
        help_line("a", "add task", width),
        help_line("enter", "task details", width),
        help_line(".", "hide help", width),
        help_line("q/esc", "quit", width),
    ]
}

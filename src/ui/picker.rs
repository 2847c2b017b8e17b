//! Small full-screen prompts used by the command line: a task picker for
//! disambiguation and a yes/no confirmation.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::error::Result;
use crate::resolve::Disambiguate;
use crate::task::Task;

use super::common::{
    centered_rect, hint_line, list_window, truncate_text, COLOR_BORDER_LIST, COLOR_ERROR,
    COLOR_MUTED_DARK, COLOR_TEXT,
};
use super::terminal::{self, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    None,
    Cancel,
    Confirm,
}

/// Single-choice list over candidate tasks
#[derive(Debug, Clone)]
pub struct TaskPicker {
    prompt: String,
    options: Vec<Task>,
    selected: usize,
}

impl TaskPicker {
    pub fn new(prompt: impl Into<String>, options: Vec<Task>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            selected: 0,
        }
    }

    pub fn options(&self) -> &[Task] {
        &self.options
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.options.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PickerAction::Cancel;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return PickerAction::Cancel,
            KeyCode::Enter if !self.options.is_empty() => return PickerAction::Confirm,
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.options.len().saturating_sub(1)
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() && ch != '0' => {
                if let Some(idx) = ch.to_digit(10).map(|value| value as usize - 1) {
                    if idx < self.options.len() {
                        self.selected = idx;
                    }
                }
            }
            _ => {}
        }
        PickerAction::None
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.options.len() as isize;
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = (self.selected as isize + delta).rem_euclid(len);
        self.selected = next as usize;
    }
}

/// Yes/no question; anything other than `y` is a no.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    question: String,
}

impl ConfirmPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    /// `Some(answer)` once the key decides, `None` to keep waiting.
    pub fn handle_key(&self, key: KeyEvent) -> Option<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(false);
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('q') | KeyCode::Esc => {
                Some(false)
            }
            _ => None,
        }
    }
}

/// Let the user pick one of `candidates`. `Ok(None)` when they cancel.
pub fn pick_task(prompt: &str, candidates: &[Task]) -> Result<Option<Task>> {
    let mut picker = TaskPicker::new(prompt, candidates.to_vec());
    terminal::with_terminal(|term| {
        loop {
            term.draw(|frame| render_picker(frame, frame.size(), &picker))?;
            let Some(key) = next_key()? else {
                continue;
            };
            match picker.handle_key(key) {
                PickerAction::None => {}
                PickerAction::Cancel => return Ok(None),
                PickerAction::Confirm => return Ok(picker.selected_task().cloned()),
            }
        }
    })
}

/// Ask a yes/no question on the terminal.
pub fn confirm(question: &str) -> Result<bool> {
    let prompt = ConfirmPrompt::new(question);
    terminal::with_terminal(|term: &mut Term| loop {
        term.draw(|frame| render_confirm(frame, frame.size(), &prompt))?;
        if let Some(answer) = next_key()?.and_then(|key| prompt.handle_key(key)) {
            return Ok(answer);
        }
    })
}

/// Disambiguation through the terminal picker
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalChooser;

impl Disambiguate for TerminalChooser {
    fn choose(&mut self, input: &str, candidates: &[Task]) -> Result<Option<Task>> {
        tracing::debug!(input, candidates = candidates.len(), "asking user to pick a task");
        pick_task(&format!("Several tasks match \"{input}\""), candidates)
    }
}

fn next_key() -> Result<Option<KeyEvent>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key)),
        _ => Ok(None),
    }
}

pub(crate) fn render_picker(frame: &mut Frame, area: Rect, picker: &TaskPicker) {
    let content_width = area.width.saturating_sub(8).min(72);
    let list_height = (area.height.saturating_sub(10) as usize).max(1);
    let rows = picker.options().len().min(list_height);
    let height = (rows as u16 + 5).min(area.height.saturating_sub(2));
    let modal = centered_rect(content_width, height, area);
    frame.render_widget(Clear, modal);

    let title_width = (content_width as usize).saturating_sub(10);
    let mut lines: Vec<Line<'static>> = Vec::new();
    let (start, end) = list_window(
        picker.options().len(),
        Some(picker.selected_index()),
        list_height,
    );
    for (idx, task) in picker.options()[start..end].iter().enumerate() {
        let idx = idx + start;
        let mut spans = vec![
            Span::styled(format!("{:>4} ", task.id), Style::default().fg(COLOR_MUTED_DARK)),
            Span::styled(
                truncate_text(&task.title, title_width),
                Style::default().fg(COLOR_TEXT),
            ),
        ];
        if idx == picker.selected_index() {
            for span in &mut spans {
                span.style = span.style.add_modifier(Modifier::REVERSED);
            }
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(hint_line("enter select  j/k move  esc/q cancel"));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(picker.prompt.clone())
            .border_style(Style::default().fg(COLOR_BORDER_LIST)),
    );
    frame.render_widget(widget, modal);
}

pub(crate) fn render_confirm(frame: &mut Frame, area: Rect, prompt: &ConfirmPrompt) {
    let content_width = area.width.saturating_sub(8).min(64);
    let modal = centered_rect(content_width, 6, area);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(Span::styled(
            prompt.question.clone(),
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        hint_line("y confirm  n/esc cancel"),
    ];
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Confirm"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, modal);
}

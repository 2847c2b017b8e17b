//! Layout and text helpers shared by the browser and the prompts.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub(crate) const HELP_KEY_WIDTH: usize = 12;
pub(crate) const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
pub(crate) const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
pub(crate) const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
pub(crate) const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
pub(crate) const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
pub(crate) const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
pub(crate) const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
pub(crate) const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
pub(crate) const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
pub(crate) const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Visible `[start, end)` slice of a list that keeps `selected` in view.
pub(crate) fn list_window(total: usize, selected: Option<usize>, height: usize) -> (usize, usize) {
    if total == 0 || height == 0 {
        return (0, 0);
    }
    if total <= height {
        return (0, total);
    }
    let selected = selected.unwrap_or(0);
    let mut start = selected.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

pub(crate) fn pad_text(value: &str, width: usize) -> String {
    let text = truncate_text(value, width);
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

pub(crate) fn truncate_text(value: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max {
        return value.to_string();
    }
    if max <= 3 {
        return chars[..max].iter().collect();
    }
    let mut out: String = chars[..(max - 3)].iter().collect();
    out.push_str("...");
    out
}

pub(crate) fn help_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(COLOR_INFO).add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn help_line(keys: &str, desc: &str, width: usize) -> Line<'static> {
    let key_text = pad_text(keys, HELP_KEY_WIDTH.min(width));
    let desc_width = width.saturating_sub(HELP_KEY_WIDTH + 1);
    Line::from(vec![
        Span::styled(
            key_text,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(truncate_text(desc, desc_width), Style::default().fg(COLOR_MUTED)),
    ])
}

pub(crate) fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(COLOR_MUTED_DARK),
    ))
}

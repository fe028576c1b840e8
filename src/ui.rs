use ratatui::{prelude::*, widgets::*};

use crate::session::OptionMark;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Renders one answer option with its selection/grading mark
pub fn render_option(number: usize, text: &str, mark: OptionMark) -> Line<'static> {
    let (style, suffix) = match mark {
        OptionMark::Plain => (Style::default(), ""),
        OptionMark::Selected => (Style::default().fg(Color::Cyan).bold(), "  <"),
        OptionMark::Correct => (Style::default().fg(Color::Green).bold(), "  Correct"),
        OptionMark::Incorrect => (Style::default().fg(Color::Red).bold(), "  Incorrect"),
    };
    Line::from(vec![
        Span::styled(format!(" {} ", number), Style::default().fg(Color::DarkGray)),
        Span::styled(text.to_string(), style),
        Span::styled(suffix, style),
    ])
}

/// Difficulty color
pub fn difficulty_color(difficulty: &str) -> Color {
    match difficulty.to_ascii_lowercase().as_str() {
        "easy" => Color::Green,
        "medium" => Color::Yellow,
        "hard" => Color::Red,
        _ => Color::Gray,
    }
}

/// Display column of the byte offset `byte_pos` within `input`
pub fn cursor_column(input: &str, byte_pos: usize) -> u16 {
    let end = byte_pos.min(input.len());
    input
        .char_indices()
        .take_while(|(i, _)| *i < end)
        .count()
        .min(u16::MAX as usize) as u16
}

/// Score color by share of correct answers
pub fn score_color(correct: usize, total: usize) -> Color {
    if total == 0 {
        return Color::Gray;
    }
    match correct * 100 / total {
        80..=100 => Color::Green,
        50..=79 => Color::Yellow,
        _ => Color::Red,
    }
}

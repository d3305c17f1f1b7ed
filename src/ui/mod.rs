//! Rendering. One frame per loop iteration: sidebar with the credential
//! form, the current section in the main pane, a status line at the
//! bottom.

pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::actions::{StatusKind, StatusLine};
use crate::app::input::InputField;
use crate::app::{App, Focus, Section};
use crate::constants::{SIDEBAR_WIDTH, STATUS_HEIGHT};
use crate::github;

pub fn render(frame: &mut Frame, app: &App) {
    let outer = Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)]).split(frame.area());
    let cols = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)]).split(outer[0]);
    render_sidebar(frame, app, cols[0]);
    render_main(frame, app, cols[1]);
    render_status(frame, app.status.as_ref(), outer[1]);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme::BORDER)).title(" Configuration ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in app.config_fields.iter().enumerate() {
        let focused = app.focus == Focus::Config(i);
        lines.push(label_line(field, focused));
        lines.push(value_line(field, focused, inner.width as usize));
    }

    lines.push(Line::from(""));
    lines.push(connection_line(app));
    lines.push(Line::from(""));

    for hint in ["Tab next field · Enter connect", "^S save config · ^Q quit", "F1-F5 switch section"] {
        lines.push(Line::from(Span::styled(hint, Style::default().fg(theme::TEXT_MUTED))));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn connection_line(app: &App) -> Line<'_> {
    match &app.session.repo {
        Some(repo) => Line::from(Span::styled(
            format!("● {} [{}]", repo.slug(), repo.branch()),
            Style::default().fg(theme::SUCCESS),
        )),
        None => Line::from(Span::styled("○ not connected", Style::default().fg(theme::TEXT_MUTED))),
    }
}

fn render_main(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);
    render_tabs(frame, app, rows[0]);

    match app.section {
        Section::Chat => render_chat(frame, app, rows[1]),
        Section::Upload => render_upload(frame, app, rows[1]),
        Section::MultiUpload => render_multi_upload(frame, app, rows[1]),
        Section::Files => render_files(frame, app, rows[1]),
        Section::Publish => render_publish(frame, app, rows[1]),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == app.section {
            Style::default().fg(theme::ACCENT).bold()
        } else {
            Style::default().fg(theme::TEXT_MUTED)
        };
        spans.push(Span::styled(format!(" F{} {} ", i + 1, section.title()), style));
        spans.push(Span::styled("│", Style::default().fg(theme::BORDER)));
    }
    spans.pop();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(area);
    render_field(frame, &app.chat_prompt, app.focus == Focus::Section(0), rows[0]);

    let mut lines: Vec<Line> = Vec::new();
    if app.session.transcript.is_empty() {
        lines.push(Line::from(Span::styled("No messages yet — type a prompt and press Enter.", Style::default().fg(theme::TEXT_MUTED))));
    }
    for exchange in app.session.transcript.iter() {
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", exchange.at.format("%H:%M")), Style::default().fg(theme::TEXT_MUTED)),
            Span::styled("You: ", Style::default().fg(theme::USER).bold()),
            Span::styled(exchange.prompt.clone(), Style::default().fg(theme::TEXT)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("       AI: ", Style::default().fg(theme::ASSISTANT).bold()),
            Span::styled(exchange.response.clone(), Style::default().fg(theme::TEXT_SECONDARY)),
        ]));
        lines.push(Line::from(""));
    }
    // Keep the newest exchanges visible
    let visible = rows[1].height as usize;
    let skip = lines.len().saturating_sub(visible);
    let lines: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[1]);
}

fn render_upload(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(2), Constraint::Min(1)]).split(area);
    render_field(frame, &app.upload_path, app.focus == Focus::Section(0), rows[0]);
    render_field(frame, &app.upload_dest, app.focus == Focus::Section(1), rows[1]);
    let hint = "Enter uploads the file. Empty destination keeps the local file name.";
    frame.render_widget(Paragraph::new(Span::styled(hint, Style::default().fg(theme::TEXT_MUTED))), rows[2]);
}

fn render_multi_upload(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Length(2), Constraint::Min(1)]).split(area);
    render_field(frame, &app.multi_paths, app.focus == Focus::Section(0), rows[0]);
    render_field(frame, &app.multi_folder, app.focus == Focus::Section(1), rows[1]);
    let hint = "Separate local paths with spaces (e.g. docs/a.md docs/b.md). One failure never aborts the rest.";
    frame.render_widget(Paragraph::new(Span::styled(hint, Style::default().fg(theme::TEXT_MUTED))).wrap(Wrap { trim: false }), rows[2]);
}

fn render_files(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Percentage(40), Constraint::Min(1)]).split(area);

    let focused = app.focus == Focus::FileList;
    let hint_style = Style::default().fg(if focused { theme::TEXT_SECONDARY } else { theme::TEXT_MUTED });
    frame.render_widget(
        Paragraph::new(Span::styled("↑↓ select · r refresh · v view · d delete", hint_style)),
        rows[0],
    );

    let mut lines: Vec<Line> = Vec::new();
    if app.session.listing.is_empty() {
        let text = if app.session.connected() { "No files in the repository — press r to refresh." } else { "Connect to GitHub first." };
        lines.push(Line::from(Span::styled(text, Style::default().fg(theme::TEXT_MUTED))));
    }
    for (i, path) in app.session.listing.iter().enumerate() {
        let selected = i == app.session.selected;
        let (marker, style) = if selected && focused {
            ("> ", Style::default().fg(theme::ACCENT).bold())
        } else if selected {
            ("> ", Style::default().fg(theme::TEXT))
        } else {
            ("  ", Style::default().fg(theme::TEXT_SECONDARY))
        };
        lines.push(Line::from(Span::styled(format!("{}{}", marker, path), style)));
    }
    frame.render_widget(Paragraph::new(lines), rows[1]);

    match &app.session.viewed {
        Some((path, content)) => {
            let block = Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme::BORDER))
                .title(format!(" {} ", path));
            let inner = block.inner(rows[2]);
            frame.render_widget(block, rows[2]);
            frame.render_widget(
                Paragraph::new(content.as_str()).style(Style::default().fg(theme::TEXT_SECONDARY)).wrap(Wrap { trim: false }),
                inner,
            );
        }
        None => {
            frame.render_widget(
                Paragraph::new(Span::styled("v shows the selected file here.", Style::default().fg(theme::TEXT_MUTED))),
                rows[2],
            );
        }
    }
}

fn render_publish(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(area);
    render_field(frame, &app.publish_path, app.focus == Focus::Section(0), rows[0]);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        "Enter publishes the file as index.html on the configured branch.",
        Style::default().fg(theme::TEXT_MUTED),
    ))];
    if let Some(repo) = &app.session.repo {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Your site will be served at: ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(github::pages_url(repo.owner(), repo.repo()), Style::default().fg(theme::INFO)),
        ]));
        lines.push(Line::from(Span::styled(
            "If it does not load, check that GitHub Pages is enabled in the repository settings.",
            Style::default().fg(theme::TEXT_MUTED),
        )));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), rows[1]);
}

/// A labelled field on two lines: label, then value with cursor.
fn render_field(frame: &mut Frame, field: &InputField, focused: bool, area: Rect) {
    let lines = vec![label_line(field, focused), value_line(field, focused, area.width as usize)];
    frame.render_widget(Paragraph::new(lines), area);
}

fn label_line(field: &InputField, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default().fg(theme::BORDER_FOCUS).bold()
    } else {
        Style::default().fg(theme::TEXT_MUTED)
    };
    Line::from(Span::styled(field.label, style))
}

/// Value line with a reversed-style cursor when focused. Long values are
/// trimmed from the left so the cursor region stays visible.
fn value_line(field: &InputField, focused: bool, width: usize) -> Line<'static> {
    let display = field.display_value();
    let base = Style::default().fg(theme::TEXT).bg(if focused { theme::BG_INPUT } else { theme::BG_BASE });

    if !focused {
        return Line::from(Span::styled(trim_to_width(&display, width), base));
    }

    let chars: Vec<char> = display.chars().collect();
    let before: String = chars[..field.cursor.min(chars.len())].iter().collect();
    let at: String = chars.get(field.cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = chars.iter().skip(field.cursor + 1).collect();

    Line::from(vec![
        Span::styled(trim_to_width(&before, width.saturating_sub(2)), base),
        Span::styled(at, base.add_modifier(Modifier::REVERSED)),
        Span::styled(after, base),
    ])
}

/// Trim a string to a display width, keeping the tail (the end of a path
/// or token is the interesting part while typing).
fn trim_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut total = 0;
    for c in s.chars().rev() {
        let w = c.to_string().width();
        if total + w + 1 > width {
            break;
        }
        total += w;
        out.insert(0, c);
    }
    format!("…{}", out)
}

fn render_status(frame: &mut Frame, status: Option<&StatusLine>, area: Rect) {
    let Some(status) = status else {
        return;
    };
    let (icon, color) = match status.kind {
        StatusKind::Success => ("✓", theme::SUCCESS),
        StatusKind::Info => ("ℹ", theme::INFO),
        StatusKind::Warning => ("⚠", theme::WARNING),
        StatusKind::Error => ("✗", theme::ERROR),
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", icon), Style::default().fg(color).bold()),
        Span::styled(status.text.clone(), Style::default().fg(color)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_to_width_keeps_tail() {
        assert_eq!(trim_to_width("short", 10), "short");
        let trimmed = trim_to_width("a/very/long/path/file.txt", 9);
        assert!(trimmed.starts_with('…'));
        assert!(trimmed.ends_with("file.txt"));
        assert!(trimmed.width() <= 9);
    }
}

//! Rendering: header with the document picker, transcript, question input
//! with its send control, help bar, and modal popups on top.

use crate::app::{App, Mode};
use pdf_qa_client::Phase;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub const LOADING_TEXT: &str = "Loading... Please wait.";
pub const UPLOAD_PLACEHOLDER: &str = "Upload PDF";
pub const INPUT_PLACEHOLDER: &str = "Send Message...";

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Draw the whole screen. Returns the largest useful transcript scroll
/// offset for the current content and size.
pub fn render(frame: &mut Frame, app: &App) -> u16 {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // transcript
            Constraint::Length(3), // input
            Constraint::Length(1), // help
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    let max_scroll = render_transcript(frame, chunks[1], app);
    render_input(frame, chunks[2], app);
    render_help(frame, chunks[3], app);

    if let Mode::PickDocument { path } = &app.mode {
        render_picker(frame, path);
    }
    if let Some(message) = &app.alert {
        render_alert(frame, message);
    }
    max_scroll
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(40)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        " PDF Q&A",
        Style::default().add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, cols[0]);

    let (label, style) = match app.session.document() {
        Some(doc) => (doc.name().to_string(), Style::default().fg(Color::White)),
        None => (UPLOAD_PLACEHOLDER.to_string(), Style::default().fg(Color::DarkGray)),
    };
    let picker = Paragraph::new(Line::from(vec![
        Span::styled("[+] ", Style::default().fg(Color::Cyan)),
        Span::styled(label, style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Ctrl+O "),
    );
    frame.render_widget(picker, cols[1]);
}

/// Lines of the transcript, one labeled block per question and answer.
pub fn transcript_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for turn in app.session.transcript() {
        push_block(
            &mut lines,
            "Q: ",
            &turn.question,
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        );
        push_block(
            &mut lines,
            "A: ",
            &turn.answer,
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        );
        lines.push(Line::from(""));
    }

    if app.is_busy() {
        let step = match app.session.phase() {
            Phase::Uploading => "uploading",
            Phase::Asking => "asking",
            Phase::Idle => "",
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {}", SPINNER[app.loading_frame % SPINNER.len()], LOADING_TEXT),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(format!(" ({})", step), Style::default().fg(Color::DarkGray)),
        ]));
    }
    lines
}

fn push_block(lines: &mut Vec<Line<'static>>, label: &'static str, text: &str, label_style: Style) {
    let mut rows = text.lines();
    let first = rows.next().unwrap_or("").to_string();
    lines.push(Line::from(vec![Span::styled(label, label_style), Span::raw(first)]));
    let indent = " ".repeat(label.len());
    for row in rows {
        lines.push(Line::from(format!("{}{}", indent, row)));
    }
}

fn render_transcript(frame: &mut Frame, area: Rect, app: &App) -> u16 {
    let lines = transcript_lines(app);
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let rows: usize = lines.iter().map(|line| wrapped_rows(line, inner_width)).sum();
    let max_scroll = rows.saturating_sub(inner_height).min(u16::MAX as usize - 1) as u16;
    let scroll = app.scroll.min(max_scroll);

    let para = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(para, area);
    max_scroll
}

/// Screen rows `line` takes once word-wrapped to `width` columns. Errs on
/// the high side so the last row stays reachable.
fn wrapped_rows(line: &Line, width: usize) -> usize {
    let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
    let mut rows = 1;
    let mut col = 0;
    for word in text.split_inclusive(' ') {
        let visible = word.trim_end_matches(' ').chars().count();
        if col > 0 && col + visible > width {
            rows += 1;
            col = 0;
        }
        col += word.chars().count();
        while col > width {
            rows += 1;
            col -= width;
        }
    }
    rows.max(line.width().div_ceil(width))
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    let question = app.session.question();
    let text = if question.is_empty() && !app.is_busy() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        let mut chars: Vec<char> = question.chars().collect();
        if !app.is_busy() && app.mode == Mode::Chat && app.alert.is_none() {
            let at = app.cursor.min(chars.len());
            if at == chars.len() {
                chars.push('_');
            } else {
                chars.insert(at, '|');
            }
        }
        Span::styled(
            chars.into_iter().collect::<String>(),
            if app.is_busy() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            },
        )
    };

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        text,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Question "),
    );
    frame.render_widget(input, cols[0]);

    let send_style = if app.send_enabled() {
        Style::default().fg(Color::White).bg(Color::Blue)
    } else {
        Style::default().fg(Color::Black).bg(Color::DarkGray)
    };
    let send = Paragraph::new(Line::from(Span::styled(" Send ", send_style)))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(send, cols[1]);
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.is_busy() {
        Line::from(Span::styled(
            " Waiting for the server... ",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled(" Enter", Style::default().fg(Color::Green)),
            Span::raw(": Send │ "),
            Span::styled("Ctrl+O", Style::default().fg(Color::Green)),
            Span::raw(": Open PDF │ "),
            Span::styled("PgUp/PgDn/^Home/^End", Style::default().fg(Color::Green)),
            Span::raw(": Scroll │ "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(": Quit "),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_picker(frame: &mut Frame, path: &str) {
    let area = centered(frame.area(), 60, 5);
    frame.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(format!("{}_", path)),
        Line::from(Span::styled(
            "Enter: select │ Esc: cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Open PDF (path) "),
    );
    frame.render_widget(body, area);
}

fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), 60, 6);
    frame.render_widget(Clear, area);
    let body = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[ OK ]", Style::default().add_modifier(Modifier::BOLD))),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Alert "),
    );
    frame.render_widget(body, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_rows_counts_word_wrapped_lines() {
        assert_eq!(wrapped_rows(&Line::from(""), 10), 1);
        assert_eq!(wrapped_rows(&Line::from("short"), 10), 1);
        // "aaaa bbbb " fills the first row, "cccc" wraps.
        assert_eq!(wrapped_rows(&Line::from("aaaa bbbb cccc"), 10), 2);
        // A word longer than the row is broken across rows.
        assert_eq!(wrapped_rows(&Line::from("x".repeat(25)), 10), 3);
        let answer = format!("A: {}ENDMARK", "word ".repeat(60));
        assert!(wrapped_rows(&Line::from(answer.clone()), 38) >= answer.len().div_ceil(38));
    }
}

use std::path::Path;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{LocationDialog, MessageType, StatusMessage};
use super::layout::{AppLayout, centered_rect};
use crate::models::{ClassifiedEntry, ConnectionKind};
use crate::session::SessionStatus;
use crate::utils::{format_path_with_tilde, local_path_from_uri, sanitize_for_display};

const FG: Color = Color::Rgb(250, 250, 250);
const MUTED: Color = Color::Rgb(113, 113, 122);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Everything the renderer needs for one frame
pub struct RenderState<'a> {
    pub search_query: &'a str,
    pub results: Vec<&'a ClassifiedEntry>,
    pub selected_idx: usize,
    pub total_count: usize,
    pub session_status: &'a SessionStatus,
    pub location: Option<&'a Path>,
    pub dialog: Option<&'a LocationDialog>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state.search_query, state.dialog.is_none());
    render_results_list(frame, layout.results_area, state);
    render_details(frame, layout.details_area, state.results.get(state.selected_idx).copied());
    render_status_bar(frame, layout.status_area, state);

    if let Some(dialog) = state.dialog {
        render_location_dialog(frame, dialog, state.location);
    }
}

fn bordered(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED))
        .title(title)
}

fn badge_color(kind: ConnectionKind) -> Color {
    match kind {
        ConnectionKind::Local => MUTED,
        ConnectionKind::DevContainer => Color::Rgb(59, 130, 246),
        ConnectionKind::Wsl => Color::Rgb(234, 179, 8),
        ConnectionKind::Ssh => Color::Rgb(168, 85, 247),
        ConnectionKind::OtherRemote => Color::Rgb(244, 114, 182),
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, query: &str, focused: bool) {
    let mut spans = vec![Span::styled("> ", Style::default().fg(ACCENT)), Span::raw(query)];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(MUTED)));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(bordered(" Search "));
    frame.render_widget(paragraph, area);
}

fn entry_line(entry: &ClassifiedEntry) -> Line<'static> {
    let kind = entry.kind();
    let mut spans = vec![Span::raw(sanitize_for_display(entry.display_name()))];
    if kind != ConnectionKind::Local {
        spans.push(Span::styled(
            format!(" - {}", kind.badge()),
            Style::default().fg(badge_color(kind)),
        ));
    }
    Line::from(spans)
}

fn render_results_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = format!(" Recent folders ({}/{}) ", state.results.len(), state.total_count);

    if state.results.is_empty() {
        let message = match state.session_status {
            SessionStatus::NotConfigured => "No history database configured. Press Ctrl+O.",
            SessionStatus::Loading => "Loading...",
            SessionStatus::Failed(_) => "Could not read history. Press Ctrl+O to pick another file.",
            SessionStatus::Ready if state.total_count == 0 => "No recent folders.",
            SessionStatus::Ready => "No matches.",
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(MUTED)))
            .block(bordered(&title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state.results.iter().map(|entry| ListItem::new(entry_line(entry))).collect();

    let list = List::new(items)
        .block(bordered(&title))
        .style(Style::default().fg(MUTED))
        .highlight_style(Style::default().fg(FG).bg(ACCENT).add_modifier(Modifier::BOLD));

    // Stateful rendering keeps the selection scrolled into view
    let mut list_state = ListState::default().with_selected(Some(state.selected_idx));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn field(name: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", name), Style::default().fg(MUTED)),
        Span::raw(value.into()),
    ])
}

fn render_details(frame: &mut Frame, area: Rect, entry: Option<&ClassifiedEntry>) {
    let content = match entry {
        Some(entry) => {
            let mut lines = vec![
                field("Name", sanitize_for_display(entry.display_name())),
                field("Type", entry.kind().to_string()),
            ];
            if let Some(path) = local_path_from_uri(&entry.folder_uri) {
                lines.push(field("Path", format_path_with_tilde(&path)));
            }
            if let Some(authority) = &entry.remote_authority {
                lines.push(field("Remote", sanitize_for_display(authority)));
            }
            if let Some(label) = &entry.label {
                lines.push(field("Label", sanitize_for_display(label)));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("URI", Style::default().fg(MUTED))));
            lines.push(Line::from(sanitize_for_display(&entry.folder_uri)));
            Text::from(lines)
        }
        None => Text::from("No folder selected"),
    };

    let paragraph = Paragraph::new(content).block(bordered(" Details ")).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let bar = Style::default().bg(BAR_BG);

    let (text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Success => ACCENT,
            MessageType::Error => ERROR,
        };
        (format!(" {} ", message.text), bar.fg(color))
    } else if state.dialog.is_some() {
        (" Enter: verify and save | Esc: cancel | Ctrl+C: quit ".to_string(), bar.fg(FG))
    } else {
        let mut parts = Vec::new();
        if let SessionStatus::Failed(reason) = state.session_status {
            parts.push(format!("[ERROR] {}", reason));
        } else if let Some(location) = state.location {
            parts.push(format_path_with_tilde(location));
        }
        if !state.results.is_empty() {
            parts.push(format!("{}/{}", state.selected_idx + 1, state.results.len()));
        }
        if !state.search_query.is_empty() {
            parts.push("Esc: clear".to_string());
        }
        parts.push("Enter: open".to_string());
        parts.push("^Y: copy".to_string());
        parts.push("^O: location".to_string());
        parts.push("^R: reload".to_string());
        parts.push("^C: quit".to_string());

        let color = if matches!(state.session_status, SessionStatus::Failed(_)) { ERROR } else { FG };
        (format!(" {} ", parts.join(" | ")), bar.fg(color))
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn render_location_dialog(frame: &mut Frame, dialog: &LocationDialog, current: Option<&Path>) {
    let area = centered_rect(70, 9, frame.area());

    let current = current
        .map(format_path_with_tilde)
        .unwrap_or_else(|| "not configured".to_string());
    let mut lines = vec![
        field("Current", current),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::raw(dialog.input.as_str().to_owned()),
            Span::styled("█", Style::default().fg(MUTED)),
        ]),
        Line::from(""),
    ];
    match &dialog.diagnostic {
        Some(reason) => lines.push(Line::from(Span::styled(
            sanitize_for_display(reason),
            Style::default().fg(ERROR),
        ))),
        None => lines.push(Line::from(Span::styled(
            "Path to the editor's state.vscdb",
            Style::default().fg(MUTED),
        ))),
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(" History database location "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

//! Directory pane rendering.
//!
//! Each visible entry is laid out by [`layout_line`] to exactly the pane
//! width and colored by its kind. The cursor row is reversed.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scout_core::config::settings::MessageConfig;
use scout_core::config::theme::{parse_color, Theme};
use scout_core::fs::entry::FileEntry;
use scout_core::layout::layout_line;
use scout_core::nav::snapshot::DirectorySnapshot;

/// Renders one pane. `None` leaves the area blank.
pub fn render_pane(
    f: &mut Frame,
    area: Rect,
    snapshot: Option<&DirectorySnapshot>,
    theme: &Theme,
    messages: &MessageConfig,
) {
    let Some(snapshot) = snapshot else {
        return;
    };
    let lines = pane_lines(snapshot, area.width, area.height, theme, messages);
    f.render_widget(Paragraph::new(lines), area);
}

/// Builds the rows shown for `snapshot` in a `width` x `height` area.
pub fn pane_lines(
    snapshot: &DirectorySnapshot,
    width: u16,
    height: u16,
    theme: &Theme,
    messages: &MessageConfig,
) -> Vec<Line<'static>> {
    let error_style = Style::default().fg(parse_color(&theme.pane.error_fg));

    if !snapshot.is_readable() {
        return vec![Line::from(Span::styled(messages.access_denied.clone(), error_style))];
    }
    if snapshot.is_empty() {
        return vec![Line::from(Span::styled(
            messages.empty_dir.clone(),
            Style::default().add_modifier(Modifier::DIM),
        ))];
    }

    let width = usize::from(width);
    let range = snapshot.visible_range(usize::from(height));
    let mut lines = Vec::with_capacity(range.len());
    for index in range {
        let entry = &snapshot.entries()[index];
        let name = scout_core::nfc_string(entry.name());
        let text = match layout_line(
            &name,
            entry.size_label(),
            width,
            entry.is_marked(),
            entry.is_tagged(),
        ) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, "pane not rendered");
                return vec![Line::from(Span::styled("!".repeat(width.min(1)), error_style))];
            }
        };
        let mut style = entry_style(entry, theme);
        if index == snapshot.cursor() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(text, style)));
    }
    lines
}

fn entry_style(entry: &FileEntry, theme: &Theme) -> Style {
    let color = if entry.is_marked() {
        parse_color(&theme.pane.marked_fg)
    } else {
        parse_color(theme.kind_fg(entry.kind()))
    };
    let style = Style::default().fg(color);
    if entry.kind().is_emphasized() {
        style.add_modifier(Modifier::BOLD)
    } else if !entry.is_accessible() {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

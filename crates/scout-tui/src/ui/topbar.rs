use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scout_core::config::theme::{parse_color, Theme};

/// Renders `user@host /current/path/selected`.
pub fn render_topbar(
    f: &mut Frame,
    area: Rect,
    identity: &str,
    current_dir: &Path,
    selected: Option<&str>,
    theme: &Theme,
) {
    let line = topbar_line(identity, current_dir, selected, theme);
    f.render_widget(Paragraph::new(line), area);
}

pub fn topbar_line(
    identity: &str,
    current_dir: &Path,
    selected: Option<&str>,
    theme: &Theme,
) -> Line<'static> {
    let mut dir = scout_core::nfc_string(&current_dir.to_string_lossy());
    if !dir.ends_with('/') {
        dir.push('/');
    }

    let mut spans = vec![
        Span::styled(
            identity.to_string(),
            Style::default()
                .fg(parse_color(&theme.topbar.user_fg))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            dir,
            Style::default()
                .fg(parse_color(&theme.topbar.path_fg))
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(name) = selected {
        spans.push(Span::styled(
            scout_core::nfc_string(name),
            Style::default().fg(parse_color(&theme.topbar.file_fg)),
        ));
    }
    Line::from(spans)
}

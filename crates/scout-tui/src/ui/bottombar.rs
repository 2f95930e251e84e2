//! Bottom line: details of the cursor entry, a status message or the
//! command prompt.

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

/// What the bottom line shows.
#[derive(Clone, Copy)]
pub enum BottomBarProps<'a> {
    Detail(Option<&'a FileEntry>),
    Status(&'a str),
    Prompt(&'a str),
}

pub fn render_bottombar(
    f: &mut Frame,
    area: Rect,
    props: BottomBarProps<'_>,
    theme: &Theme,
    messages: &MessageConfig,
) {
    let line = match props {
        BottomBarProps::Detail(entry) => detail_line(entry, theme, messages),
        BottomBarProps::Status(text) => Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(parse_color(&theme.bottombar.message_fg)),
        )),
        BottomBarProps::Prompt(text) => prompt_line(text),
    };
    f.render_widget(Paragraph::new(line), area);

    if let BottomBarProps::Prompt(text) = props {
        let x = area.x + 1 + u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}

pub fn prompt_line(text: &str) -> Line<'static> {
    Line::from(vec![Span::raw(":"), Span::raw(text.to_string())])
}

/// `permissions owner date [-> target | broken symlink]`
pub fn detail_line(
    entry: Option<&FileEntry>,
    theme: &Theme,
    messages: &MessageConfig,
) -> Line<'static> {
    let Some(entry) = entry else {
        return Line::default();
    };
    let Some(detail) = entry.detail() else {
        return Line::default();
    };

    let bar = &theme.bottombar;
    let mut spans = vec![
        Span::styled(
            detail.permissions.clone(),
            Style::default().fg(parse_color(&bar.permissions_fg)),
        ),
        Span::raw(" "),
        Span::styled(
            detail.owner.clone(),
            Style::default().fg(parse_color(&bar.owner_fg)),
        ),
        Span::raw(" "),
        Span::styled(
            detail.modified.clone(),
            Style::default().fg(parse_color(&bar.date_fg)),
        ),
    ];

    if entry.is_symlink() {
        spans.push(Span::raw(" "));
        match &detail.link_target {
            Some(target) => spans.push(Span::styled(
                format!("-> {}", scout_core::nfc_string(&target.to_string_lossy())),
                Style::default().fg(parse_color(&bar.link_fg)),
            )),
            None => spans.push(Span::styled(
                messages.broken_symlink.clone(),
                Style::default()
                    .fg(parse_color(&theme.pane.error_fg))
                    .add_modifier(Modifier::BOLD),
            )),
        }
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::config::settings::ExtensionConfig;
    use scout_core::fs::inspect::compute_detail;
    use scout_core::fs::owner::OwnerResolver;
    use std::ffi::OsStr;
    use std::fs;
    use tempfile::TempDir;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn inspected(dir: &std::path::Path, name: &str) -> FileEntry {
        let mut entry =
            FileEntry::classify(dir, OsStr::new(name), &ExtensionConfig::default()).unwrap();
        let owners = OwnerResolver::from_pairs([(0, "root".to_string())]);
        compute_detail(dir, &mut entry, &owners, "%Y").unwrap();
        entry
    }

    #[test]
    fn no_entry_is_blank() {
        let line = detail_line(None, &Theme::default(), &MessageConfig::default());
        assert!(line.spans.is_empty());
    }

    #[test]
    fn regular_file_shows_three_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        let entry = inspected(tmp.path(), "a.txt");

        let line = detail_line(Some(&entry), &Theme::default(), &MessageConfig::default());
        assert_eq!(line.spans.len(), 5);
        assert!(text(&line).starts_with('-'));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_show_target_or_broken_marker() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("target"), "").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("target"), tmp.path().join("good")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("missing"), tmp.path().join("bad")).unwrap();

        let good = inspected(tmp.path(), "good");
        let line = detail_line(Some(&good), &Theme::default(), &MessageConfig::default());
        assert!(text(&line).contains("-> "));
        assert!(text(&line).ends_with("target"));

        let bad = inspected(tmp.path(), "bad");
        let line = detail_line(Some(&bad), &Theme::default(), &MessageConfig::default());
        assert!(text(&line).ends_with("broken symlink"));
    }

    #[test]
    fn prompt_has_colon_prefix() {
        assert_eq!(text(&prompt_line("search foo")), ":search foo");
    }
}

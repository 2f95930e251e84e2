use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use scout_core::config::theme::parse_color;

use crate::app::{App, AppMode};
use crate::ui::bottombar::{render_bottombar, BottomBarProps};
use crate::ui::pane::render_pane;
use crate::ui::topbar::render_topbar;

/// Splits the pane row into Parent, Current and Next columns.
///
/// Parent takes an eighth of the width, Next half, Current the rest.
pub fn pane_columns(area: Rect) -> [Rect; 3] {
    let parent = area.width / 8;
    let current = (area.width / 2).saturating_sub(parent);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(parent),
            Constraint::Length(current),
            Constraint::Min(0),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Main render function: top bar, three panes, bottom bar.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let ui = &app.config().ui;
    if area.width < ui.min_cols || area.height < ui.min_lines {
        render_too_small(f, area, app);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let navigator = app.navigator();
    let panes = navigator.panes();
    let theme = app.theme();
    let messages = &app.config().messages;

    render_topbar(
        f,
        rows[0],
        app.identity(),
        panes.current().path(),
        navigator.selected().map(|e| e.name()),
        theme,
    );

    let [parent, current, next] = pane_columns(rows[1]);
    render_pane(f, parent, panes.parent(), theme, messages);
    render_pane(f, current, Some(panes.current()), theme, messages);
    render_pane(f, next, panes.next(), theme, messages);

    let props = match (app.mode(), app.status()) {
        (AppMode::Command(text), _) => BottomBarProps::Prompt(text),
        (AppMode::Normal, Some(status)) => BottomBarProps::Status(status),
        (AppMode::Normal, None) => BottomBarProps::Detail(navigator.selected()),
    };
    render_bottombar(f, rows[2], props, theme, messages);
}

fn render_too_small(f: &mut Frame, area: Rect, app: &App) {
    let message = Line::from(Span::styled(
        app.config().messages.too_small.clone(),
        Style::default().fg(parse_color(&app.theme().pane.error_fg)),
    ));
    f.render_widget(Paragraph::new(message), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use scout_core::config::keymap::Keymap;
    use scout_core::config::settings::Config;
    use scout_core::config::theme::Theme;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    use crate::input::InputAction;

    fn app(path: &Path, height: u16) -> App {
        let mut config = Config::default();
        config.general.sync_cwd = false;
        App::new(path, config, Theme::default(), Keymap::default(), height).unwrap()
    }

    fn draw(app: &App, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn cells(buffer: &Buffer, y: u16, from: u16, to: u16) -> String {
        (from..to).map(|x| buffer[(x, y)].symbol()).collect()
    }

    fn row(buffer: &Buffer, y: u16) -> String {
        cells(buffer, y, 0, buffer.area.width)
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("alpha")).unwrap();
        fs::write(tmp.path().join("alpha/inner.txt"), "x").unwrap();
        fs::write(tmp.path().join("beta.txt"), "hello").unwrap();
        tmp
    }

    #[test]
    fn columns_follow_eighths() {
        let [p, c, n] = pane_columns(Rect::new(0, 0, 80, 10));
        assert_eq!(p.width, 10);
        assert_eq!(c.width, 30);
        assert_eq!(n.width, 40);
        assert_eq!(c.x, 10);
        assert_eq!(n.x, 40);
    }

    #[test]
    fn small_terminal_shows_message_only() {
        let tmp = fixture();
        let app = app(tmp.path(), 4);
        let buffer = draw(&app, 30, 4);
        assert!(row(&buffer, 0).starts_with("terminal too small"));
        assert!(row(&buffer, 1).trim().is_empty());
    }

    #[test]
    fn full_frame_has_bars_and_panes() {
        let tmp = fixture();
        let app = app(tmp.path(), 12);
        let buffer = draw(&app, 80, 12);

        let top = row(&buffer, 0);
        assert!(top.contains(app.identity()));
        assert!(top.trim_end().ends_with("/alpha"));

        assert!(cells(&buffer, 1, 10, 40).contains("alpha"));
        assert!(cells(&buffer, 1, 40, 80).contains("inner.txt"));
        assert!(!cells(&buffer, 1, 0, 10).trim().is_empty());
        assert!(cells(&buffer, 2, 10, 40).contains("beta.txt"));
    }

    #[test]
    fn command_mode_replaces_bottom_bar_with_prompt() {
        let tmp = fixture();
        let app = app(tmp.path(), 12)
            .handle_input(InputAction::EnterMode(AppMode::Command("search be".to_string())));
        let buffer = draw(&app, 80, 12);
        assert!(row(&buffer, 11).starts_with(":search be"));
    }

    #[test]
    fn status_message_is_shown() {
        let tmp = fixture();
        let app = app(tmp.path(), 12).with_status("no match: zz".to_string());
        let buffer = draw(&app, 80, 12);
        assert!(row(&buffer, 11).starts_with("no match: zz"));
    }
}

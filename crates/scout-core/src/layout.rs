//! Fixed-width pane line layout.
//!
//! Every entry row is exactly as wide as its pane:
//!
//! ```text
//! <tag><mark><name><ext><padding>[ <size>]<space>
//! ```
//!
//! When the row does not fit, the size is dropped first, then the extension
//! is shortened, then the base name. A shortened field ends in a single `~`.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::{CoreError, CoreResult};

/// Narrowest pane a row can be laid out in.
pub const MIN_LAYOUT_WIDTH: usize = 5;

/// Columns taken by the tag glyph, the mark glyph and the trailing space.
const RESERVED: usize = 3;

const TRUNCATION_MARK: char = '~';

/// Lays out one entry row of exactly `width` display columns.
///
/// `size` is right-aligned after a separating space when it fits. Dotfiles
/// are never split into name and extension. The mark column is always blank;
/// marked rows are told apart by color, which the caller applies.
///
/// # Errors
///
/// Returns [`CoreError::PaneTooNarrow`] when `width` is below
/// [`MIN_LAYOUT_WIDTH`].
///
/// # Examples
///
/// ```
/// use scout_core::layout::layout_line;
///
/// let line = layout_line("notes.txt", Some("3 B"), 20, false, true).unwrap();
/// assert_eq!(line, "* notes.txt     3 B ");
/// ```
pub fn layout_line(
    name: &str,
    size: Option<&str>,
    width: usize,
    _marked: bool,
    tagged: bool,
) -> CoreResult<String> {
    if width < MIN_LAYOUT_WIDTH {
        return Err(CoreError::PaneTooNarrow(width));
    }
    let avail = width - RESERVED;

    let display = sanitize(name);
    let (base, ext) = split_extension(&display);
    let base_w = base.width();
    let ext_w = ext.width();
    let size_w = size.map_or(0, |s| s.width() + 1);

    let (base_part, ext_part, size) = if base_w + ext_w + size_w <= avail {
        (base.to_string(), ext.to_string(), size)
    } else if base_w + ext_w <= avail {
        (base.to_string(), ext.to_string(), None)
    } else {
        let ext_alloc = if ext_w == 0 {
            0
        } else {
            avail.saturating_sub(base_w).clamp(1, ext_w)
        };
        let base_alloc = avail - ext_alloc;
        (fit(base, base_alloc), fit(ext, ext_alloc), None)
    };

    let used = base_part.width() + ext_part.width() + size.map_or(0, |s| s.width() + 1);
    let padding = avail.saturating_sub(used);

    let mut line = String::with_capacity(width + 8);
    line.push(if tagged { '*' } else { ' ' });
    line.push(' ');
    line.push_str(&base_part);
    line.push_str(&ext_part);
    line.extend(std::iter::repeat(' ').take(padding));
    if let Some(size) = size {
        line.push(' ');
        line.push_str(size);
    }
    line.push(' ');
    Ok(line)
}

/// Splits `name` at its last `.`; the extension keeps the dot.
fn split_extension(name: &str) -> (&str, &str) {
    if name.starts_with('.') {
        return (name, "");
    }
    match name.rfind('.') {
        Some(index) => name.split_at(index),
        None => (name, ""),
    }
}

/// Returns `s` unchanged if it fits in `cols`, otherwise its longest prefix
/// of at most `cols - 1` columns followed by `~`.
fn fit(s: &str, cols: usize) -> String {
    if s.width() <= cols {
        return s.to_string();
    }
    if cols == 0 {
        return String::new();
    }
    let budget = cols - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push(TRUNCATION_MARK);
    out
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_control() { '?' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tildes(s: &str) -> usize {
        s.chars().filter(|&c| c == '~').count()
    }

    #[test]
    fn ample_width_keeps_everything() {
        let line = layout_line("archive.tar.gz", Some("4.0 K"), 40, false, false).unwrap();
        assert_eq!(line.width(), 40);
        assert!(line.starts_with("  archive.tar.gz"));
        assert!(line.ends_with(" 4.0 K "));
        assert_eq!(tildes(&line), 0);
    }

    #[test]
    fn size_is_dropped_first() {
        let line = layout_line("document.pdf", Some("12 B"), 16, false, false).unwrap();
        assert_eq!(line, "  document.pdf  ");
    }

    #[test]
    fn extension_shrinks_before_name() {
        let line = layout_line("document.pdf", Some("12 B"), 14, false, false).unwrap();
        assert_eq!(line, "  document.p~ ");
        assert_eq!(tildes(&line), 1);
    }

    #[test]
    fn both_fields_shrink_when_needed() {
        let line = layout_line("document.pdf", None, 10, false, false).unwrap();
        assert_eq!(line, "  docum~~ ");
        assert_eq!(tildes(&line), 2);
    }

    #[test]
    fn name_without_extension_shrinks() {
        let line = layout_line("Makefile.in.template", None, 8, false, false).unwrap();
        assert_eq!(line.width(), 8);
        let line = layout_line("README_FIRST", None, 8, false, false).unwrap();
        assert_eq!(line, "  READ~ ");
    }

    #[test]
    fn dotfiles_are_not_split() {
        let line = layout_line(".bashrc", None, 6, false, false).unwrap();
        assert_eq!(line, "  .b~ ");
        let line = layout_line(".bashrc", None, 20, false, false).unwrap();
        assert!(line.starts_with("  .bashrc "));
    }

    #[test]
    fn tag_glyph_is_first_column() {
        let line = layout_line("a", None, 6, true, true).unwrap();
        assert_eq!(line, "* a   ");
    }

    #[test]
    fn too_narrow_is_an_error() {
        let err = layout_line("a", None, 4, false, false).unwrap_err();
        assert!(matches!(err, CoreError::PaneTooNarrow(4)));
    }

    #[test]
    fn width_is_exact_for_all_widths() {
        let cases: [(&str, Option<&str>); 5] = [
            ("archive.tar.gz", Some("1.5 M")),
            ("日本語のファイル.txt", Some("3 B")),
            ("x", Some("12")),
            (".config", Some("7")),
            ("with\ttab.rs", None),
        ];
        for (name, size) in cases {
            for width in MIN_LAYOUT_WIDTH..48 {
                let line = layout_line(name, size, width, false, false).unwrap();
                assert_eq!(line.width(), width, "{name:?} at {width}");
            }
        }
    }

    #[test]
    fn wide_characters_truncate_on_boundaries() {
        let line = layout_line("日本語日本語", None, 9, false, false).unwrap();
        assert_eq!(line.width(), 9);
        assert!(line.contains("日本~"));
    }
}

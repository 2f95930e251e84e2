//! Natural-order name comparison.
//!
//! Embedded digit runs compare by numeric value, so `file9` sorts before
//! `file10`. Everything else compares case-insensitively; names that differ
//! only in case are ordered byte-wise so that the order stays total.

use std::cmp::Ordering;

/// Compares two entry names in natural order.
///
/// Digit runs are compared by magnitude without parsing, so arbitrarily long
/// runs never overflow.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use scout_core::nav::natural::compare_names;
///
/// assert_eq!(compare_names("file9", "file10"), Ordering::Less);
/// assert_eq!(compare_names("File2", "file10"), Ordering::Less);
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let (mut left, mut right) = (a, b);
    loop {
        let (lc, rc) = match (left.chars().next(), right.chars().next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(lc), Some(rc)) => (lc, rc),
        };

        if lc.is_ascii_digit() && rc.is_ascii_digit() {
            let (left_run, left_rest) = split_digits(left);
            let (right_run, right_rest) = split_digits(right);
            let ord = compare_digit_runs(left_run, right_run);
            if ord != Ordering::Equal {
                return ord;
            }
            left = left_rest;
            right = right_rest;
            continue;
        }

        let ord = fold(lc).cmp(&fold(rc));
        if ord != Ordering::Equal {
            return ord;
        }
        left = &left[lc.len_utf8()..];
        right = &right[rc.len_utf8()..];
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}

fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

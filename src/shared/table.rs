//! Width helpers for terminal output. Lengths skip ANSI escapes so styled
//! cells line up with plain ones.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

/// Render rows under a header line and a `-` rule. Widths come from the
/// widest visible cell per column; rows longer than the header are cut.
pub fn render_table(columns: &[(&str, Justify)], rows: &[Vec<String>]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> = columns.iter().map(|(h, _)| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(columns.len()) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }
    let justify: Vec<Justify> = columns.iter().map(|(_, j)| *j).collect();

    let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    let header = format_row(&headers, &widths, &justify);
    let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);

    let mut out = header.trim_end().to_string();
    out.push('\n');
    out.push_str(&"-".repeat(rule_len));
    for row in rows {
        out.push('\n');
        out.push_str(format_row(row, &widths, &justify).trim_end());
    }
    out
}

fn format_row(row: &[String], widths: &[usize], justify: &[Justify]) -> String {
    row.iter()
        .zip(widths)
        .zip(justify)
        .map(|((cell, width), justify)| pad_field(cell, *width, *justify))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Pad a field to `target` visible columns.
pub fn pad_field(display: &str, target: usize, justify: Justify) -> String {
    let padding = " ".repeat(target.saturating_sub(display_len(display)));
    match justify {
        Justify::Left => format!("{display}{padding}"),
        Justify::Right => format!("{padding}{display}"),
    }
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_width - 1).collect();
    out.push('…');
    out
}

/// Visible length of a string. CSI sequences (`ESC [ ... final`) count as zero.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.next() == Some('[') {
                for next in chars.by_ref() {
                    if ('@'..='~').contains(&next) {
                        break;
                    }
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_len_ignores_escapes() {
        assert_eq!(display_len("\x1b[1;38;2;10;20;30m#work\x1b[0m"), 5);
        assert_eq!(display_len("plain"), 5);
        assert_eq!(display_len("héllo"), 5);
    }

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a longer line", 6), "a lon…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
        assert_eq!(truncate_with_ellipsis("abc", 0), "");
    }

    #[test]
    fn table_aligns_columns() {
        let rows = vec![
            vec!["#home".to_string(), "2".to_string()],
            vec!["#x".to_string(), "10".to_string()],
        ];
        let table = render_table(&[("Tag", Justify::Left), ("Notes", Justify::Right)], &rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Tag   | Notes");
        assert_eq!(lines[1], "-------------");
        assert_eq!(lines[2], "#home |     2");
        assert_eq!(lines[3], "#x    |    10");
    }

    #[test]
    fn styled_cells_pad_by_visible_width() {
        let styled = "\x1b[31m#a\x1b[0m";
        assert_eq!(display_len(&pad_field(styled, 4, Justify::Left)), 4);
        assert!(pad_field(styled, 4, Justify::Right).starts_with("  \x1b"));
    }
}

use crate::store::Theme;
use yansi::Paint;

/// Color palette for consistent theming
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub muted: (u8, u8, u8),     // IDs, secondary text
    pub accent: (u8, u8, u8),    // Headers, pins
    pub timestamp: (u8, u8, u8), // Timestamps
    pub highlight: (u8, u8, u8), // Search matches
    pub link: (u8, u8, u8),      // Bookmark URLs
    pub danger: (u8, u8, u8),    // Delete toasts
}

impl ColorPalette {
    pub const LIGHT: Self = Self {
        muted: (100, 116, 139),
        accent: (234, 88, 12),
        timestamp: (71, 85, 105),
        highlight: (219, 39, 119),
        link: (37, 99, 235),
        danger: (220, 38, 38),
    };

    pub const DARK: Self = Self {
        muted: (148, 163, 184),
        accent: (251, 146, 60),
        timestamp: (203, 213, 225),
        highlight: (244, 114, 182),
        link: (96, 165, 250),
        danger: (248, 113, 113),
    };

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::LIGHT,
            Theme::Dark => Self::DARK,
        }
    }
}

/// Formatting context passed through rendering pipeline
#[derive(Debug, Clone, Copy)]
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self::for_theme(use_color, Theme::Light)
    }

    pub fn for_theme(use_color: bool, theme: Theme) -> Self {
        Self { use_color, palette: ColorPalette::for_theme(theme) }
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8)) -> String {
        if self.use_color {
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.muted)
    }

    pub fn format_muted(&self, text: &str) -> String {
        self.paint(text, self.palette.muted)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.accent;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(ts, self.palette.timestamp)
    }

    pub fn format_link(&self, url: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.link;
            Paint::rgb(url, r, g, b).underline().to_string()
        } else {
            url.to_string()
        }
    }

    pub fn format_danger(&self, text: &str) -> String {
        self.paint(text, self.palette.danger)
    }

    pub fn format_tag(&self, tag: &str) -> String {
        let label = crate::tags::display_tag(tag);
        if self.use_color {
            let (r, g, b) = crate::tags::color_for_tag(tag);
            Paint::rgb(label.as_str(), r, g, b).bold().to_string()
        } else {
            label
        }
    }

    pub fn format_tags(&self, tags: &[String]) -> String {
        tags.iter().map(|t| self.format_tag(t)).collect::<Vec<_>>().join(" ")
    }

    /// Pin and favorite markers; two columns wide either way.
    pub fn format_flags(&self, pinned: bool, favorite: bool) -> String {
        let pin = if pinned { self.paint("^", self.palette.accent) } else { " ".into() };
        let fav = if favorite { self.paint("*", self.palette.highlight) } else { " ".into() };
        format!("{pin}{fav}")
    }

    pub fn highlight_match(&self, text: &str, query: Option<&str>) -> String {
        let Some(q) = query else { return text.to_string() };
        if q.is_empty() || !self.use_color {
            return text.to_string();
        }

        let q_lower = q.to_lowercase();
        let mut out = String::new();
        let mut remaining = text;

        // Only byte-stable lowercase mappings keep offsets aligned.
        while let Some(pos) = remaining.to_lowercase().find(&q_lower) {
            if remaining.to_lowercase().len() != remaining.len()
                || !remaining.is_char_boundary(pos)
                || !remaining.is_char_boundary(pos + q_lower.len())
            {
                break;
            }
            let (before, rest) = remaining.split_at(pos);
            let (matched, after) = rest.split_at(q_lower.len());
            out.push_str(before);
            out.push_str(&self.paint(matched, self.palette.highlight));
            remaining = after;
        }
        out.push_str(remaining);
        out
    }
}

/// Timestamp formatting with relative/absolute modes
pub struct TimeFormatter {
    relative_mode: bool,
    now: i64,
}

impl TimeFormatter {
    pub fn new(relative_mode: bool, now: i64) -> Self {
        Self { relative_mode, now }
    }

    /// Format epoch milliseconds.
    pub fn format(&self, millis: i64) -> String {
        if self.relative_mode {
            self.format_relative(millis)
        } else {
            self.format_absolute(millis)
        }
    }

    pub fn format_absolute(&self, millis: i64) -> String {
        match chrono::DateTime::from_timestamp_millis(millis) {
            Some(dt) => dt.with_timezone(&chrono::Local).format("%d%b%y %H:%M").to_string(),
            None => millis.to_string(),
        }
    }

    /// Age as the largest unit plus the next one down, e.g. `2d 4h ago`.
    /// Months are 30 days and years 365. Future times read as `just now`.
    pub fn format_relative(&self, millis: i64) -> String {
        const UNITS: [(&str, i64); 5] = [
            ("y", 365 * 24 * 60),
            ("mo", 30 * 24 * 60),
            ("d", 24 * 60),
            ("h", 60),
            ("m", 1),
        ];
        let minutes = (self.now - millis).max(0) / 60_000;
        if minutes == 0 {
            return "just now".to_string();
        }
        let Some(idx) = UNITS.iter().position(|(_, size)| minutes >= *size) else {
            return "just now".to_string();
        };
        let (major, major_size) = UNITS[idx];
        let mut out = format!("{}{major}", minutes / major_size);
        // Hours never show minutes.
        if let Some((minor, minor_size)) = UNITS.get(idx + 1).filter(|(unit, _)| *unit != "m") {
            let rest = (minutes % major_size) / minor_size;
            if rest > 0 {
                out.push_str(&format!(" {rest}{minor}"));
            }
        }
        out.push_str(" ago");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60_000;
    const HOUR: i64 = 60 * MIN;
    const DAY: i64 = 24 * HOUR;

    #[test]
    fn test_format_context_no_color() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.format_id("abc123"), "abc123");
        assert_eq!(ctx.format_header("Header"), "Header");
        assert_eq!(ctx.format_tag("work"), "#work");
        assert_eq!(ctx.format_flags(true, false), "^ ");
    }

    #[test]
    fn test_format_context_with_color() {
        let ctx = FormatContext::for_theme(true, Theme::Dark);
        let id = ctx.format_id("abc123");
        assert!(id.contains("abc123"));
        assert!(id.len() > "abc123".len()); // Has ANSI codes
    }

    #[test]
    fn palettes_follow_theme() {
        assert_eq!(ColorPalette::for_theme(Theme::Dark), ColorPalette::DARK);
        assert_ne!(ColorPalette::LIGHT, ColorPalette::DARK);
    }

    #[test]
    fn test_highlight_match() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.highlight_match("hello world", Some("world")), "hello world");

        let ctx = FormatContext::new(true);
        let result = ctx.highlight_match("hello World", Some("world"));
        assert!(result.contains("World"));
        assert!(result.len() > "hello World".len());
    }

    #[test]
    fn test_time_formatter_relative() {
        let now = 1_000 * DAY;
        let f = TimeFormatter::new(true, now);
        assert_eq!(f.format(now - 10_000), "just now");
        assert_eq!(f.format(now - 5 * MIN), "5m ago");
        assert_eq!(f.format(now - 3 * HOUR), "3h ago");
        assert_eq!(f.format(now - 2 * DAY - 4 * HOUR), "2d 4h ago");
        assert_eq!(f.format(now - 45 * DAY), "1mo 15d ago");
        assert_eq!(f.format(now - 400 * DAY), "1y 1mo ago");
        assert_eq!(f.format(now + HOUR), "just now");
    }

    #[test]
    fn test_time_formatter_absolute() {
        let f = TimeFormatter::new(false, 0);
        let out = f.format(1_700_000_000_000);
        assert!(out.contains("23"), "{out}");
        assert_eq!(out.split_whitespace().count(), 2);
    }
}

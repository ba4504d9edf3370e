//! Colors and glyphs of the modelgen CLI.

use colored::Color;

/// Colors for status lines, help text and report tables.
pub struct Palette {
    pub generated: Color,
    pub failed: Color,
    pub skipped: Color,
    pub note: Color,
    pub dim: Color,
    pub heading: Color,
    pub section: Color,
    pub command: Color,
    pub key: Color,
    pub value: Color,
}

pub const PALETTE: Palette = Palette {
    generated: Color::Green,
    failed: Color::Red,
    skipped: Color::Yellow,
    note: Color::Blue,
    dim: Color::BrightBlack,
    heading: Color::BrightBlue,
    section: Color::Cyan,
    command: Color::Magenta,
    key: Color::BrightCyan,
    value: Color::White,
};

/// Kind of status line; picks the glyph and color together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A file was generated.
    Generated,
    /// Generation failed.
    Failed,
    /// Something was left alone: an existing file, a skipped value.
    Skipped,
    Note,
    /// Verbose-only detail.
    Detail,
}

impl Status {
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Generated => "✓",
            Status::Failed => "✗",
            Status::Skipped => "⚠",
            Status::Note => "ℹ",
            Status::Detail => ARROW,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Status::Generated => PALETTE.generated,
            Status::Failed => PALETTE.failed,
            Status::Skipped => PALETTE.skipped,
            Status::Note => PALETTE.note,
            Status::Detail => PALETTE.dim,
        }
    }
}

pub const ARROW: &str = "→";
pub const BULLET: &str = "•";
/// Prefix for paths of written model files.
pub const WRITTEN_FILE: &str = "📄";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_glyphs_are_distinct() {
        let statuses = [Status::Generated, Status::Failed, Status::Skipped, Status::Note, Status::Detail];
        let mut glyphs: Vec<_> = statuses.iter().map(|status| status.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), statuses.len());
        assert_eq!(Status::Failed.color(), Color::Red);
    }
}

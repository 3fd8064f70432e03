//! Colors and status glyphs.

use console::Style;

use crate::presenter::Tone;

/// Styles used by [`super::TerminalUI`].
///
/// Tones map onto the same palette as status lines: `Ok` is green like a
/// success, `Missing` red like an error.
#[derive(Debug, Clone)]
pub struct InstallerTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Advisory values and the header glyph.
    pub info: Style,
    pub title: Style,
    /// The `$ command` line of a failure.
    pub command: Style,
    /// Gutter next to captured output.
    pub border: Style,
    pub hint: Style,
    /// Labels in the version table.
    pub key: Style,
}

impl Default for InstallerTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallerTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            title: Style::new().bold(),
            command: Style::new().dim().italic(),
            border: Style::new().dim(),
            hint: Style::new().blue().dim(),
            key: Style::new().bold(),
        }
    }

    /// No styling at all, for pipes and `--no-color`.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            info: none.clone(),
            title: none.clone(),
            command: none.clone(),
            border: none.clone(),
            hint: none.clone(),
            key: none,
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.info.apply_to("◈"), self.title.apply_to(title))
    }

    /// Style a version-table value by its tone.
    pub fn format_tone(&self, value: &str, tone: Tone) -> String {
        let style = match tone {
            Tone::Ok => &self.success,
            Tone::Missing => &self.error,
            Tone::Info => &self.info,
        };
        style.apply_to(value).to_string()
    }
}

/// Colors are off under `NO_COLOR` and when stdout is not a terminal.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_status_lines_carry_glyphs() {
        let theme = InstallerTheme::plain();
        assert_eq!(theme.format_success("Installed"), "✓ Installed");
        assert_eq!(theme.format_warning("Restart required"), "⚠ Restart required");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
        assert_eq!(theme.format_header("PyVOL v1.1.0"), "◈ PyVOL v1.1.0");
    }

    #[test]
    fn plain_tone_is_unstyled() {
        let theme = InstallerTheme::plain();
        assert_eq!(theme.format_tone("not found", Tone::Missing), "not found");
        assert_eq!(theme.format_tone("1.1.0", Tone::Ok), "1.1.0");
    }

    #[test]
    fn no_color_disables_colors() {
        std::env::set_var("NO_COLOR", "1");
        assert!(!should_use_colors());
    }
}

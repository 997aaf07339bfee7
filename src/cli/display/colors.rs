//! Color theme for CLI output

use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on an ARM provisioning state
    pub fn get_state_color(&self, state: Option<&str>) -> TableColor {
        match state.map(str::to_ascii_lowercase).as_deref() {
            None => self.muted,
            Some("succeeded") => self.success,
            Some("failed") | Some("canceled") => self.error,
            Some(_) => self.warning,
        }
    }

    pub fn get_enabled_color(&self, enabled: bool) -> TableColor {
        if enabled {
            self.success
        } else {
            self.muted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.success, TableColor::Green);
        assert_eq!(theme.warning, TableColor::Yellow);
        assert_eq!(theme.error, TableColor::Red);
    }

    #[test]
    fn test_get_state_color() {
        let theme = ColorTheme::default();
        assert_eq!(theme.get_state_color(Some("Succeeded")), TableColor::Green);
        assert_eq!(theme.get_state_color(Some("Creating")), TableColor::Yellow);
        assert_eq!(theme.get_state_color(Some("Failed")), TableColor::Red);
        assert_eq!(theme.get_state_color(None), TableColor::DarkGrey);
    }
}

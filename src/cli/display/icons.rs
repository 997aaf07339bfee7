//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (provisioning succeeded)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (still provisioning)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (provisioning failed or canceled)
    pub const ERROR: &'static str = "✗";

    /// Unknown icon
    pub const UNKNOWN: &'static str = "?";

    /// Get status icon for an ARM provisioning state
    pub fn get_state_icon(state: Option<&str>) -> &'static str {
        match state.map(str::to_ascii_lowercase).as_deref() {
            None => Self::UNKNOWN,
            Some("succeeded") => Self::SUCCESS,
            Some("failed") | Some("canceled") => Self::ERROR,
            Some(_) => Self::WARNING,
        }
    }
}

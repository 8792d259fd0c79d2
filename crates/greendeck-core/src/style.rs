//! The beamer template palette shared by every chart. Single owned copy so
//! the figures and the deck stay in sync.

/// Semantic role -> color mapping matching the lecture beamer theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// mlpurple
    pub primary: &'static str,
    /// mllavender
    pub secondary: &'static str,
    pub light: &'static str,
    pub lighter: &'static str,
    pub lightest: &'static str,
    /// mlgreen
    pub success: &'static str,
    /// mlorange
    pub warning: &'static str,
    pub danger: &'static str,
    /// mlgray
    pub neutral: &'static str,
}

impl Palette {
    pub const DEFAULT: Palette = Palette {
        primary: "#3333B2",
        secondary: "#ADADE0",
        light: "#C1C1E8",
        lighter: "#CCCCEB",
        lightest: "#D6D6EF",
        success: "#2CA02C",
        warning: "#FF7F0E",
        danger: "#D62728",
        neutral: "#7F7F7F",
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Panel plotting-area background (matplotlib's `#FAFAFA` facecolor).
pub const PANEL_BACKGROUND: &str = "#FAFAFA";

/// Figure background.
pub const FIGURE_BACKGROUND: &str = "white";

/// Alternate green ramp used by the early standalone charts.
pub const GREEN_RAMP: [&str; 5] = ["#2C9F2C", "#45B545", "#5ECC5E", "#78D878", "#91E391"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_matches_template() {
        let p = Palette::default();
        assert_eq!(p.primary, "#3333B2");
        assert_eq!(p.success, "#2CA02C");
        assert_eq!(p.neutral, "#7F7F7F");
    }
}

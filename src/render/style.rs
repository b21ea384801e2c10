//! Colour pairs used on screen

use crate::app::ColorConfig;

/// Escape sequences for the two colour pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    /// Selection, current line number, active tab
    pub highlight: String,
    /// Everything else
    pub normal: String,
}

impl Palette {
    /// Build from SGR parameter strings such as `"30;47"`
    pub fn new(highlight: &str, normal: &str) -> Self {
        Self {
            highlight: format!("\x1b[{}m", highlight),
            normal: format!("\x1b[{}m", normal),
        }
    }

    /// Escape sequence for one of the pairs
    pub fn pick(&self, highlighted: bool) -> &str {
        if highlighted {
            &self.highlight
        } else {
            &self.normal
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from(&ColorConfig::default())
    }
}

impl From<&ColorConfig> for Palette {
    fn from(colors: &ColorConfig) -> Self {
        Self::new(&colors.highlight, &colors.normal)
    }
}

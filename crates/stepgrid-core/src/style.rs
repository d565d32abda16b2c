//! Visual styling: [`Color`] and [`Style`].

/// A cell colour: either the terminal's default or a truecolor RGB value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// The terminal's default / unset colour.
    #[default]
    Default,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Construct an RGB colour.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }
}

/// Complete visual style for a single cell.
///
/// Only the attributes the drivers actually render are modelled, as plain
/// flags rather than a bitmask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub dim: bool,
    pub reverse: bool,
}

impl Style {
    /// Set the foreground colour (builder).
    #[inline]
    pub const fn with_fg(mut self, fg: Color) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background colour (builder).
    #[inline]
    pub const fn with_bg(mut self, bg: Color) -> Self {
        self.bg = bg;
        self
    }

    /// Enable the bold attribute (builder).
    #[inline]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Enable the dim attribute (builder).
    #[inline]
    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Enable the reverse-video attribute (builder).
    #[inline]
    pub const fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Whether any text attribute is set.
    #[inline]
    pub const fn has_attrs(self) -> bool {
        self.bold || self.dim || self.reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_plain() {
        let s = Style::default();
        assert_eq!(s.fg, Color::Default);
        assert_eq!(s.bg, Color::Default);
        assert!(!s.has_attrs());
    }

    #[test]
    fn style_builder() {
        let s = Style::default().with_fg(Color::rgb(255, 0, 0)).bold();
        assert_eq!(s.fg, Color::Rgb(255, 0, 0));
        assert!(s.bold);
        assert!(!s.dim);
        assert!(s.has_attrs());
    }
}

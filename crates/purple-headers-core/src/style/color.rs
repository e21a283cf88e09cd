//! Font colors

/// Font color
///
/// `Auto` is the inherited default a host falls back to when a color is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Auto,
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// The header highlight the fill clears
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }
}

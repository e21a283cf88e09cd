//! Font attributes

use super::Color;

/// The font attributes a fill reads or resets
///
/// Color and italic are cleared on every filled cell. Bold is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontStyle {
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

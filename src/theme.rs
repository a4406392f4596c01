//! Color palette definitions for Turmalin's TUI.
//!
//! A small, opinionated theme used throughout the interface. Colors are
//! grouped into neutrals (backgrounds and surfaces), text tones, and accents
//! for highlighting and semantic states.

use ratatui::style::Color;

/// Application theme palette used by rendering code.
pub struct Theme {
    /// Primary background color for the canvas.
    pub base: Color,
    /// Subtle surface color for component backgrounds.
    pub surface: Color,
    /// Muted line/border color.
    pub overlay: Color,
    /// Primary foreground text color.
    pub text: Color,
    /// Secondary text for less prominent content.
    pub subtext: Color,
    /// Accent color for selection and interactive highlights.
    pub sapphire: Color,
    /// Accent color for emphasized headings.
    pub mauve: Color,
    /// Success/positive state color.
    pub green: Color,
    /// Warning/attention state color.
    pub yellow: Color,
    /// Error/danger state color.
    pub red: Color,
    /// Accent color for subtle emphasis and borders.
    pub lavender: Color,
}

/// Construct a [`Color::Rgb`] from an 8-bit RGB triplet.
fn hex(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Return the application's default theme palette.
pub fn theme() -> Theme {
    Theme {
        base: hex((0x1e, 0x1e, 0x2e)),
        surface: hex((0x45, 0x47, 0x5a)),
        overlay: hex((0x7f, 0x84, 0x9c)),
        text: hex((0xcd, 0xd6, 0xf4)),
        subtext: hex((0xa6, 0xad, 0xc8)),
        sapphire: hex((0x74, 0xc7, 0xec)),
        mauve: hex((0xcb, 0xa6, 0xf7)),
        green: hex((0xa6, 0xe3, 0xa1)),
        yellow: hex((0xf9, 0xe2, 0xaf)),
        red: hex((0xf3, 0x8b, 0xa8)),
        lavender: hex((0xb4, 0xbe, 0xfe)),
    }
}

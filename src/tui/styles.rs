//! Medical-themed color palette and styles.

use ratatui::style::{Color, Modifier, Style};

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Primary Colors ===

    /// Deep teal (#0D9488)
    pub const PRIMARY: Color = Color::Rgb(13, 148, 136);

    /// Lighter teal for highlights (#2DD4BF)
    pub const PRIMARY_LIGHT: Color = Color::Rgb(45, 212, 191);

    /// Light slate for borders (#94A3B8)
    pub const SECONDARY_LIGHT: Color = Color::Rgb(148, 163, 184);

    // === Semantic Colors ===

    /// Emerald (#10B981)
    pub const SUCCESS: Color = Color::Rgb(16, 185, 129);

    /// Rose (#F43F5E)
    pub const DANGER: Color = Color::Rgb(244, 63, 94);

    // === Text Colors ===

    /// Primary text (#F8FAFC)
    pub const TEXT_PRIMARY: Color = Color::Rgb(248, 250, 252);

    /// Secondary text (#94A3B8)
    pub const TEXT_SECONDARY: Color = Color::Rgb(148, 163, 184);

    /// Muted text (#64748B)
    pub const TEXT_MUTED: Color = Color::Rgb(100, 116, 139);

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn subtitle() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    /// Headline result and protective (negative log-odds) terms
    #[must_use]
    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    /// Risk-raising (positive log-odds) terms
    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    /// Style for focused elements
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::SECONDARY_LIGHT)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Checkbox glyph style
    #[must_use]
    pub fn checkbox(checked: bool) -> Style {
        if checked {
            Self::focused()
        } else {
            Self::text_muted()
        }
    }

    /// Filled part of the probability gauge and the slider
    #[must_use]
    pub fn gauge() -> Style {
        Style::default().fg(Self::PRIMARY)
    }
}

//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the catalog viewer,
//! supporting both built-in themes and custom themes loaded from TOML files.
//! It provides utilities for converting hex colors to ANSI escape sequences
//! and the genre badge palette.
//!
//! # Built-in Themes
//!
//! - `library-dark`: Dark theme (default)
//! - `library-light`: Light theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#e0e0e0"
//! selection_fg = "#101010"
//! selection_bg = "#f5c2e7"
//! text_normal = "#e0e0e0"
//! text_dim = "#808080"
//! border = "#454545"
//! accent_fg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! disabled_fg = "#585b70"
//!
//! [genres]
//! default = "#777777"
//!
//! [genres.palette]
//! RPG = "#8a2be2"
//! ```
//!
//! The `[genres]` table is optional and falls back to the standard palette.
//!
//! # Example
//!
//! ```rust
//! use game_library::ui::theme::Theme;
//!
//! let theme = Theme::from_name("library-dark").unwrap();
//! assert_eq!(theme.genres.color_for("rpg"), "#8a2be2");
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{GameLibraryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "library-dark";

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
    /// Genre badge colors.
    #[serde(default)]
    pub genres: GenrePalette,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Active mode and sort column foreground.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer and secondary info.
    pub text_dim: String,

    pub border: String,

    /// Sort indicators and hints.
    pub accent_fg: String,

    pub empty_state_fg: String,

    pub error_fg: String,

    /// Disabled controls (loading selectors, unavailable modes).
    pub disabled_fg: String,
}

/// Badge colors keyed by upper-case genre name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenrePalette {
    /// Color for genres missing from the palette.
    pub default: String,
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
}

impl Default for GenrePalette {
    fn default() -> Self {
        let palette = [
            ("RPG", "#8a2be2"),
            ("FPS", "#ff4500"),
            ("ACTION", "#1e90ff"),
            ("TPS", "#228b22"),
            ("STRATEGY", "#daa520"),
            ("ADVENTURE", "#ff8c00"),
            ("SIMULATION", "#20b2aa"),
            ("SPORTS", "#32cd32"),
            ("FIGHTING", "#dc143c"),
            ("RACING", "#ff6347"),
        ]
        .into_iter()
        .map(|(genre, color)| (genre.to_string(), color.to_string()))
        .collect();

        Self {
            default: "#777777".to_string(),
            palette,
        }
    }
}

impl GenrePalette {
    /// Returns the badge color for `genre`, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::ui::theme::GenrePalette;
    ///
    /// let palette = GenrePalette::default();
    /// assert_eq!(palette.color_for("Racing"), "#ff6347");
    /// assert_eq!(palette.color_for("Puzzle"), "#777777");
    /// ```
    #[must_use]
    pub fn color_for(&self, genre: &str) -> &str {
        self.palette
            .get(&genre.trim().to_uppercase())
            .unwrap_or(&self.default)
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Supported names: `library-dark`, `library-light`.
    ///
    /// Returns `None` if the theme name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use game_library::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("library-light").unwrap();
    /// assert_eq!(theme.name, "library-light");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "library-dark" => include_str!("../../themes/library-dark.toml"),
            "library-light" => include_str!("../../themes/library-light.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Theme`] if:
    /// - The file cannot be read (file not found, permission denied, etc.)
    /// - The TOML content cannot be parsed (invalid syntax, missing fields, type mismatches)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| GameLibraryError::Theme(format!("failed to read theme file {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| GameLibraryError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    ///
    /// # Example
    ///
    /// ```rust
    /// use game_library::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff0000"), "\u{001b}[38;2;255;0;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    ///
    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }

    /// Palette used if the built-in default theme cannot be loaded.
    fn fallback() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors {
                header_fg: "#e0def4".to_string(),
                header_bg: None,
                selection_fg: "#191724".to_string(),
                selection_bg: "#ebbcba".to_string(),
                text_normal: "#e0def4".to_string(),
                text_dim: "#6e6a86".to_string(),
                border: "#403d52".to_string(),
                accent_fg: "#f6c177".to_string(),
                empty_state_fg: "#9ccfd8".to_string(),
                error_fg: "#eb6f92".to_string(),
                disabled_fg: "#524f67".to_string(),
            },
            genres: GenrePalette::default(),
        }
    }
}

impl Default for Theme {
    /// Returns the default theme (`library-dark`).
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(Self::fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn built_in_themes_parse() {
        for name in ["library-dark", "library-light"] {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn default_theme_matches_built_in() {
        assert_eq!(Theme::default(), Theme::from_name(DEFAULT_THEME).unwrap());
    }

    #[test]
    fn genre_lookup_ignores_case() {
        let palette = GenrePalette::default();
        assert_eq!(palette.color_for("rpg"), "#8a2be2");
        assert_eq!(palette.color_for(" Fighting "), "#dc143c");
        assert_eq!(palette.color_for("visual novel"), "#777777");
    }

    #[test]
    fn custom_theme_without_genres_uses_standard_palette() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r##"
name = "custom"

[colors]
header_fg = "#ffffff"
selection_fg = "#000000"
selection_bg = "#ffffff"
text_normal = "#ffffff"
text_dim = "#888888"
border = "#444444"
accent_fg = "#ffff00"
empty_state_fg = "#00ffff"
error_fg = "#ff0000"
disabled_fg = "#333333"
"##
        )
        .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.genres, GenrePalette::default());
    }

    #[test]
    fn invalid_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = 3").unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, GameLibraryError::Theme(_)));
    }

    #[test]
    fn malformed_hex_renders_white() {
        assert_eq!(Theme::fg("#12"), "\u{001b}[38;2;255;255;255m");
        assert_eq!(Theme::bg("#000000"), "\u{001b}[48;2;0;0;0m");
    }
}

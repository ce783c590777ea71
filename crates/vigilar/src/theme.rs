//! Theme model for the dashboard's light/dark palette.
//!
//! Exactly one of light/dark holds at any time. The displayed theme is
//! derived from the computed background colour of the page root, with
//! the toggle button's icon as a fallback when the colour is ambiguous
//! (e.g. during a transition or under a custom palette). The selected
//! theme is persisted under the `themeMode` storage key and must match
//! the displayed theme after any navigation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key the dashboard persists the theme preference under
pub const STORAGE_KEY: &str = "themeMode";

/// Background colour signature of the dark palette (MUI default dark)
pub const DARK_BACKGROUND_RGB: (u8, u8, u8) = (18, 18, 18);

/// Background colour signature of the light palette
pub const LIGHT_BACKGROUND_RGB: (u8, u8, u8) = (245, 245, 245);

/// Icon shown on the toggle while the dark theme is active (a sun,
/// offering the switch to light)
pub const DARK_ACTIVE_ICON: &str = "Brightness7Icon";

/// Icon shown on the toggle while the light theme is active (a moon)
pub const LIGHT_ACTIVE_ICON: &str = "Brightness4Icon";

/// The dashboard's colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    Light,
    /// Dark palette
    Dark,
}

impl Theme {
    /// The theme the dashboard defaults to with no persisted preference
    pub const DEFAULT: Self = Self::Dark;

    /// The opposite theme (one toggle activation away)
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Storage/display string for this theme
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Background colour signature as an `rgb(r, g, b)` fragment
    #[must_use]
    pub fn background_signature(self) -> String {
        let (r, g, b) = match self {
            Self::Dark => DARK_BACKGROUND_RGB,
            Self::Light => LIGHT_BACKGROUND_RGB,
        };
        format!("{r}, {g}, {b}")
    }

    /// Classify a computed `backgroundColor` value.
    ///
    /// Returns `None` when the colour matches neither palette signature;
    /// callers fall back to [`Theme::from_toggle_icon`].
    #[must_use]
    pub fn from_background(color: &str) -> Option<Self> {
        if color.contains(&Self::Dark.background_signature()) {
            Some(Self::Dark)
        } else if color.contains(&Self::Light.background_signature()) {
            Some(Self::Light)
        } else {
            None
        }
    }

    /// Classify the toggle button's icon `data-testid`.
    ///
    /// A sun icon means the dark theme is currently active; a moon icon
    /// means light.
    #[must_use]
    pub fn from_toggle_icon(icon: &str) -> Option<Self> {
        if icon.contains(DARK_ACTIVE_ICON) {
            Some(Self::Dark)
        } else if icon.contains(LIGHT_ACTIVE_ICON) {
            Some(Self::Light)
        } else {
            None
        }
    }

    /// Icon `data-testid` the toggle shows while this theme is active
    #[must_use]
    pub const fn active_icon(self) -> &'static str {
        match self {
            Self::Dark => DARK_ACTIVE_ICON,
            Self::Light => LIGHT_ACTIVE_ICON,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("not a theme: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod toggle_tests {
        use super::*;

        #[test]
        fn test_toggled_flips() {
            assert_eq!(Theme::Light.toggled(), Theme::Dark);
            assert_eq!(Theme::Dark.toggled(), Theme::Light);
        }

        #[test]
        fn test_double_toggle_is_identity() {
            for theme in [Theme::Light, Theme::Dark] {
                assert_eq!(theme.toggled().toggled(), theme);
            }
        }
    }

    mod background_tests {
        use super::*;

        #[test]
        fn test_from_background_dark() {
            assert_eq!(
                Theme::from_background("rgb(18, 18, 18)"),
                Some(Theme::Dark)
            );
            assert_eq!(
                Theme::from_background("rgba(18, 18, 18, 1)"),
                Some(Theme::Dark)
            );
        }

        #[test]
        fn test_from_background_light() {
            assert_eq!(
                Theme::from_background("rgb(245, 245, 245)"),
                Some(Theme::Light)
            );
        }

        #[test]
        fn test_from_background_ambiguous() {
            assert_eq!(Theme::from_background("rgb(255, 0, 0)"), None);
            assert_eq!(Theme::from_background(""), None);
        }
    }

    mod icon_tests {
        use super::*;

        #[test]
        fn test_sun_icon_means_dark() {
            assert_eq!(Theme::from_toggle_icon("Brightness7Icon"), Some(Theme::Dark));
        }

        #[test]
        fn test_moon_icon_means_light() {
            assert_eq!(
                Theme::from_toggle_icon("Brightness4Icon"),
                Some(Theme::Light)
            );
        }

        #[test]
        fn test_unknown_icon() {
            assert_eq!(Theme::from_toggle_icon("RefreshIcon"), None);
        }

        #[test]
        fn test_active_icon_round_trip() {
            for theme in [Theme::Light, Theme::Dark] {
                assert_eq!(Theme::from_toggle_icon(theme.active_icon()), Some(theme));
            }
        }
    }

    mod storage_tests {
        use super::*;

        #[test]
        fn test_storage_key() {
            assert_eq!(STORAGE_KEY, "themeMode");
        }

        #[test]
        fn test_str_round_trip() {
            for theme in [Theme::Light, Theme::Dark] {
                assert_eq!(theme.as_str().parse::<Theme>(), Ok(theme));
            }
        }

        #[test]
        fn test_parse_rejects_garbage() {
            assert!("solarized".parse::<Theme>().is_err());
        }

        #[test]
        fn test_default_is_dark() {
            assert_eq!(Theme::DEFAULT, Theme::Dark);
        }
    }
}

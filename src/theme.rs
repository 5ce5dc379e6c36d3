#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Light => {
                write!(f, "light")
            }
            Theme::Dark => {
                write!(f, "dark")
            }
        }
    }
}

impl Theme {
    /// Decode the macOS `AppleInterfaceStyle` user default. The key is only
    /// present (with the value "Dark") when dark mode is on; anything else,
    /// including an absent key, means light.
    pub fn from_interface_style(value: Option<&str>) -> Theme {
        match value {
            Some("Dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Decode the freedesktop portal `color-scheme` value. 1 is prefer-dark;
    /// 0 (no preference) and 2 (prefer-light) both map to light, as does
    /// anything out of range.
    pub fn from_color_scheme(value: i64) -> Theme {
        if value == 1 {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn opposite(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

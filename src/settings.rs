//! Player-facing configuration: colours, outline width, food size and grid
//! size, stored as JSON on the local device.
//!
//! Keys are camelCase so files exported by older builds still import.

use crate::error::{ColorError, SettingsError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

pub const GRID_SIZE_RANGE: RangeInclusive<u32> = 5..=60;
pub const OUTLINE_WIDTH_RANGE: RangeInclusive<u32> = 0..=10;
pub const FOOD_SIZE_RANGE: RangeInclusive<u32> = 4..=100;

/// A `#rrggbb` colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Shifts every channel by `amount`, saturating at 0 and 255.
    pub fn adjust(&self, amount: i16) -> Rgb {
        let shift = |c: u8| (c as i16 + amount).clamp(0, 255) as u8;
        Rgb::new(shift(self.r), shift(self.g), shift(self.b))
    }

    pub fn complement(&self) -> Rgb {
        Rgb::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| ColorError(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorError(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A named colour preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub snake_color: Rgb,
    pub outline_color: Rgb,
    pub outline_width: u32,
    pub background_color: Rgb,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        name: "classic",
        snake_color: Rgb::new(0x4c, 0xaf, 0x50),
        outline_color: Rgb::new(0x2e, 0x7d, 0x32),
        outline_width: 2,
        background_color: Rgb::new(0x1a, 0x1a, 0x1a),
    },
    Theme {
        name: "neon",
        snake_color: Rgb::new(0x00, 0xff, 0xff),
        outline_color: Rgb::new(0x00, 0x80, 0xff),
        outline_width: 3,
        background_color: Rgb::new(0x00, 0x00, 0x20),
    },
    Theme {
        name: "retro",
        snake_color: Rgb::new(0xff, 0xff, 0x00),
        outline_color: Rgb::new(0xff, 0x80, 0x00),
        outline_width: 1,
        background_color: Rgb::new(0x00, 0x80, 0x00),
    },
    Theme {
        name: "dark",
        snake_color: Rgb::new(0xff, 0xff, 0xff),
        outline_color: Rgb::new(0x88, 0x88, 0x88),
        outline_width: 2,
        background_color: Rgb::new(0x00, 0x00, 0x00),
    },
    Theme {
        name: "sunset",
        snake_color: Rgb::new(0xff, 0x6b, 0x35),
        outline_color: Rgb::new(0xd6, 0x30, 0x31),
        outline_width: 2,
        background_color: Rgb::new(0x2d, 0x34, 0x36),
    },
];

pub fn theme(name: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.name.eq_ignore_ascii_case(name))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub snake_color: Rgb,
    pub outline_color: Rgb,
    pub outline_width: u32,
    pub background_color: Rgb,
    pub food_size: u32,
    pub grid_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let classic = &THEMES[0];
        Settings {
            snake_color: classic.snake_color,
            outline_color: classic.outline_color,
            outline_width: classic.outline_width,
            background_color: classic.background_color,
            food_size: 30,
            grid_size: 25,
        }
    }
}

/// The subset of fields an imported file may override. Grid size is not
/// imported; it only changes through an explicit resize.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SettingsPatch {
    snake_color: Option<Rgb>,
    outline_color: Option<Rgb>,
    outline_width: Option<u32>,
    background_color: Option<Rgb>,
    food_size: Option<u32>,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !GRID_SIZE_RANGE.contains(&self.grid_size) {
            return Err(SettingsError::GridSizeOutOfRange(self.grid_size));
        }
        if !OUTLINE_WIDTH_RANGE.contains(&self.outline_width) {
            return Err(SettingsError::OutlineWidthOutOfRange(self.outline_width));
        }
        if !FOOD_SIZE_RANGE.contains(&self.food_size) {
            return Err(SettingsError::FoodSizeOutOfRange(self.food_size));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Loads settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Settings::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, self.export()?)?;
        Ok(())
    }

    pub fn export(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Applies the fields present in `json`. Nothing changes unless the whole
    /// result is valid.
    pub fn import(&mut self, json: &str) -> Result<(), SettingsError> {
        let patch: SettingsPatch = serde_json::from_str(json)?;
        let mut candidate = self.clone();
        if let Some(color) = patch.snake_color {
            candidate.snake_color = color;
        }
        if let Some(color) = patch.outline_color {
            candidate.outline_color = color;
        }
        if let Some(width) = patch.outline_width {
            candidate.outline_width = width;
        }
        if let Some(color) = patch.background_color {
            candidate.background_color = color;
        }
        if let Some(size) = patch.food_size {
            candidate.food_size = size;
        }
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    pub fn apply_theme(&mut self, name: &str) -> Result<(), SettingsError> {
        let theme = theme(name).ok_or_else(|| SettingsError::UnknownTheme(name.to_string()))?;
        self.snake_color = theme.snake_color;
        self.outline_color = theme.outline_color;
        self.outline_width = theme.outline_width;
        self.background_color = theme.background_color;
        Ok(())
    }

    /// Restores the default look but keeps the current grid size.
    pub fn reset_to_defaults(&mut self) {
        *self = Settings {
            grid_size: self.grid_size,
            ..Settings::default()
        };
    }

    pub fn set_grid_size(&mut self, size: u32) -> Result<(), SettingsError> {
        if !GRID_SIZE_RANGE.contains(&size) {
            return Err(SettingsError::GridSizeOutOfRange(size));
        }
        self.grid_size = size;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_rgb_parse_and_display() {
        let rgb: Rgb = "#4CAF50".parse().unwrap();
        assert_eq!(rgb, Rgb::new(0x4c, 0xaf, 0x50));
        assert_eq!(rgb.to_string(), "#4caf50");

        assert!("4caf50".parse::<Rgb>().is_err());
        assert!("#4caf5".parse::<Rgb>().is_err());
        assert!("#4caf5g".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_rgb_adjust_saturates() {
        let rgb = Rgb::new(10, 128, 250);
        assert_eq!(rgb.adjust(50), Rgb::new(60, 178, 255));
        assert_eq!(rgb.adjust(-50), Rgb::new(0, 78, 200));
        assert_eq!(rgb.complement(), Rgb::new(245, 127, 5));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.snake_color.to_string(), "#4caf50");
        assert_eq!(settings.outline_color.to_string(), "#2e7d32");
        assert_eq!(settings.background_color.to_string(), "#1a1a1a");
        assert_eq!(settings.outline_width, 2);
        assert_eq!(settings.food_size, 30);
        assert_eq!(settings.grid_size, 25);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_camel_case_keys_and_missing_fields() {
        let settings =
            Settings::from_json(r##"{"snakeColor": "#ffffff", "gridSize": 30}"##).unwrap();
        assert_eq!(settings.snake_color, Rgb::new(255, 255, 255));
        assert_eq!(settings.grid_size, 30);
        assert_eq!(settings.outline_width, 2);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{"gridSize": 2}"#),
            Err(SettingsError::GridSizeOutOfRange(2))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"outlineWidth": 11}"#),
            Err(SettingsError::OutlineWidthOutOfRange(11))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"foodSize": 1}"#),
            Err(SettingsError::FoodSizeOutOfRange(1))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"snakeColor": "green"}"#),
            Err(SettingsError::Json(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_import_applies_present_fields() {
        let mut settings = Settings::default();
        settings
            .import(r##"{"outlineColor": "#000000", "outlineWidth": 5, "gridSize": 40}"##)
            .unwrap();
        assert_eq!(settings.outline_color, Rgb::new(0, 0, 0));
        assert_eq!(settings.outline_width, 5);
        assert_eq!(settings.snake_color, Settings::default().snake_color);
        assert_eq!(settings.grid_size, 25);
    }

    #[test]
    fn test_failed_import_leaves_settings_unchanged() {
        let mut settings = Settings::default();
        let before = settings.clone();

        let err = settings.import(r##"{"snakeColor": "#123456", "outlineWidth": 99}"##);
        assert!(matches!(err, Err(SettingsError::OutlineWidthOutOfRange(99))));
        assert_eq!(settings, before);

        assert!(settings.import("{").is_err());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_themes() {
        let mut settings = Settings::default();
        settings.apply_theme("Neon").unwrap();
        assert_eq!(settings.snake_color.to_string(), "#00ffff");
        assert_eq!(settings.outline_width, 3);
        assert_eq!(settings.background_color.to_string(), "#000020");

        assert!(matches!(
            settings.apply_theme("vaporwave"),
            Err(SettingsError::UnknownTheme(_))
        ));
        assert_eq!(settings.snake_color.to_string(), "#00ffff");

        for theme in &THEMES {
            assert!(OUTLINE_WIDTH_RANGE.contains(&theme.outline_width));
        }
    }

    #[test]
    fn test_reset_keeps_grid_size() {
        let mut settings = Settings::default();
        settings.set_grid_size(40).unwrap();
        settings.apply_theme("retro").unwrap();
        settings.reset_to_defaults();
        assert_eq!(settings.grid_size, 40);
        assert_eq!(settings.snake_color, Settings::default().snake_color);
    }

    #[test]
    fn test_set_grid_size_bounds() {
        let mut settings = Settings::default();
        assert!(settings.set_grid_size(4).is_err());
        assert!(settings.set_grid_size(61).is_err());
        assert_eq!(settings.grid_size, 25);
        settings.set_grid_size(60).unwrap();
        assert_eq!(settings.grid_size, 60);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = Settings::default();
        settings.apply_theme("sunset").unwrap();
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_default_on_missing_or_bad_file() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(Settings::load_or_default(&missing), Settings::default());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, r#"{"gridSize": 1000}"#).unwrap();
        assert_eq!(Settings::load_or_default(&bad), Settings::default());
    }
}

use std::io;
use thiserror::Error;

/// Errors raised when building a playfield.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    #[error("grid size must be at least 1 cell")]
    ZeroSize,
    #[error("canvas must be larger than zero, got {width}x{height}")]
    CanvasTooSmall { width: f32, height: f32 },
}

/// Errors raised while loading, importing or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file could not be accessed: {0}")]
    Io(#[from] io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidColor(#[from] ColorError),
    #[error("grid size {0} is outside {min}..={max}", min = crate::settings::GRID_SIZE_RANGE.start(), max = crate::settings::GRID_SIZE_RANGE.end())]
    GridSizeOutOfRange(u32),
    #[error("outline width {0} is outside {min}..={max}", min = crate::settings::OUTLINE_WIDTH_RANGE.start(), max = crate::settings::OUTLINE_WIDTH_RANGE.end())]
    OutlineWidthOutOfRange(u32),
    #[error("food size {0} is outside {min}..={max}", min = crate::settings::FOOD_SIZE_RANGE.start(), max = crate::settings::FOOD_SIZE_RANGE.end())]
    FoodSizeOutOfRange(u32),
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),
}

#[derive(Debug, Error, PartialEq)]
#[error("not a #rrggbb colour: {0:?}")]
pub struct ColorError(pub String);

/// Errors from a high score store.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file could not be accessed: {0}")]
    Io(#[from] io::Error),
    #[error("high score file does not hold a number: {0:?}")]
    Parse(String),
}

//! Run and layout settings, optionally read from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

/// Settings shared by deck generation and rendering. Lengths are millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub image_dir: PathBuf,
    pub output: PathBuf,
    /// Edge of a square card, or diameter of a round one.
    pub card_size_mm: f32,
    /// Gap between cards and around the page edge.
    pub margin_mm: f32,
    /// Distance kept between the card outline and its symbols.
    pub inset_mm: f32,
    /// Resolution used when rasterising symbols and raster pages.
    pub dpi: u32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("./img"),
            output: PathBuf::from("dobble_cards.pdf"),
            card_size_mm: 55.0,
            margin_mm: 5.0,
            inset_mm: 5.0,
            dpi: 96,
            min_scale: 0.7,
            max_scale: 1.0,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let config: Config = serde_json::from_str(&raw).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(Error::Configuration(msg));
        if !(self.card_size_mm > 0.0) {
            return invalid(format!("card size must be positive (got {})", self.card_size_mm));
        }
        if self.margin_mm < 0.0 || self.inset_mm < 0.0 {
            return invalid("margin and inset must not be negative".to_string());
        }
        if self.inset_mm * 2.0 >= self.card_size_mm {
            return invalid(format!(
                "inset {}mm leaves no room on a {}mm card",
                self.inset_mm, self.card_size_mm
            ));
        }
        if self.dpi == 0 {
            return invalid("dpi must be positive".to_string());
        }
        let scale_ok = |s: f32| s > 0.0 && s <= 1.0;
        if !scale_ok(self.min_scale) || !scale_ok(self.max_scale) || self.min_scale > self.max_scale
        {
            return invalid(format!(
                "scale range must satisfy 0 < min <= max <= 1 (got {}..{})",
                self.min_scale, self.max_scale
            ));
        }
        Ok(())
    }

    /// Pixels per millimetre at the configured resolution.
    pub fn px_per_mm(&self) -> f32 {
        self.dpi as f32 / 25.4
    }
}

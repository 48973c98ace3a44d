//! Page-level settings for one composition

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::format::{resolve_geometry, FormatGeometry, GeometryError, PageFormat};

pub const COLS_RANGE: RangeInclusive<u32> = 1..=4;
pub const ROWS_RANGE: RangeInclusive<u32> = 1..=20;
pub const PADDING_RANGE: RangeInclusive<u32> = 0..=80;
pub const GAP_RANGE: RangeInclusive<u32> = 0..=40;
pub const CUSTOM_SIZE_RANGE: RangeInclusive<u32> = 1..=u32::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageConfig {
    pub title: String,
    pub show_title: bool,
    pub format: PageFormat,
    pub cols: u32,
    pub rows: u32,
    pub padding_h: u32,
    pub padding_v: u32,
    pub gap: u32,
    pub color_title: String,
    pub color_product_name: String,
    pub color_price: String,
    pub gradient_start: String,
    pub gradient_end: String,
    /// Only read when `format` is `Custom`
    pub custom_width: u32,
    pub custom_height: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "My Awesome Menu".to_string(),
            show_title: true,
            format: PageFormat::A4,
            cols: 3,
            rows: 4,
            padding_h: 20,
            padding_v: 20,
            gap: 10,
            color_title: "#1e293b".to_string(),
            color_product_name: "#000000".to_string(),
            color_price: "#000000".to_string(),
            gradient_start: "#ffffff".to_string(),
            gradient_end: "#ffffff".to_string(),
            custom_width: 1080,
            custom_height: 1080,
        }
    }
}

impl PageConfig {
    pub fn slot_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn geometry(&self) -> Result<FormatGeometry, GeometryError> {
        resolve_geometry(self.format, self.custom_width, self.custom_height)
    }
}

/// Clamp raw user input into an inclusive range.
pub fn clamp_input(value: i64, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(i64::from(*range.start()), i64::from(*range.end())) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PageConfig::default();
        assert_eq!(config.slot_count(), 12);
        assert_eq!(config.geometry().unwrap().aspect_ratio, "210/297");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PageConfig = serde_json::from_str(r#"{"cols": 2, "format": "TV"}"#).unwrap();
        assert_eq!(config.cols, 2);
        assert_eq!(config.rows, 4);
        assert_eq!(config.format, PageFormat::Tv);
    }

    #[test]
    fn test_clamp_input() {
        assert_eq!(clamp_input(0, &COLS_RANGE), 1);
        assert_eq!(clamp_input(9, &COLS_RANGE), 4);
        assert_eq!(clamp_input(-3, &GAP_RANGE), 0);
        assert_eq!(clamp_input(12, &ROWS_RANGE), 12);
    }
}

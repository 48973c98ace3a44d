//! Page Formats
//!
//! Maps a format identifier to an aspect ratio and a nominal preview width.
//! Custom pages derive their ratio from explicit dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PORTRAIT_WIDTH: u32 = 450;
pub const LANDSCAPE_WIDTH: u32 = 600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Invalid geometry: custom size must be positive, got {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    #[error("Unknown page format: {0}")]
    UnknownFormat(String),
}

/// Stable format vocabulary. Legacy French labels are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageFormat {
    #[default]
    #[serde(rename = "A4")]
    A4,
    #[serde(rename = "A4_LAND")]
    A4Landscape,
    #[serde(rename = "TV")]
    Tv,
    #[serde(rename = "Tablet", alias = "Tablette")]
    Tablet,
    #[serde(rename = "Custom", alias = "Personalisé")]
    Custom,
}

impl PageFormat {
    pub const ALL: [PageFormat; 5] = [
        PageFormat::A4,
        PageFormat::A4Landscape,
        PageFormat::Tv,
        PageFormat::Tablet,
        PageFormat::Custom,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PageFormat::A4 => "A4",
            PageFormat::A4Landscape => "A4_LAND",
            PageFormat::Tv => "TV",
            PageFormat::Tablet => "Tablet",
            PageFormat::Custom => "Custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PageFormat::A4 => "A4 (Portrait)",
            PageFormat::A4Landscape => "A4 (Landscape)",
            PageFormat::Tv => "TV (16:9)",
            PageFormat::Tablet => "Tablet (3:4)",
            PageFormat::Custom => "Custom",
        }
    }

    /// Fixed ratio for built-in formats, `None` for custom
    fn fixed_ratio(self) -> Option<(u32, u32)> {
        match self {
            PageFormat::A4 => Some((210, 297)),
            PageFormat::A4Landscape => Some((297, 210)),
            PageFormat::Tv => Some((16, 9)),
            PageFormat::Tablet => Some((3, 4)),
            PageFormat::Custom => None,
        }
    }

    fn nominal_width(self) -> u32 {
        match self {
            PageFormat::A4Landscape | PageFormat::Tv => LANDSCAPE_WIDTH,
            PageFormat::A4 | PageFormat::Tablet | PageFormat::Custom => PORTRAIT_WIDTH,
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PageFormat {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A4" => Ok(PageFormat::A4),
            "A4_LAND" => Ok(PageFormat::A4Landscape),
            "TV" => Ok(PageFormat::Tv),
            "Tablet" | "Tablette" => Ok(PageFormat::Tablet),
            "Custom" | "Personalisé" => Ok(PageFormat::Custom),
            other => Err(GeometryError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatGeometry {
    pub format: PageFormat,
    /// CSS-style `w/h` ratio, e.g. `210/297`
    pub aspect_ratio: String,
    pub ratio_width: u32,
    pub ratio_height: u32,
    pub nominal_width: u32,
}

impl FormatGeometry {
    pub fn ratio(&self) -> f64 {
        self.ratio_width as f64 / self.ratio_height as f64
    }

    pub fn nominal_height(&self) -> f64 {
        self.nominal_width as f64 / self.ratio()
    }
}

/// Resolve geometry for a format. Custom dimensions are ignored for
/// built-in formats.
pub fn resolve_geometry(
    format: PageFormat,
    custom_width: u32,
    custom_height: u32,
) -> Result<FormatGeometry, GeometryError> {
    let (w, h) = match format.fixed_ratio() {
        Some(ratio) => ratio,
        None => {
            if custom_width == 0 || custom_height == 0 {
                return Err(GeometryError::InvalidGeometry {
                    width: custom_width,
                    height: custom_height,
                });
            }
            (custom_width, custom_height)
        }
    };

    Ok(FormatGeometry {
        format,
        aspect_ratio: format!("{}/{}", w, h),
        ratio_width: w,
        ratio_height: h,
        nominal_width: format.nominal_width(),
    })
}

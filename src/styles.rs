//! Card Style Variants - Fixed Rendering Recipes
//!
//! The set is closed. Adding a variant means adding an arm everywhere
//! the compiler asks for one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown style variant: {0}")]
pub struct UnknownStyle(pub String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleVariant {
    #[default]
    WhiteClean,
    TopOverlay,
    FullOverlay,
    SolidBg,
    SplitHoriz,
    CardClassic,
    MinimalRow,
    PhotoEmphasis,
    RoundedPremium,
}

/// Where the text block sits relative to the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPlacement {
    Below,
    Overlay,
    Beside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageShape {
    Rect,
    Rounded,
    Square,
    Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Surface {
    White,
    Muted,
    Dark,
    /// No card fill; the image covers the whole card
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    /// Floating panel straddling the image edge
    Panel,
    /// Bottom-up dark gradient under the text
    Scrim,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecipe {
    pub style: StyleVariant,
    /// Share of the card's main axis taken by the image
    pub image_fraction: f32,
    pub image_shape: ImageShape,
    pub text_placement: TextPlacement,
    pub overlay: Option<OverlayKind>,
    pub surface: Surface,
    pub shows_category: bool,
}

impl StyleVariant {
    pub const ALL: [StyleVariant; 9] = [
        StyleVariant::WhiteClean,
        StyleVariant::TopOverlay,
        StyleVariant::FullOverlay,
        StyleVariant::SolidBg,
        StyleVariant::SplitHoriz,
        StyleVariant::CardClassic,
        StyleVariant::MinimalRow,
        StyleVariant::PhotoEmphasis,
        StyleVariant::RoundedPremium,
    ];

    pub fn id(self) -> &'static str {
        match self {
            StyleVariant::WhiteClean => "white-clean",
            StyleVariant::TopOverlay => "top-overlay",
            StyleVariant::FullOverlay => "full-overlay",
            StyleVariant::SolidBg => "solid-bg",
            StyleVariant::SplitHoriz => "split-horiz",
            StyleVariant::CardClassic => "card-classic",
            StyleVariant::MinimalRow => "minimal-row",
            StyleVariant::PhotoEmphasis => "photo-emphasis",
            StyleVariant::RoundedPremium => "rounded-premium",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleVariant::WhiteClean => "White Clean",
            StyleVariant::TopOverlay => "Top Overlay",
            StyleVariant::FullOverlay => "Full Overlay",
            StyleVariant::SolidBg => "Solid Background",
            StyleVariant::SplitHoriz => "Split Horizontal",
            StyleVariant::CardClassic => "Card Classic",
            StyleVariant::MinimalRow => "Minimal Row",
            StyleVariant::PhotoEmphasis => "Photo Emphasis",
            StyleVariant::RoundedPremium => "Rounded Premium",
        }
    }

    pub fn recipe(self) -> StyleRecipe {
        use ImageShape::*;
        use TextPlacement::*;

        let (image_fraction, image_shape, text_placement, overlay, surface) = match self {
            StyleVariant::WhiteClean => (2.0 / 3.0, Rect, Below, None, Surface::White),
            StyleVariant::TopOverlay => (0.5, Rect, Overlay, Some(OverlayKind::Panel), Surface::Muted),
            StyleVariant::FullOverlay => (1.0, Rect, Overlay, Some(OverlayKind::Scrim), Surface::Image),
            StyleVariant::SolidBg => (0.3, Circle, Below, None, Surface::Dark),
            StyleVariant::SplitHoriz => (0.4, Rect, Beside, None, Surface::White),
            StyleVariant::CardClassic => (1.0 / 3.0, Square, Beside, None, Surface::White),
            StyleVariant::MinimalRow => (0.2, Circle, Beside, None, Surface::White),
            StyleVariant::PhotoEmphasis => (0.8, Rect, Below, None, Surface::White),
            StyleVariant::RoundedPremium => (0.75, Rounded, Below, None, Surface::Muted),
        };

        StyleRecipe {
            style: self,
            image_fraction,
            image_shape,
            text_placement,
            overlay,
            surface,
            shows_category: matches!(self, StyleVariant::WhiteClean | StyleVariant::SplitHoriz),
        }
    }
}

impl fmt::Display for StyleVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for StyleVariant {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StyleVariant::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| UnknownStyle(s.to_string()))
    }
}

/// All recipes, in picker order
pub fn list_recipes() -> Vec<StyleRecipe> {
    StyleVariant::ALL.iter().map(|v| v.recipe()).collect()
}

//! Card Rendering - (style, product, mode, colors) to a visual card
//!
//! Output depends only on the arguments. The page preview re-renders every
//! slot on each configuration change and relies on that.

use serde::Serialize;
use tracing::warn;

use crate::catalog::{Product, ProductId};
use crate::format::{FormatGeometry, GeometryError};
use crate::grid::{DisplayMode, Placement, Slot};
use crate::page::PageConfig;
use crate::pricing::{resolve_price, PriceOverride};
use crate::styles::{ImageShape, StyleVariant, Surface, TextPlacement};

/// Fixed text colors for dark and photo surfaces
pub const LIGHT_TEXT: &str = "#ffffff";
pub const ACCENT_PRICE: &str = "#34d399";
pub const MUTED_CATEGORY: &str = "#94a3b8";
pub const TAG_CATEGORY: &str = "#3b82f6";
pub const BACKGROUND_ANGLE: u16 = 135;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextColors {
    pub product_name: String,
    pub price: String,
}

impl TextColors {
    pub fn from_config(config: &PageConfig) -> Self {
        Self {
            product_name: config.color_product_name.clone(),
            price: config.color_price.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ImageSource {
    Picture { url: String, mode: DisplayMode },
    /// Neutral glyph shown when the product has no image at all
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRegion {
    pub source: ImageSource,
    pub shape: ImageShape,
    pub fraction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextRole {
    Name,
    Category,
    Price,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub role: TextRole,
    pub text: String,
    pub color: String,
    pub single_line: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Start,
    Center,
    SpaceBetween,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRegion {
    pub placement: TextPlacement,
    pub align: TextAlign,
    pub lines: Vec<TextLine>,
}

/// Card layers, back to front
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", content = "content", rename_all = "kebab-case")]
pub enum Layer {
    Image(ImageRegion),
    Scrim,
    Panel(TextRegion),
    Text(TextRegion),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardVisual {
    pub style: StyleVariant,
    pub surface: Surface,
    pub layers: Vec<Layer>,
}

impl CardVisual {
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.layers.iter().flat_map(|layer| match layer {
            Layer::Panel(region) | Layer::Text(region) => region.lines.as_slice(),
            Layer::Image(_) | Layer::Scrim => &[][..],
        })
    }

    pub fn line(&self, role: TextRole) -> Option<&TextLine> {
        self.text_lines().find(|l| l.role == role)
    }

    pub fn image(&self) -> Option<&ImageRegion> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::Image(region) => Some(region),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "card", rename_all = "kebab-case")]
pub enum VisualComposition {
    Empty,
    Card(CardVisual),
}

impl VisualComposition {
    pub fn is_empty(&self) -> bool {
        matches!(self, VisualComposition::Empty)
    }

    pub fn card(&self) -> Option<&CardVisual> {
        match self {
            VisualComposition::Card(card) => Some(card),
            VisualComposition::Empty => None,
        }
    }
}

/// Pick the requested image, else whichever one exists, else a placeholder.
pub fn select_image(product: &Product, mode: DisplayMode) -> ImageSource {
    let isolated = product
        .image_isolated
        .as_ref()
        .map(|url| (url, DisplayMode::Isolated));
    let lifestyle = product
        .image_lifestyle
        .as_ref()
        .map(|url| (url, DisplayMode::Lifestyle));

    let preferred = match mode {
        DisplayMode::Isolated => isolated.or(lifestyle),
        DisplayMode::Lifestyle => lifestyle.or(isolated),
    };

    match preferred {
        Some((url, mode)) => ImageSource::Picture { url: url.clone(), mode },
        None => ImageSource::Placeholder,
    }
}

struct CardInput<'a> {
    product: &'a Product,
    image: ImageSource,
    price: String,
    colors: &'a TextColors,
}

impl CardInput<'_> {
    fn image_layer(&self, style: StyleVariant) -> Layer {
        let recipe = style.recipe();
        Layer::Image(ImageRegion {
            source: self.image.clone(),
            shape: recipe.image_shape,
            fraction: recipe.image_fraction,
        })
    }

    fn name(&self) -> TextLine {
        self.name_in(&self.colors.product_name)
    }

    fn name_in(&self, color: &str) -> TextLine {
        line(TextRole::Name, &self.product.name, color)
    }

    fn price(&self) -> TextLine {
        self.price_in(&self.colors.price)
    }

    fn price_in(&self, color: &str) -> TextLine {
        line(TextRole::Price, &self.price, color)
    }

    fn category(&self, color: &str) -> TextLine {
        line(TextRole::Category, &self.product.category, color)
    }
}

fn line(role: TextRole, text: &str, color: &str) -> TextLine {
    TextLine {
        role,
        text: text.to_string(),
        color: color.to_string(),
        single_line: true,
    }
}

fn region(placement: TextPlacement, align: TextAlign, lines: Vec<TextLine>) -> TextRegion {
    TextRegion { placement, align, lines }
}

fn card(style: StyleVariant, layers: Vec<Layer>) -> CardVisual {
    CardVisual { style, surface: style.recipe().surface, layers }
}

fn white_clean(input: &CardInput) -> CardVisual {
    let style = StyleVariant::WhiteClean;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(
            TextPlacement::Below,
            TextAlign::Start,
            vec![input.name(), input.category(MUTED_CATEGORY), input.price()],
        )),
    ])
}

fn top_overlay(input: &CardInput) -> CardVisual {
    let style = StyleVariant::TopOverlay;
    card(style, vec![
        input.image_layer(style),
        Layer::Panel(region(TextPlacement::Overlay, TextAlign::Center, vec![input.name()])),
        Layer::Text(region(TextPlacement::Below, TextAlign::Center, vec![input.price()])),
    ])
}

fn full_overlay(input: &CardInput) -> CardVisual {
    let style = StyleVariant::FullOverlay;
    card(style, vec![
        input.image_layer(style),
        Layer::Scrim,
        Layer::Text(region(
            TextPlacement::Overlay,
            TextAlign::Start,
            vec![input.name_in(LIGHT_TEXT), input.price_in(ACCENT_PRICE)],
        )),
    ])
}

fn solid_bg(input: &CardInput) -> CardVisual {
    let style = StyleVariant::SolidBg;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(
            TextPlacement::Below,
            TextAlign::Center,
            vec![input.name_in(LIGHT_TEXT), input.price_in(ACCENT_PRICE)],
        )),
    ])
}

fn split_horiz(input: &CardInput) -> CardVisual {
    let style = StyleVariant::SplitHoriz;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(
            TextPlacement::Beside,
            TextAlign::Start,
            vec![input.category(TAG_CATEGORY), input.name(), input.price()],
        )),
    ])
}

fn card_classic(input: &CardInput) -> CardVisual {
    let style = StyleVariant::CardClassic;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(TextPlacement::Beside, TextAlign::Start, vec![input.name(), input.price()])),
    ])
}

fn minimal_row(input: &CardInput) -> CardVisual {
    let style = StyleVariant::MinimalRow;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(TextPlacement::Beside, TextAlign::Start, vec![input.name(), input.price()])),
    ])
}

fn photo_emphasis(input: &CardInput) -> CardVisual {
    let style = StyleVariant::PhotoEmphasis;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(
            TextPlacement::Below,
            TextAlign::SpaceBetween,
            vec![input.name(), input.price()],
        )),
    ])
}

fn rounded_premium(input: &CardInput) -> CardVisual {
    let style = StyleVariant::RoundedPremium;
    card(style, vec![
        input.image_layer(style),
        Layer::Text(region(
            TextPlacement::Below,
            TextAlign::SpaceBetween,
            vec![input.name(), input.price()],
        )),
    ])
}

/// Render one card. A missing product renders as `Empty`.
pub fn render(
    style: StyleVariant,
    product: Option<&Product>,
    mode: DisplayMode,
    colors: &TextColors,
    price_override: Option<&PriceOverride>,
) -> VisualComposition {
    let Some(product) = product else {
        return VisualComposition::Empty;
    };

    let input = CardInput {
        product,
        image: select_image(product, mode),
        price: resolve_price(product, price_override),
        colors,
    };

    let card = match style {
        StyleVariant::WhiteClean => white_clean(&input),
        StyleVariant::TopOverlay => top_overlay(&input),
        StyleVariant::FullOverlay => full_overlay(&input),
        StyleVariant::SolidBg => solid_bg(&input),
        StyleVariant::SplitHoriz => split_horiz(&input),
        StyleVariant::CardClassic => card_classic(&input),
        StyleVariant::MinimalRow => minimal_row(&input),
        StyleVariant::PhotoEmphasis => photo_emphasis(&input),
        StyleVariant::RoundedPremium => rounded_premium(&input),
    };
    VisualComposition::Card(card)
}

pub fn find_product(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Render a slot's placement, tolerating products deleted since placement.
pub fn render_placement(
    placement: &Placement,
    products: &[Product],
    colors: &TextColors,
) -> VisualComposition {
    let product = find_product(products, placement.product_id);
    if product.is_none() {
        warn!(product_id = placement.product_id, "dangling placement rendered empty");
    }
    render(
        placement.style,
        product,
        placement.display_mode,
        colors,
        placement.price_override.as_ref(),
    )
}

pub fn render_slot(slot: &Slot, products: &[Product], colors: &TextColors) -> VisualComposition {
    match slot {
        Some(placement) => render_placement(placement, products, colors),
        None => VisualComposition::Empty,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    pub angle: u16,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleBlock {
    pub text: String,
    pub color: String,
}

/// The whole page as drawn by the preview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComposition {
    pub geometry: FormatGeometry,
    pub background: Background,
    pub padding_h: u32,
    pub padding_v: u32,
    pub gap: u32,
    pub title: Option<TitleBlock>,
    pub cols: u32,
    pub rows: u32,
    pub cells: Vec<VisualComposition>,
}

pub fn compose_page(
    config: &PageConfig,
    slots: &[Slot],
    products: &[Product],
) -> Result<PageComposition, GeometryError> {
    let geometry = config.geometry()?;
    let colors = TextColors::from_config(config);

    Ok(PageComposition {
        geometry,
        background: Background {
            angle: BACKGROUND_ANGLE,
            start: config.gradient_start.clone(),
            end: config.gradient_end.clone(),
        },
        padding_h: config.padding_h,
        padding_v: config.padding_v,
        gap: config.gap,
        title: config.show_title.then(|| TitleBlock {
            text: config.title.clone(),
            color: config.color_title.clone(),
        }),
        cols: config.cols,
        rows: config.rows,
        cells: slots.iter().map(|s| render_slot(s, products, &colors)).collect(),
    })
}

//! Composition Session - Editing Controller
//!
//! Owns the page configuration, the slot grid and the catalog snapshot for
//! one editing session. Two modes: configuring the page, or picking the
//! content of one selected slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::catalog::{fetch_catalog, CatalogError, CatalogSnapshot, CatalogStore, Category, Product, ProductId};
use crate::format::{FormatGeometry, GeometryError, PageFormat};
use crate::grid::{DisplayMode, GridError, Placement, PlacementGrid, Slot};
use crate::page::{
    clamp_input, PageConfig, COLS_RANGE, CUSTOM_SIZE_RANGE, GAP_RANGE, PADDING_RANGE, ROWS_RANGE,
};
use crate::pricing::{price_blocks, resolve_price, PriceBlock};
use crate::render::{compose_page, render_slot, PageComposition, TextColors, VisualComposition};
use crate::styles::StyleVariant;
use crate::validation::{ValidationResult, Validator};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No slot is selected")]
    NoActiveSelection,

    #[error("Product not found in catalog: {0}")]
    UnknownProduct(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "slot", rename_all = "lowercase")]
pub enum EditorMode {
    Configuring,
    Selecting(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientStop {
    Start,
    End,
}

/// Picker choices. Style and mode persist between selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerState {
    pub style: StyleVariant,
    pub display_mode: DisplayMode,
    pub search: String,
}

/// A product row in the picker with its size/price buttons
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerEntry<'a> {
    pub product: &'a Product,
    pub price_blocks: Vec<PriceBlock>,
}

/// Input for composing a page in one shot (CLI, previews)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeRequest {
    #[serde(default)]
    pub config: PageConfig,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeOutcome {
    pub validation: ValidationResult,
    pub page: Option<PageComposition>,
    pub dangling_slots: Vec<usize>,
}

/// Validate a request, then compose it against the store's catalog.
///
/// The raw config is checked before any session or grid exists, so
/// out-of-range dimensions come back as a validation failure.
pub fn compose_request(
    request: &ComposeRequest,
    store: &dyn CatalogStore,
) -> Result<ComposeOutcome, SessionError> {
    let validation = Validator::new().validate(&request.config);
    if !validation.valid {
        debug!(violations = validation.violations.len(), "compose request rejected");
        return Ok(ComposeOutcome { validation, page: None, dangling_slots: vec![] });
    }

    let mut session = CompositionSession::from_request(request);
    session.refresh_catalog(store)?;
    let page = session.compose()?;
    Ok(ComposeOutcome { validation, page: Some(page), dangling_slots: session.dangling_slots() })
}

/// Pull grid dimensions and custom size back into their ranges.
fn clamp_config(mut config: PageConfig) -> PageConfig {
    config.cols = clamp_input(i64::from(config.cols), &COLS_RANGE);
    config.rows = clamp_input(i64::from(config.rows), &ROWS_RANGE);
    config.custom_width = clamp_input(i64::from(config.custom_width), &CUSTOM_SIZE_RANGE);
    config.custom_height = clamp_input(i64::from(config.custom_height), &CUSTOM_SIZE_RANGE);
    config
}

pub struct CompositionSession {
    id: Uuid,
    opened_at: DateTime<Utc>,
    config: PageConfig,
    grid: PlacementGrid,
    catalog: CatalogSnapshot,
    mode: EditorMode,
    picker: PickerState,
}

impl CompositionSession {
    pub fn new() -> Self {
        Self::with_config(PageConfig::default())
    }

    /// Open a session. Grid dimensions and custom size are clamped.
    pub fn with_config(config: PageConfig) -> Self {
        let config = clamp_config(config);
        let grid = PlacementGrid::new(config.cols, config.rows);
        let session = Self {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            config,
            grid,
            catalog: CatalogSnapshot::default(),
            mode: EditorMode::Configuring,
            picker: PickerState::default(),
        };
        info!(session = %session.id, "composition session opened");
        session
    }

    /// Rebuild a session from a request. Slots are reconciled to the grid.
    pub fn from_request(request: &ComposeRequest) -> Self {
        let mut session = Self::with_config(request.config.clone());
        let (cols, rows) = (session.config.cols, session.config.rows);
        session.grid = PlacementGrid::from_slots(cols, rows, &request.slots);
        session
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn slots(&self) -> &[Slot] {
        self.grid.slots()
    }

    pub fn grid(&self) -> &PlacementGrid {
        &self.grid
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn picker(&self) -> &PickerState {
        &self.picker
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn categories(&self) -> &[Category] {
        self.catalog.categories()
    }

    pub fn is_loading_products(&self) -> bool {
        self.catalog.is_loading()
    }

    pub fn validate(&self) -> ValidationResult {
        Validator::new().validate(&self.config)
    }

    // --- Page configuration ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    pub fn set_show_title(&mut self, show: bool) {
        self.config.show_title = show;
    }

    pub fn set_format(&mut self, format: PageFormat) {
        self.config.format = format;
    }

    pub fn set_custom_size(&mut self, width: i64, height: i64) {
        self.config.custom_width = clamp_input(width, &CUSTOM_SIZE_RANGE);
        self.config.custom_height = clamp_input(height, &CUSTOM_SIZE_RANGE);
    }

    pub fn set_cols(&mut self, cols: i64) {
        self.config.cols = clamp_input(cols, &COLS_RANGE);
        self.reconcile_grid();
    }

    pub fn set_rows(&mut self, rows: i64) {
        self.config.rows = clamp_input(rows, &ROWS_RANGE);
        self.reconcile_grid();
    }

    fn reconcile_grid(&mut self) {
        if self.grid.cols() != self.config.cols || self.grid.rows() != self.config.rows {
            self.grid.resize(self.config.cols, self.config.rows);
        }
        // A selection past the new end has nothing left to fill
        if let EditorMode::Selecting(slot) = self.mode {
            if slot >= self.grid.len() {
                self.cancel_selection();
            }
        }
    }

    pub fn set_padding(&mut self, horizontal: i64, vertical: i64) {
        self.config.padding_h = clamp_input(horizontal, &PADDING_RANGE);
        self.config.padding_v = clamp_input(vertical, &PADDING_RANGE);
    }

    /// Single slider driving both paddings
    pub fn set_uniform_padding(&mut self, padding: i64) {
        self.set_padding(padding, padding);
    }

    pub fn set_gap(&mut self, gap: i64) {
        self.config.gap = clamp_input(gap, &GAP_RANGE);
    }

    pub fn set_gradient(&mut self, stop: GradientStop, color: impl Into<String>) {
        match stop {
            GradientStop::Start => self.config.gradient_start = color.into(),
            GradientStop::End => self.config.gradient_end = color.into(),
        }
    }

    pub fn set_title_color(&mut self, color: impl Into<String>) {
        self.config.color_title = color.into();
    }

    pub fn set_product_name_color(&mut self, color: impl Into<String>) {
        self.config.color_product_name = color.into();
    }

    pub fn set_price_color(&mut self, color: impl Into<String>) {
        self.config.color_price = color.into();
    }

    // --- Slot selection ---

    pub fn select_slot(&mut self, index: usize) -> Result<(), SessionError> {
        self.grid.get(index)?;
        debug!(slot = index, "slot selected");
        self.mode = EditorMode::Selecting(index);
        Ok(())
    }

    pub fn cancel_selection(&mut self) {
        debug!("selection cancelled");
        self.mode = EditorMode::Configuring;
        self.picker.search.clear();
    }

    pub fn choose_style(&mut self, style: StyleVariant) {
        self.picker.style = style;
    }

    pub fn choose_display_mode(&mut self, mode: DisplayMode) {
        self.picker.display_mode = mode;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.picker.search = query.into();
    }

    /// Products matching the current search, each with its price buttons
    pub fn picker_entries(&self) -> Vec<PickerEntry<'_>> {
        self.catalog
            .search(&self.picker.search)
            .into_iter()
            .map(|product| PickerEntry { product, price_blocks: price_blocks(product) })
            .collect()
    }

    fn selected_slot(&self) -> Result<usize, SessionError> {
        match self.mode {
            EditorMode::Selecting(slot) => Ok(slot),
            EditorMode::Configuring => Err(SessionError::NoActiveSelection),
        }
    }

    /// Place a product with all of its prices shown
    pub fn assign_product(&mut self, product_id: ProductId) -> Result<(), SessionError> {
        self.assign(product_id, None)
    }

    /// Place a product with one size/price button's amount
    pub fn assign_product_with_price(
        &mut self,
        product_id: ProductId,
        block: &PriceBlock,
    ) -> Result<(), SessionError> {
        self.assign(product_id, Some(block))
    }

    fn assign(&mut self, product_id: ProductId, block: Option<&PriceBlock>) -> Result<(), SessionError> {
        let slot = self.selected_slot()?;
        if self.catalog.find(product_id).is_none() {
            return Err(SessionError::UnknownProduct(product_id));
        }

        let mut placement = Placement::new(product_id, self.picker.style, self.picker.display_mode);
        if let Some(block) = block {
            placement = placement.with_override(block.to_override());
        }
        self.grid.place(slot, placement)?;

        self.mode = EditorMode::Configuring;
        self.picker.search.clear();
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<(), SessionError> {
        self.grid.clear(index)?;
        Ok(())
    }

    // --- Catalog ---

    pub fn begin_catalog_load(&mut self) {
        self.catalog.begin_load();
    }

    pub fn finish_catalog_load(
        &mut self,
        result: Result<(Vec<Product>, Vec<Category>), CatalogError>,
    ) -> Result<(), SessionError> {
        self.catalog.finish_load(result)?;
        Ok(())
    }

    pub fn refresh_catalog(&mut self, store: &dyn CatalogStore) -> Result<(), SessionError> {
        self.begin_catalog_load();
        self.finish_catalog_load(fetch_catalog(store))
    }

    /// Occupied slots whose product is no longer in the catalog
    pub fn dangling_slots(&self) -> Vec<usize> {
        self.grid
            .occupied()
            .filter(|(_, p)| self.catalog.find(p.product_id).is_none())
            .map(|(i, _)| i)
            .collect()
    }

    // --- Derived views ---

    pub fn geometry(&self) -> Result<FormatGeometry, SessionError> {
        Ok(self.config.geometry()?)
    }

    pub fn slot_visual(&self, index: usize) -> Result<VisualComposition, SessionError> {
        self.grid.get(index)?;
        let colors = TextColors::from_config(&self.config);
        Ok(render_slot(&self.grid.slots()[index], self.catalog.products(), &colors))
    }

    /// Price text shown in a slot; `None` for empty or dangling slots
    pub fn slot_price_text(&self, index: usize) -> Result<Option<String>, SessionError> {
        let text = self.grid.get(index)?.and_then(|placement| {
            self.catalog
                .find(placement.product_id)
                .map(|product| resolve_price(product, placement.price_override.as_ref()))
        });
        Ok(text)
    }

    pub fn compose(&self) -> Result<PageComposition, SessionError> {
        Ok(compose_page(&self.config, self.grid.slots(), self.catalog.products())?)
    }

}

impl Default for CompositionSession {
    fn default() -> Self {
        Self::new()
    }
}

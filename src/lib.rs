//! Menu Composer Core - Grid, Pricing and Card Composition
//!
//! # Ground Rules
//! 1. Slots Are Linear Indices
//! 2. Explicit Slot Prices Win
//! 3. Style Variants Are a Closed Set
//! 4. Rendering Is Pure
//! 5. Dangling Products Render Empty, Never Fail
//! 6. The Session Owns All Editing State

pub mod catalog;
pub mod pricing;
pub mod format;
pub mod grid;
pub mod styles;
pub mod page;
pub mod render;
pub mod validation;
pub mod hashing;
pub mod session;

pub use catalog::{CatalogError, CatalogSnapshot, CatalogStore, Category, InMemoryCatalog, Product, ProductId};
pub use pricing::{price_blocks, resolve_price, PriceBlock, PriceOverride, SizeTier};
pub use format::{resolve_geometry, FormatGeometry, GeometryError, PageFormat};
pub use grid::{DisplayMode, GridError, Placement, PlacementGrid, Slot};
pub use styles::{StyleRecipe, StyleVariant};
pub use page::PageConfig;
pub use render::{compose_page, render, render_placement, PageComposition, TextColors, VisualComposition};
pub use validation::{ValidationResult, ValidationViolation, Validator, ViolationSeverity};
pub use hashing::composition_digest;
pub use session::{compose_request, ComposeOutcome, ComposeRequest, CompositionSession, EditorMode, SessionError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

//! Price Resolution
//!
//! Precedence: explicit slot override, then S/M/L tiers, then flat price,
//! then the `-€` placeholder.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;

pub const CURRENCY_SUFFIX: &str = "€";
pub const MISSING_PRICE: &str = "-€";

/// Explicit per-slot price choice (one of the size/price buttons)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOverride {
    pub amount: f64,
    #[serde(default)]
    pub size_label: Option<String>,
}

impl PriceOverride {
    pub fn new(amount: f64) -> Self {
        Self { amount, size_label: None }
    }

    pub fn sized(amount: f64, label: impl Into<String>) -> Self {
        Self { amount, size_label: Some(label.into()) }
    }

    fn label(&self) -> Option<&str> {
        self.size_label.as_deref().filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeTier {
    #[serde(rename = "S")]
    Small,
    #[serde(rename = "M")]
    Medium,
    #[serde(rename = "L")]
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    pub fn label(self) -> &'static str {
        match self {
            SizeTier::Small => "S",
            SizeTier::Medium => "M",
            SizeTier::Large => "L",
        }
    }

    fn price_of(self, product: &Product) -> Option<f64> {
        match self {
            SizeTier::Small => product.price_small,
            SizeTier::Medium => product.price_medium,
            SizeTier::Large => product.price_large,
        }
    }
}

/// A selectable size/price button offered for a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBlock {
    pub label: Option<SizeTier>,
    pub amount: f64,
}

impl PriceBlock {
    pub fn to_override(&self) -> PriceOverride {
        match self.label {
            Some(tier) => PriceOverride::sized(self.amount, tier.label()),
            None => PriceOverride::new(self.amount),
        }
    }
}

/// Format an amount the way it is printed on the menu (`10`, `9.5`).
pub fn format_amount(amount: f64) -> String {
    format!("{}{}", amount, CURRENCY_SUFFIX)
}

fn tiers(product: &Product) -> Vec<(SizeTier, f64)> {
    SizeTier::ALL
        .iter()
        .filter_map(|&tier| match tier.price_of(product) {
            Some(p) if p > 0.0 => Some((tier, p)),
            _ => None,
        })
        .collect()
}

fn flat_price(product: &Product) -> Option<f64> {
    product.price.filter(|p| *p != 0.0)
}

/// Resolve the price text shown for a product in a slot.
pub fn resolve_price(product: &Product, price_override: Option<&PriceOverride>) -> String {
    if let Some(ov) = price_override {
        return match ov.label() {
            Some(label) => format!("{} {}", label, format_amount(ov.amount)),
            None => format_amount(ov.amount),
        };
    }

    let sized = tiers(product);
    if !sized.is_empty() {
        return sized
            .iter()
            .map(|(tier, p)| format!("{} {}", tier.label(), format_amount(*p)))
            .collect::<Vec<_>>()
            .join(" ");
    }

    match flat_price(product) {
        Some(p) => format_amount(p),
        None => MISSING_PRICE.to_string(),
    }
}

/// Buttons offered in the product picker.
///
/// A flat price hides the tiers; otherwise one button per present tier.
pub fn price_blocks(product: &Product) -> Vec<PriceBlock> {
    if let Some(p) = flat_price(product) {
        return vec![PriceBlock { label: None, amount: p }];
    }
    tiers(product)
        .into_iter()
        .map(|(tier, amount)| PriceBlock { label: Some(tier), amount })
        .collect()
}

//! Page Validation - Rule/Policy Separation
//!
//! Rules produce structured violations.
//! Errors make a page invalid; warnings are reported only.

use serde::{Deserialize, Serialize};

use crate::format::PageFormat;
use crate::page::{PageConfig, COLS_RANGE, GAP_RANGE, PADDING_RANGE, ROWS_RANGE};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: ViolationSeverity,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.violations.iter().any(|v| v.severity == ViolationSeverity::Warning)
    }
}

pub trait ValidationRule {
    fn name(&self) -> &'static str;
    fn validate(&self, config: &PageConfig) -> Vec<ValidationViolation>;
}

fn range_violation(
    rule: &str,
    severity: ViolationSeverity,
    field: &str,
    value: u32,
    range: &std::ops::RangeInclusive<u32>,
) -> Option<ValidationViolation> {
    if range.contains(&value) {
        return None;
    }
    Some(ValidationViolation {
        rule: rule.to_string(),
        severity,
        message: format!("{} out of range", field),
        expected: Some(format!("{}..={}", range.start(), range.end())),
        actual: Some(value.to_string()),
    })
}

// --- Concrete Rules ---

pub struct GridBoundsRule;

impl ValidationRule for GridBoundsRule {
    fn name(&self) -> &'static str { "grid_bounds" }

    fn validate(&self, config: &PageConfig) -> Vec<ValidationViolation> {
        [
            range_violation(self.name(), ViolationSeverity::Error, "cols", config.cols, &COLS_RANGE),
            range_violation(self.name(), ViolationSeverity::Error, "rows", config.rows, &ROWS_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub struct SpacingRule;

impl ValidationRule for SpacingRule {
    fn name(&self) -> &'static str { "spacing" }

    fn validate(&self, config: &PageConfig) -> Vec<ValidationViolation> {
        let severity = || ViolationSeverity::Warning;
        [
            range_violation(self.name(), severity(), "paddingH", config.padding_h, &PADDING_RANGE),
            range_violation(self.name(), severity(), "paddingV", config.padding_v, &PADDING_RANGE),
            range_violation(self.name(), severity(), "gap", config.gap, &GAP_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

pub struct ColorRule;

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

impl ValidationRule for ColorRule {
    fn name(&self) -> &'static str { "colors" }

    fn validate(&self, config: &PageConfig) -> Vec<ValidationViolation> {
        let fields = [
            ("colorTitle", &config.color_title),
            ("colorProductName", &config.color_product_name),
            ("colorPrice", &config.color_price),
            ("gradientStart", &config.gradient_start),
            ("gradientEnd", &config.gradient_end),
        ];

        fields
            .iter()
            .filter(|(_, value)| !is_hex_color(value))
            .map(|(field, value)| ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Warning,
                message: format!("{} is not a hex color", field),
                expected: Some("#rrggbb".to_string()),
                actual: Some(value.to_string()),
            })
            .collect()
    }
}

pub struct CustomSizeRule;

impl ValidationRule for CustomSizeRule {
    fn name(&self) -> &'static str { "custom_size" }

    fn validate(&self, config: &PageConfig) -> Vec<ValidationViolation> {
        if config.format != PageFormat::Custom {
            return vec![];
        }
        if config.custom_width == 0 || config.custom_height == 0 {
            return vec![ValidationViolation {
                rule: self.name().to_string(),
                severity: ViolationSeverity::Error,
                message: "Custom page size must be positive".to_string(),
                expected: Some("width >= 1 and height >= 1".to_string()),
                actual: Some(format!("{}x{}", config.custom_width, config.custom_height)),
            }];
        }
        vec![]
    }
}

pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(GridBoundsRule),
                Box::new(SpacingRule),
                Box::new(ColorRule),
                Box::new(CustomSizeRule),
            ],
        }
    }

    pub fn validate(&self, config: &PageConfig) -> ValidationResult {
        let violations: Vec<_> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(config))
            .collect();

        let valid = !violations.iter().any(|v| v.severity == ViolationSeverity::Error);
        ValidationResult { valid, violations }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

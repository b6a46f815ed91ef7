//! Configuration for invoice-totals.

use crate::models::PercentBase;
use crate::services::DEFAULT_SPLIT_TOLERANCE;
use app_core::config::{load_layered, Config as CoreConfig};
use app_core::error::AppError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// Base name of the optional settings file in the working directory.
pub const CONFIG_FILE_NAME: &str = "invoice-totals";

#[derive(Debug, Clone, Deserialize)]
pub struct TotalsConfig {
    #[serde(flatten)]
    pub common: CoreConfig,
    #[serde(default)]
    pub calculator: CalculatorConfig,
}

/// Which discount rules the calculator applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub percent_base: PercentBase,
    #[serde(default)]
    pub cap_flat_discount: bool,
    #[serde(default = "default_split_tolerance")]
    pub split_tolerance: Decimal,
}

fn default_split_tolerance() -> Decimal {
    DEFAULT_SPLIT_TOLERANCE
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            percent_base: PercentBase::default(),
            cap_flat_discount: false,
            split_tolerance: default_split_tolerance(),
        }
    }
}

impl TotalsConfig {
    /// Load from `path` when given, else from `invoice-totals.*` if present,
    /// then apply `APP__*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        load_layered(CONFIG_FILE_NAME, path)
    }
}

//! # Checkout Configuration
//!
//! Knobs for the few checkout behaviors that are a policy decision rather
//! than arithmetic.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CHECKOUT_NULL_FULFILLMENT_TOTAL=propagate                          │
//! │     CHECKOUT_FALLBACK_CURRENCY=USD                                     │
//! │     CHECKOUT_RATE_DECIMALS=2                                           │
//! │                                                                         │
//! │  2. TOML Config File (path given by the caller)                        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [totals]
//! null_fulfillment_total = "treat_as_zero"  # treat_as_zero | propagate
//!
//! [currency]
//! fallback_code = "USD"
//!
//! [tax]
//! rate_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{CheckoutError, CheckoutResult};
use crate::rate::{PercentRateFormatter, DEFAULT_PERCENT_DECIMALS};

/// Upper bound for `tax.rate_decimals`.
pub const MAX_RATE_DECIMALS: usize = 10;

// =============================================================================
// Null Fulfillment Total
// =============================================================================

/// How a missing fulfillment total takes part in the grand total.
///
/// ## The Two Readings
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart: items 50.00, no shipping method selected yet                    │
/// │                                                                         │
/// │  TREAT_AS_ZERO (Default)            │  PROPAGATE                        │
/// │  ───────────────────────            │  ─────────                        │
/// │  total = 50 + 0 + tax + ...         │  total = 50 + null + ...          │
/// │        = 50.00                      │        = NaN (JSON null)          │
/// │                                     │                                   │
/// │  summary.fulfillmentTotal stays null in both cases.                     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullFulfillmentTotal {
    /// A null fulfillment total adds nothing.
    #[default]
    TreatAsZero,

    /// A null fulfillment total poisons the grand total.
    Propagate,
}

impl NullFulfillmentTotal {
    /// The value a null fulfillment total contributes to the grand total.
    #[inline]
    pub fn addend(&self) -> f64 {
        match self {
            NullFulfillmentTotal::TreatAsZero => 0.0,
            NullFulfillmentTotal::Propagate => f64::NAN,
        }
    }
}

impl std::fmt::Display for NullFulfillmentTotal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NullFulfillmentTotal::TreatAsZero => write!(f, "treat_as_zero"),
            NullFulfillmentTotal::Propagate => write!(f, "propagate"),
        }
    }
}

impl std::str::FromStr for NullFulfillmentTotal {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "treat_as_zero" | "zero" => Ok(NullFulfillmentTotal::TreatAsZero),
            "propagate" | "nan" => Ok(NullFulfillmentTotal::Propagate),
            other => Err(CheckoutError::InvalidConfig(format!(
                "Unknown null fulfillment total policy: '{}'. Valid options: treat_as_zero, propagate",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Grand total settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalsSettings {
    #[serde(default)]
    pub null_fulfillment_total: NullFulfillmentTotal,
}

/// Currency settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrencySettings {
    /// Used when a cart document has no `currencyCode`.
    #[serde(default)]
    pub fallback_code: Option<String>,
}

/// Effective tax rate display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxDisplaySettings {
    /// Decimals kept in `effectiveTaxRate.displayPercent`.
    #[serde(default = "default_rate_decimals")]
    pub rate_decimals: usize,
}

fn default_rate_decimals() -> usize {
    DEFAULT_PERCENT_DECIMALS
}

impl Default for TaxDisplaySettings {
    fn default() -> Self {
        TaxDisplaySettings {
            rate_decimals: default_rate_decimals(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub totals: TotalsSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub tax: TaxDisplaySettings,
}

impl CheckoutConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, when `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> CheckoutResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads the config file over the defaults, without environment
    /// overrides or validation. A missing file yields the defaults.
    pub fn from_file(config_path: Option<&Path>) -> CheckoutResult<Self> {
        let Some(path) = config_path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!(?path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        info!(?path, "Loading checkout config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to a TOML file.
    pub fn save(&self, config_path: &Path) -> CheckoutResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;

        info!(path = ?config_path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CheckoutResult<()> {
        if let Some(ref code) = self.currency.fallback_code {
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(CheckoutError::InvalidConfig(format!(
                    "Fallback currency must be a 3-letter uppercase ISO 4217 code, got: '{}'",
                    code
                )));
            }
        }

        if self.tax.rate_decimals > MAX_RATE_DECIMALS {
            return Err(CheckoutError::InvalidConfig(format!(
                "rate_decimals must be at most {}, got: {}",
                MAX_RATE_DECIMALS, self.tax.rate_decimals
            )));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`CheckoutConfig::load`]). Unparseable values are logged and ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup("CHECKOUT_NULL_FULFILLMENT_TOTAL") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding null fulfillment total policy from environment");
                    self.totals.null_fulfillment_total = parsed;
                }
                Err(e) => warn!(policy = %policy, "Ignoring override: {}", e),
            }
        }

        if let Some(code) = lookup("CHECKOUT_FALLBACK_CURRENCY") {
            debug!(currency = %code, "Overriding fallback currency from environment");
            self.currency.fallback_code = Some(code.trim().to_uppercase());
        }

        if let Some(decimals) = lookup("CHECKOUT_RATE_DECIMALS") {
            match decimals.trim().parse::<usize>() {
                Ok(d) => self.tax.rate_decimals = d,
                Err(_) => warn!(decimals = %decimals, "Ignoring non-numeric rate decimals"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the null fulfillment total policy.
    pub fn null_fulfillment_total(&self) -> NullFulfillmentTotal {
        self.totals.null_fulfillment_total
    }

    /// Returns the fallback currency code, if configured.
    pub fn fallback_currency_code(&self) -> Option<&str> {
        self.currency.fallback_code.as_deref()
    }

    /// Builds the default rate formatter for these settings.
    pub fn rate_formatter(&self) -> PercentRateFormatter {
        PercentRateFormatter::new(self.tax.rate_decimals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

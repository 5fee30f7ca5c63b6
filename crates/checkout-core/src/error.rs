//! # Error Types
//!
//! Error types for checkout-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Sources                                   │
//! │                                                                         │
//! │  Cart parsing (cart.rs)                                                │
//! │  └── InvalidCart      - document is structurally broken                │
//! │                                                                         │
//! │  Config loading (config.rs)                                            │
//! │  ├── Io               - config file could not be read/written          │
//! │  ├── ConfigParse      - TOML syntax or type mismatch                   │
//! │  ├── ConfigSerialize  - config could not be written back as TOML       │
//! │  └── InvalidConfig    - values parsed but make no sense                │
//! │                                                                         │
//! │  Checkout math (tax.rs, fulfillment.rs, composer.rs)                   │
//! │  └── (none)           - infallible; bad numbers propagate as NaN       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cart missing a required field (an item without `subtotal`, a
//! shipping group without `itemIds`) is rejected while parsing. Nothing is
//! guessed for fields that have no documented default.

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Everything that can go wrong around a checkout computation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart document could not be deserialized.
    ///
    /// ## When This Occurs
    /// - A required field is missing (`items[].subtotal`,
    ///   `shipping[].itemIds`, `shipping[]._id`)
    /// - A field has the wrong JSON type
    /// - The input is not JSON at all
    #[error("Invalid cart document: {0}")]
    InvalidCart(#[from] serde_json::Error),

    /// Reading or writing a config file failed.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`crate::config::CheckoutConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The config parsed but holds an unusable value.
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================

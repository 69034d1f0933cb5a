//! Catalog error types.

use super::ProductId;
use rust_decimal::Decimal;
use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating a catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogViolation {
    #[error("product '{product}' is stocked but has no price")]
    MissingPrice { product: ProductId },

    #[error("product '{product}' has negative price {price}")]
    NegativePrice { product: ProductId, price: Decimal },
}

/// Errors that can occur while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document is not valid JSON or has the wrong shape
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog parsed but failed validation
    #[error("Catalog validation failed: {}", summarize(.0))]
    Invalid(Vec<CatalogViolation>),
}

fn summarize(violations: &[CatalogViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

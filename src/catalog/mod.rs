//! Products, stock levels and prices.
//!
//! A [`Catalog`] pairs an inventory table with a price table. The
//! controller owns exactly one catalog; nothing here is global.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::{CatalogError, CatalogViolation};

/// Identifier of a purchasable product, such as `"metro"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Inventory and price tables for one machine.
///
/// Stock counts are unsigned, so a product can never go below zero.
/// Prices are read-only once the catalog is built; stock only changes
/// through [`Catalog::take_one`].
///
/// # Example
///
/// ```rust
/// use vending_controller::catalog::Catalog;
/// use rust_decimal_macros::dec;
///
/// let catalog = Catalog::ticket_office();
/// assert_eq!(catalog.stock("metro"), 10);
/// assert_eq!(catalog.price("train"), dec!(1000));
/// assert!(!catalog.is_available("ferry"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    inventory: BTreeMap<ProductId, u32>,
    prices: BTreeMap<ProductId, Decimal>,
}

impl Catalog {
    /// Build a catalog without validating it.
    ///
    /// Products missing from `prices` read as free; use
    /// [`Catalog::validate`] to catch that.
    pub fn new<I, P>(inventory: I, prices: P) -> Self
    where
        I: IntoIterator<Item = (ProductId, u32)>,
        P: IntoIterator<Item = (ProductId, Decimal)>,
    {
        Self {
            inventory: inventory.into_iter().collect(),
            prices: prices.into_iter().collect(),
        }
    }

    /// Metro, bus and train tickets as stocked by the demo machine.
    pub fn ticket_office() -> Self {
        Self::new(
            [
                (ProductId::from("metro"), 10),
                (ProductId::from("bus"), 15),
                (ProductId::from("train"), 5),
            ],
            [
                (ProductId::from("metro"), dec!(300)),
                (ProductId::from("bus"), dec!(250)),
                (ProductId::from("train"), dec!(1000)),
            ],
        )
    }

    /// Parse and validate a JSON catalog of the form
    /// `{"inventory": {"metro": 10}, "prices": {"metro": 300}}`.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validated()
    }

    /// Read, parse and validate a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check every product, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<CatalogViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<CatalogViolation>>> = Vec::new();

        for product in self.inventory.keys() {
            let check = if self.prices.contains_key(product) {
                Validation::success(())
            } else {
                Validation::fail(CatalogViolation::MissingPrice {
                    product: product.clone(),
                })
            };
            checks.push(check);
        }

        for (product, price) in &self.prices {
            let check = if *price < Decimal::ZERO {
                Validation::fail(CatalogViolation::NegativePrice {
                    product: product.clone(),
                    price: *price,
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Consume the catalog, returning it only if it passes validation.
    pub fn validated(self) -> Result<Self, CatalogError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(violations) => Err(CatalogError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Remaining units; unknown products have none.
    pub fn stock(&self, product: &str) -> u32 {
        self.inventory.get(product).copied().unwrap_or(0)
    }

    /// Listed price; unknown products read as zero.
    pub fn price(&self, product: &str) -> Decimal {
        self.prices.get(product).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_available(&self, product: &str) -> bool {
        self.stock(product) > 0
    }

    /// Remove one unit of `product`, returning the remaining count.
    ///
    /// Stock saturates at zero; availability is checked at selection time,
    /// not here.
    pub fn take_one(&mut self, product: &str) -> u32 {
        match self.inventory.get_mut(product) {
            Some(count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        }
    }

    pub fn inventory(&self) -> &BTreeMap<ProductId, u32> {
        &self.inventory
    }

    pub fn prices(&self) -> &BTreeMap<ProductId, Decimal> {
        &self.prices
    }
}

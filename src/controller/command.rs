//! Commands accepted by the controller and the outcomes they produce.

use crate::catalog::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External command dispatched to the current state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    SelectProduct(ProductId),
    InsertMoney(Decimal),
    Cancel,
    DispenseProduct,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectProduct(_) => "SelectProduct",
            Self::InsertMoney(_) => "InsertMoney",
            Self::Cancel => "Cancel",
            Self::DispenseProduct => "DispenseProduct",
        }
    }
}

/// Confirmation of a successful selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub product: ProductId,
    pub price: Decimal,
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product selected: {} ({:.2})", self.product, self.price)
    }
}

/// Notice returned for every accepted payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentNotice {
    /// Payment recorded, the price is not covered yet
    RunningTotal {
        inserted: Decimal,
        total: Decimal,
        remaining: Decimal,
    },
    /// This payment brought the total up to the price
    SufficientFunds { inserted: Decimal, total: Decimal },
    /// Extra money after the price was already covered
    AdditionalFunds { inserted: Decimal, total: Decimal },
}

impl PaymentNotice {
    /// Accumulated payment after this insertion.
    pub fn total(&self) -> Decimal {
        match self {
            Self::RunningTotal { total, .. }
            | Self::SufficientFunds { total, .. }
            | Self::AdditionalFunds { total, .. } => *total,
        }
    }

    pub fn inserted(&self) -> Decimal {
        match self {
            Self::RunningTotal { inserted, .. }
            | Self::SufficientFunds { inserted, .. }
            | Self::AdditionalFunds { inserted, .. } => *inserted,
        }
    }

    pub fn is_sufficient(&self) -> bool {
        !matches!(self, Self::RunningTotal { .. })
    }
}

impl fmt::Display for PaymentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RunningTotal {
                inserted,
                total,
                remaining,
            } => write!(
                f,
                "Inserted: {inserted:.2} (Total: {total:.2}, remaining: {remaining:.2})"
            ),
            Self::SufficientFunds { inserted, total } => write!(
                f,
                "Inserted: {inserted:.2} (Total: {total:.2}). Sufficient funds, ready to dispense"
            ),
            Self::AdditionalFunds { inserted, total } => {
                write!(f, "Additional funds inserted: {inserted:.2} (Total: {total:.2})")
            }
        }
    }
}

/// Confirmation of a dispensed product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispense {
    pub product: ProductId,
    pub price: Decimal,
    /// Everything inserted during the transaction, over-payment included
    pub paid: Decimal,
}

impl fmt::Display for Dispense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product dispensed: {}", self.product)
    }
}

/// Result of a command that was accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Selected(Selection),
    Payment(PaymentNotice),
    Canceled,
    Dispensed(Dispense),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selected(selection) => selection.fmt(f),
            Self::Payment(notice) => notice.fmt(f),
            Self::Canceled => f.write_str("Transaction canceled"),
            Self::Dispensed(dispense) => dispense.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn command_names() {
        assert_eq!(Command::SelectProduct("bus".into()).name(), "SelectProduct");
        assert_eq!(Command::InsertMoney(dec!(1)).name(), "InsertMoney");
        assert_eq!(Command::Cancel.name(), "Cancel");
        assert_eq!(Command::DispenseProduct.name(), "DispenseProduct");
    }

    #[test]
    fn payment_notice_accessors() {
        let notice = PaymentNotice::RunningTotal {
            inserted: dec!(100),
            total: dec!(100),
            remaining: dec!(200),
        };
        assert_eq!(notice.total(), dec!(100));
        assert!(!notice.is_sufficient());

        let notice = PaymentNotice::AdditionalFunds {
            inserted: dec!(5),
            total: dec!(305),
        };
        assert_eq!(notice.inserted(), dec!(5));
        assert!(notice.is_sufficient());
    }

    #[test]
    fn outcomes_render_for_display() {
        let selection = Outcome::Selected(Selection {
            product: "metro".into(),
            price: dec!(300),
        });
        assert_eq!(selection.to_string(), "Product selected: metro (300.00)");

        let notice = Outcome::Payment(PaymentNotice::SufficientFunds {
            inserted: dec!(300),
            total: dec!(300),
        });
        assert!(notice.to_string().contains("Sufficient funds"));

        assert_eq!(Outcome::Canceled.to_string(), "Transaction canceled");
    }

    #[test]
    fn command_serializes_with_variant_tag() {
        let json = serde_json::to_string(&Command::SelectProduct("train".into())).unwrap();
        assert_eq!(json, r#"{"SelectProduct":"train"}"#);
    }
}

//! Line-item aggregation for itemised documents.

use super::totals::AmountError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One billable row of an itemised document. `total` is derived and is
/// overwritten on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    #[serde(default)]
    pub total: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
            total: Decimal::ZERO,
        }
    }
}

/// Per-line clamping rule. Purchase orders floor each line at zero; invoices
/// rely on the document-level floor instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClamp {
    Unclamped,
    FloorAtZero,
}

pub fn line_total(item: &LineItem, clamp: LineClamp) -> Result<Decimal, AmountError> {
    let total = Decimal::from(item.quantity)
        .checked_mul(item.unit_price)
        .ok_or(AmountError::Overflow("item total"))?;
    Ok(match clamp {
        LineClamp::Unclamped => total,
        LineClamp::FloorAtZero => total.max(Decimal::ZERO),
    })
}

/// Overwrite every item's `total` and return the subtotal.
pub fn aggregate(items: &mut [LineItem], clamp: LineClamp) -> Result<Decimal, AmountError> {
    items.iter_mut().try_fold(Decimal::ZERO, |subtotal, item| {
        item.total = line_total(item, clamp)?;
        subtotal
            .checked_add(item.total)
            .ok_or(AmountError::Overflow("subtotal"))
    })
}

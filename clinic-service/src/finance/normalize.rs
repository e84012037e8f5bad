//! Recomputation of derived fields before a financial document is written.

use super::line_items::{aggregate, LineClamp, LineItem};
use super::payment_status::{settle, PaymentStatus};
use super::totals::{compute_total, AmountError};
use crate::numbering::Coded;
use rust_decimal::Decimal;

/// Where a document's subtotal comes from.
pub enum Lines<'a> {
    /// Itemised documents: subtotal is the sum of the recomputed lines.
    Itemized {
        items: &'a mut [LineItem],
        clamp: LineClamp,
    },
    /// Non-itemised documents carry a single base amount.
    Flat(Decimal),
}

/// Mutable view over the money fields of a financial document.
pub struct Ledger<'a> {
    pub lines: Lines<'a>,
    pub tax: Decimal,
    pub discount: Decimal,
    pub subtotal: &'a mut Decimal,
    pub total: &'a mut Decimal,
    pub paid_amount: &'a mut Decimal,
    pub status: &'a mut PaymentStatus,
}

pub trait FinancialDocument: Coded {
    fn ledger(&mut self) -> Ledger<'_>;
}

impl Ledger<'_> {
    fn apply(self) -> Result<(), AmountError> {
        let subtotal = match self.lines {
            Lines::Itemized { items, clamp } => aggregate(items, clamp)?,
            Lines::Flat(amount) => amount,
        };
        let total = compute_total(subtotal, self.tax, self.discount)?;
        *self.subtotal = subtotal;
        *self.total = total;

        let settlement = settle(*self.status, *self.paid_amount, total);
        *self.paid_amount = settlement.paid_amount;
        *self.status = settlement.status;
        Ok(())
    }
}

/// Recompute line totals, subtotal, total, paid amount and status in place.
///
/// Applying it to an already normalised document changes nothing. On overflow
/// the document must not be stored.
pub fn normalize<D: FinancialDocument + ?Sized>(doc: &mut D) -> Result<(), AmountError> {
    doc.ledger().apply()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::DocumentKind;
    use std::str::FromStr;

    #[derive(Debug, Clone, PartialEq)]
    struct Sheet {
        code: Option<String>,
        items: Vec<LineItem>,
        tax: Decimal,
        discount: Decimal,
        subtotal: Decimal,
        total: Decimal,
        paid_amount: Decimal,
        status: PaymentStatus,
    }

    impl Coded for Sheet {
        const KIND: DocumentKind = DocumentKind::Invoice;

        fn code(&self) -> Option<&str> {
            self.code.as_deref()
        }

        fn assign_code(&mut self, code: String) {
            self.code = Some(code);
        }
    }

    impl FinancialDocument for Sheet {
        fn ledger(&mut self) -> Ledger<'_> {
            Ledger {
                lines: Lines::Itemized {
                    items: &mut self.items,
                    clamp: LineClamp::Unclamped,
                },
                tax: self.tax,
                discount: self.discount,
                subtotal: &mut self.subtotal,
                total: &mut self.total,
                paid_amount: &mut self.paid_amount,
                status: &mut self.status,
            }
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sheet(items: Vec<LineItem>, tax: &str, discount: &str, paid: &str) -> Sheet {
        Sheet {
            code: None,
            items,
            tax: dec(tax),
            discount: dec(discount),
            subtotal: dec("9999"),
            total: dec("9999"),
            paid_amount: dec(paid),
            status: PaymentStatus::Paid,
        }
    }

    #[test]
    fn recomputes_every_derived_field() {
        let mut doc = sheet(
            vec![
                LineItem::new("Root canal", 1, dec("450")),
                LineItem::new("Temporary crown", 2, dec("75")),
            ],
            "60",
            "100",
            "200",
        );

        normalize(&mut doc).unwrap();

        assert_eq!(doc.items[1].total, dec("150"));
        assert_eq!(doc.subtotal, dec("600"));
        assert_eq!(doc.total, dec("560"));
        assert_eq!(doc.paid_amount, dec("200"));
        assert_eq!(doc.status, PaymentStatus::Partial);
    }

    #[test]
    fn oversized_discount_leaves_nothing_to_pay() {
        let mut doc = sheet(vec![LineItem::new("Consultation", 1, dec("100"))], "10", "150", "0");

        normalize(&mut doc).unwrap();

        assert_eq!(doc.total, Decimal::ZERO);
        assert_eq!(doc.status, PaymentStatus::Pending);
    }

    #[test]
    fn empty_items_total_is_tax_minus_discount() {
        let mut doc = sheet(Vec::new(), "25", "5", "0");

        normalize(&mut doc).unwrap();

        assert_eq!(doc.subtotal, Decimal::ZERO);
        assert_eq!(doc.total, dec("20"));
    }

    #[test]
    fn overpayment_is_clamped_and_marked_paid() {
        let mut doc = sheet(vec![LineItem::new("Whitening", 1, dec("300"))], "0", "0", "500");

        normalize(&mut doc).unwrap();

        assert_eq!(doc.paid_amount, dec("300"));
        assert_eq!(doc.status, PaymentStatus::Paid);
    }

    #[test]
    fn second_pass_produces_identical_document() {
        let mut doc = sheet(
            vec![
                LineItem::new("Implant", 1, dec("1200.50")),
                LineItem::new("Abutment", 1, dec("310.25")),
            ],
            "90.10",
            "40",
            "2000",
        );

        normalize(&mut doc).unwrap();
        let once = doc.clone();
        normalize(&mut doc).unwrap();

        assert_eq!(doc, once);
    }

    #[test]
    fn overflowing_document_keeps_its_stored_totals() {
        let mut doc = sheet(
            vec![LineItem::new("Bulk order", 4_000_000_000, dec("70000000000000000000000"))],
            "0",
            "0",
            "0",
        );

        assert_eq!(normalize(&mut doc), Err(AmountError::Overflow("item total")));
        assert_eq!(doc.subtotal, dec("9999"));
        assert_eq!(doc.total, dec("9999"));
    }

    #[test]
    fn tax_overflow_is_reported() {
        let mut doc = sheet(vec![LineItem::new("Implant", 1, Decimal::MAX)], "1", "0", "0");
        assert_eq!(normalize(&mut doc), Err(AmountError::Overflow("total")));
    }
}

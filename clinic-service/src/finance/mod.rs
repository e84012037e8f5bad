//! Financial-document computations: line aggregation, totals, payment status
//! and the normalisation pass that ties them together.

pub mod line_items;
pub mod normalize;
pub mod payment_status;
pub mod totals;

pub use line_items::{aggregate, line_total, LineClamp, LineItem};
pub use normalize::{normalize, FinancialDocument, Ledger, Lines};
pub use payment_status::{
    add_payment, apply_manual_status, derive, ensure_open, settle, ManualStatus, PaymentStatus, Settlement,
    StatusError,
};
pub use totals::{balance_due, compute_total, AmountError};

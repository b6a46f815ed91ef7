//! Domain models for invoice-totals.

mod discount;
mod draft;
mod line_item;
mod payment;

pub use discount::{Discount, DiscountKind, PercentBase};
pub use draft::{InvoiceDraft, InvoiceTotals, TotalsReport};
pub use line_item::LineItem;
pub use payment::{PaymentMode, PaymentSplit, SplitCheck};

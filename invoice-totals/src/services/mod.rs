//! Services module for invoice-totals.

pub mod amount;
pub mod calculator;
pub mod submission;

pub use calculator::{
    compute_discount, compute_grand_total, compute_line_total, compute_subtotal,
    validate_split_payment, Calculator, DEFAULT_SPLIT_TOLERANCE,
};
pub use submission::{
    collect_items, prepare_submission, submission_issues, InvoiceSubmission, SplitDetails,
    SubmissionError, SubmissionItem,
};

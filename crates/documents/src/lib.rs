//! Printable financial documents for the FinDesk back office.
//!
//! Each document type renders itself to a self-contained HTML fragment and
//! implements [`findesk_printing::RenderUnit`], so it can be paginated and
//! serialized by the print engine either standalone or as one sheet of a
//! multi-page batch.

pub mod header;
mod html;
pub mod invoice;
pub mod model;
pub mod statement;

pub use header::{LetterHead, PrintFooter};
pub use invoice::InvoiceDocument;
pub use model::{
    format_amount, Address, Company, CouponPaymentRow, LoanBalanceRow, PaymentDetail,
    SecurityOverview, Spv,
};
pub use statement::{CouponStatementDocument, InterestOverviewDocument};

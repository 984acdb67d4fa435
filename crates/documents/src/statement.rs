use std::borrow::Cow;
use std::fmt::Write as _;

use findesk_printing::RenderUnit;
use serde::{Deserialize, Serialize};

use crate::header::{LetterHead, PrintFooter};
use crate::html::escape;
use crate::model::{format_amount, CouponPaymentRow, LoanBalanceRow, SecurityOverview};

/// Coupon payment schedule for one security, one period per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponStatementDocument {
    pub isin_code: String,
    pub security_name: String,
    #[serde(default)]
    pub rows: Vec<CouponPaymentRow>,
    #[serde(default)]
    pub letterhead: LetterHead,
}

impl CouponStatementDocument {
    pub fn render(&self) -> String {
        let mut out = String::from("<div class=\"print-document coupon-statement\">");
        out.push_str(&self.letterhead.render());
        out.push_str("<hr style=\"border: none; border-top: 1px solid #333;\">");

        let _ = write!(
            out,
            "<h2 style=\"font-size: 14px; margin: 15px 0 10px 0;\">Coupon Payment Schedule \
             &ndash; {name} ({isin})</h2>",
            name = escape(&self.security_name),
            isin = escape(&self.isin_code),
        );

        out.push_str(
            "<table class=\"coupon-schedule\" style=\"width: 100%; border-collapse: collapse; \
             font-size: 11px;\"><thead><tr>\
             <th style=\"text-align: left;\">Period Start</th>\
             <th style=\"text-align: left;\">Period End</th>\
             <th style=\"text-align: right;\">Days</th>\
             <th style=\"text-align: right;\">Rate %</th>\
             <th style=\"text-align: right;\">Accrued Interest</th>\
             <th style=\"text-align: right;\">Paid Interest</th>\
             </tr></thead><tbody>",
        );
        for row in &self.rows {
            let _ = write!(
                out,
                "<tr><td>{start}</td><td>{end}</td>\
                 <td style=\"text-align: right;\">{days}</td>\
                 <td style=\"text-align: right;\">{rate:.4}</td>\
                 <td style=\"text-align: right;\">{accrued}</td>\
                 <td style=\"text-align: right;\">{paid}</td></tr>",
                start = escape(&row.period_start),
                end = escape(&row.period_end),
                days = row.days,
                rate = row.rate_percent,
                accrued = format_amount(row.amount),
                paid = format_amount(row.paid_interest),
            );
        }
        let total: f64 = self.rows.iter().map(|row| row.amount).sum();
        let _ = write!(
            out,
            "</tbody><tfoot><tr>\
             <td colspan=\"4\" style=\"font-weight: bold;\">Total</td>\
             <td style=\"text-align: right; font-weight: bold;\">{total}</td>\
             <td></td></tr></tfoot></table>",
            total = format_amount(total),
        );

        out.push_str(&PrintFooter::Disclaimer.render());
        out.push_str("</div>");
        out
    }
}

impl RenderUnit for CouponStatementDocument {
    fn html(&self) -> Cow<'_, str> {
        Cow::Owned(self.render())
    }
}

/// Interest-calculation overview: security master data next to the loan
/// balance movements the calculation runs over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestOverviewDocument {
    #[serde(default)]
    pub compartment_name: String,
    pub security: SecurityOverview,
    #[serde(default)]
    pub balances: Vec<LoanBalanceRow>,
    #[serde(default)]
    pub letterhead: LetterHead,
}

impl InterestOverviewDocument {
    pub fn total_balance(&self) -> f64 {
        self.balances.iter().map(|row| row.amount).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("<div class=\"print-document interest-overview\">");
        out.push_str(&self.letterhead.render());
        out.push_str("<hr style=\"border: none; border-top: 1px solid #333;\">");

        self.render_security(&mut out);
        self.render_balances(&mut out);

        out.push_str(&PrintFooter::Disclaimer.render());
        out.push_str("</div>");
        out
    }

    fn render_security(&self, out: &mut String) {
        out.push_str(
            "<h2 style=\"font-size: 14px; margin: 15px 0 10px 0;\">Security Overview</h2>",
        );
        out.push_str(
            "<table class=\"security-overview\" style=\"width: 100%; font-size: 11px; \
             line-height: 1.5;\"><tbody>",
        );
        for (label, value) in [
            ("Compartment", &self.compartment_name),
            ("ISIN", &self.security.isin),
            ("Issue Date", &self.security.issue_date),
            ("Maturity Date", &self.security.maturity_date),
            ("Issue Price", &self.security.issue_price),
            ("Redemption Price", &self.security.redemption_price),
            ("Coupon Interest", &self.security.coupon_interest),
            ("Frequency", &self.security.frequency),
            ("Day Count Convention", &self.security.day_count),
        ] {
            if value.is_empty() {
                continue;
            }
            let _ = write!(
                out,
                "<tr><td style=\"width: 30%; font-weight: bold;\">{label}</td>\
                 <td>{value}</td></tr>",
                value = escape(value),
            );
        }
        out.push_str("</tbody></table>");
    }

    fn render_balances(&self, out: &mut String) {
        if self.balances.is_empty() {
            return;
        }
        out.push_str(
            "<h2 style=\"font-size: 14px; margin: 20px 0 10px 0;\">Loan Balance</h2>",
        );
        out.push_str(
            "<table class=\"loan-balance\" style=\"width: 100%; border-collapse: collapse; \
             font-size: 11px;\"><thead><tr>\
             <th style=\"text-align: left;\">Value Date</th>\
             <th style=\"text-align: left;\">Description</th>\
             <th style=\"text-align: right;\">Amount</th>\
             </tr></thead><tbody>",
        );
        for row in &self.balances {
            let _ = write!(
                out,
                "<tr><td>{date}</td><td>{description}</td>\
                 <td style=\"text-align: right;\">{amount}</td></tr>",
                date = escape(&row.value_date),
                description = escape(&row.description),
                amount = format_amount(row.amount),
            );
        }
        let _ = write!(
            out,
            "</tbody><tfoot><tr>\
             <td colspan=\"2\" style=\"font-weight: bold;\">Total</td>\
             <td style=\"text-align: right; font-weight: bold;\">{total}</td>\
             </tr></tfoot></table>",
            total = format_amount(self.total_balance()),
        );
    }
}

impl RenderUnit for InterestOverviewDocument {
    fn html(&self) -> Cow<'_, str> {
        Cow::Owned(self.render())
    }
}

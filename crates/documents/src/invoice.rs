use std::borrow::Cow;
use std::fmt::Write as _;

use findesk_printing::RenderUnit;
use serde::{Deserialize, Serialize};

use crate::header::{LetterHead, PrintFooter};
use crate::html::escape;
use crate::model::{format_amount, Company, CouponPaymentRow, Spv};

/// Coupon interest invoice for one ISIN, addressed from the SPV (acting as
/// administrator of the compartment) to the client company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDocument {
    pub isin_code: String,
    pub compartment_name: String,
    pub spv: Spv,
    pub client: Company,
    #[serde(default)]
    pub rows: Vec<CouponPaymentRow>,
    #[serde(default)]
    pub letterhead: LetterHead,
    #[serde(default)]
    pub closing_message: Option<String>,
}

impl InvoiceDocument {
    pub fn total_accrued(&self) -> f64 {
        self.rows.iter().map(|row| row.amount).sum()
    }

    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|row| row.paid_interest).sum()
    }

    pub fn outstanding(&self) -> f64 {
        self.total_accrued() - self.total_paid()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("<div class=\"print-document invoice\">");
        out.push_str(&self.letterhead.render());
        out.push_str("<hr style=\"border: none; border-top: 1px solid #333;\">");

        self.render_parties(&mut out);
        self.render_payment_rows(&mut out);
        self.render_totals(&mut out);
        self.render_bank_details(&mut out);

        out.push_str(
            &PrintFooter::Invoice {
                message: self.closing_message.clone(),
                signature: true,
            }
            .render(),
        );
        out.push_str("</div>");
        out
    }

    fn render_parties(&self, out: &mut String) {
        out.push_str(
            "<section class=\"invoice-parties\" style=\"margin-bottom: 20px; font-size: 11px; \
             display: flex; justify-content: space-between;\">",
        );
        let _ = write!(
            out,
            "<div style=\"flex: 1; line-height: 1.4;\">\
             <div style=\"font-weight: bold; margin-bottom: 5px;\">acting as administrator \
             of:</div>\
             <div>{spv}</div><div>{compartment}</div>{address}</div>",
            spv = escape(&self.spv.title),
            compartment = escape(&self.compartment_name),
            address = address_lines(&self.spv.address),
        );
        let _ = write!(
            out,
            "<div style=\"flex: 1; text-align: right; line-height: 1.4;\">\
             <div style=\"font-weight: bold; margin-bottom: 5px;\">To:</div>\
             <div>{client}</div>{address}</div>",
            client = escape(&self.client.name),
            address = address_lines(&self.client.address),
        );
        out.push_str("</section>");
    }

    fn render_payment_rows(&self, out: &mut String) {
        if self.rows.is_empty() {
            return;
        }
        let _ = write!(
            out,
            "<table class=\"payment-rows\" style=\"width: 100%; border-collapse: collapse; \
             font-size: 11px;\"><thead><tr>\
             <th style=\"text-align: left;\">Period Start</th>\
             <th style=\"text-align: left;\">Period End</th>\
             <th style=\"text-align: right;\">Days</th>\
             <th style=\"text-align: right;\">Rate %</th>\
             <th style=\"text-align: right;\">Accrued Interest</th>\
             <th style=\"text-align: right;\">Paid Interest</th>\
             </tr></thead><tbody>"
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
        out.push_str("</tbody></table>");
    }

    fn render_totals(&self, out: &mut String) {
        let _ = write!(
            out,
            "<section class=\"invoice-totals\" style=\"margin-top: 15px; font-size: 11px; \
             text-align: right; line-height: 1.6;\">\
             <div>Total accrued interest: <strong>{accrued}</strong></div>\
             <div>Total paid interest: <strong>{paid}</strong></div>\
             <div>Outstanding interest: <strong>{outstanding}</strong></div>\
             </section>",
            accrued = format_amount(self.total_accrued()),
            paid = format_amount(self.total_paid()),
            outstanding = format_amount(self.outstanding()),
        );
    }

    fn render_bank_details(&self, out: &mut String) {
        let payment = &self.spv.payment_detail;
        out.push_str(
            "<section class=\"bank-details\" style=\"margin-top: 20px; font-size: 11px; \
             line-height: 1.5;\"><div style=\"margin-bottom: 10px;\">Please proceed with \
             the payment to the following account until latest (end date period).</div>",
        );
        let _ = write!(
            out,
            "<table style=\"width: 100%; font-size: 11px;\"><tbody>\
             <tr><td style=\"width: 20%; font-weight: bold;\">Beneficiary Bank</td>\
             <td>{bank}</td></tr>\
             <tr><td style=\"font-weight: bold;\">SWIFT</td><td>{swift}</td></tr>\
             <tr><td style=\"font-weight: bold;\">IBAN</td><td>{iban}</td></tr>\
             <tr><td style=\"font-weight: bold;\">Account Name</td><td>{account}</td></tr>\
             </tbody></table>",
            bank = escape(&payment.beneficiary_bank),
            swift = escape(&payment.swift),
            iban = escape(&payment.iban),
            account = escape(&payment.account_name),
        );
        let _ = write!(
            out,
            "<table style=\"width: 100%; font-size: 11px; margin-top: 10px;\"><tbody>\
             <tr><td style=\"width: 20%; font-weight: bold;\">Correspondent Bank \
             <br><span style=\"font-size: 10px; font-style: italic; font-weight: normal;\">\
             (Swift Field 56a)</span></td><td>{bank}</td></tr>\
             <tr><td style=\"font-weight: bold;\">SWIFT</td><td>{swift}</td></tr>\
             <tr><td style=\"font-weight: bold;\">ABA</td><td>{aba}</td></tr>\
             </tbody></table></section>",
            bank = escape(&payment.correspondent_bank),
            swift = escape(&payment.correspondent_swift),
            aba = escape(&payment.correspondent_aba),
        );
    }
}

impl RenderUnit for InvoiceDocument {
    fn html(&self) -> Cow<'_, str> {
        Cow::Owned(self.render())
    }
}

fn address_lines(address: &crate::model::Address) -> String {
    let mut out = String::new();
    for line in [
        address.line1.as_str(),
        address.line2.as_str(),
        &format!("{} {}", address.postal_code, address.city),
        address.country.as_str(),
    ] {
        let line = line.trim();
        if !line.is_empty() {
            let _ = write!(out, "<div>{}</div>", escape(line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Address;

    fn sample() -> InvoiceDocument {
        InvoiceDocument {
            isin_code: "LU0123456789".to_string(),
            compartment_name: "Compartment 12".to_string(),
            spv: Spv {
                title: "FinDesk Securitisation SA".to_string(),
                address: Address {
                    line1: "55 Rue de la Vallée".to_string(),
                    city: "Luxembourg".to_string(),
                    postal_code: "2661".to_string(),
                    country: "Grand Duchy of Luxembourg".to_string(),
                    ..Address::default()
                },
                payment_detail: crate::model::PaymentDetail {
                    beneficiary_bank: "Banque Test SA".to_string(),
                    iban: "LU12 3456 7890 1234 5678".to_string(),
                    ..crate::model::PaymentDetail::default()
                },
            },
            client: Company {
                name: "Müller & Söhne GmbH".to_string(),
                address: Address {
                    line1: "Hauptstraße 1".to_string(),
                    city: "Frankfurt".to_string(),
                    postal_code: "60311".to_string(),
                    country: "Germany".to_string(),
                    ..Address::default()
                },
            },
            rows: vec![
                CouponPaymentRow {
                    period_start: "2024-01-15".to_string(),
                    period_end: "2024-07-15".to_string(),
                    days: 182,
                    rate_percent: 3.5,
                    amount: 17_500.0,
                    paid_interest: 17_500.0,
                },
                CouponPaymentRow {
                    period_start: "2024-07-15".to_string(),
                    period_end: "2025-01-15".to_string(),
                    days: 184,
                    rate_percent: 3.5,
                    amount: 17_694.44,
                    paid_interest: 0.0,
                },
            ],
            letterhead: LetterHead::default(),
            closing_message: None,
        }
    }

    #[test]
    fn totals_follow_the_rows() {
        let invoice = sample();
        assert!((invoice.total_accrued() - 35_194.44).abs() < 1e-9);
        assert_eq!(invoice.total_paid(), 17_500.0);
        assert!((invoice.outstanding() - 17_694.44).abs() < 1e-9);
    }

    #[test]
    fn rendered_invoice_contains_parties_rows_and_totals() {
        let html = sample().render();
        assert!(html.contains("acting as administrator of:"));
        assert!(html.contains("FinDesk Securitisation SA"));
        assert!(html.contains("Müller &amp; Söhne GmbH"));
        assert!(html.contains("2024-07-15"));
        assert!(html.contains("17,694.44"));
        assert!(html.contains("Outstanding interest: <strong>17,694.44</strong>"));
        assert!(html.contains("LU12 3456 7890 1234 5678"));
    }

    #[test]
    fn empty_row_list_omits_the_payment_table() {
        let mut invoice = sample();
        invoice.rows.clear();
        let html = invoice.render();
        assert!(!html.contains("class=\"payment-rows\""));
        assert!(html.contains("Total accrued interest: <strong>0.00</strong>"));
    }

    #[test]
    fn render_unit_yields_the_same_markup() {
        let invoice = sample();
        assert_eq!(invoice.html().as_ref(), invoice.render());
    }
}

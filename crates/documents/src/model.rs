use serde::{Deserialize, Serialize};

/// Postal address rendered on printed documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub line1: String,
    #[serde(default)]
    pub line2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Settlement instructions printed in the invoice bank tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetail {
    #[serde(default)]
    pub beneficiary_bank: String,
    #[serde(default)]
    pub swift: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub correspondent_bank: String,
    #[serde(default)]
    pub correspondent_swift: String,
    #[serde(default)]
    pub correspondent_aba: String,
}

/// Special-purpose vehicle: the issuing entity on printed documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spv {
    pub title: String,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub payment_detail: PaymentDetail,
}

/// Client company an invoice is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub address: Address,
}

/// One scheduled or settled coupon payment period.
///
/// Dates arrive preformatted (ISO strings) and the day count is explicit;
/// locale-aware date arithmetic and formatting live outside this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouponPaymentRow {
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub rate_percent: f64,
    /// Accrued interest for the period.
    pub amount: f64,
    #[serde(default)]
    pub paid_interest: f64,
}

/// Security master data shown in the interest-calculation overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityOverview {
    pub isin: String,
    #[serde(default)]
    pub issue_date: String,
    #[serde(default)]
    pub maturity_date: String,
    #[serde(default)]
    pub issue_price: String,
    #[serde(default)]
    pub redemption_price: String,
    #[serde(default)]
    pub coupon_interest: String,
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub day_count: String,
}

/// One loan balance line of the interest-calculation overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanBalanceRow {
    pub value_date: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
}

/// Two-decimal amount with thousands separators ("1,234,567.80"). Full
/// locale-aware currency formatting is the host's concern.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{fraction:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_group_thousands_and_round_cents() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(1234567.895), "1,234,567.90");
        assert_eq!(format_amount(999.9), "999.90");
        assert_eq!(format_amount(-1500.0), "-1,500.00");
    }

    #[test]
    fn rows_deserialize_with_defaults() {
        let row: CouponPaymentRow = serde_json::from_str(
            r#"{"period_start":"2024-01-15","period_end":"2024-07-15","amount":1750.0}"#,
        )
        .expect("row parses");
        assert_eq!(row.days, 0);
        assert_eq!(row.paid_interest, 0.0);
        assert_eq!(row.amount, 1750.0);
    }
}

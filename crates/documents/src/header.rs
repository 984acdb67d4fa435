use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::html::escape;
use crate::model::Address;

/// Issuer letterhead printed at the top of every document: logo slot on the
/// left, registered address block on the right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterHead {
    #[serde(default = "default_logo_path")]
    pub logo_path: String,
    #[serde(default = "default_logo_alt")]
    pub logo_alt: String,
    /// Optional entity title rendered under the logo.
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_address")]
    pub address: Address,
    #[serde(default = "default_registration")]
    pub registration_number: String,
}

fn default_logo_path() -> String {
    "/logo192.png".to_string()
}

fn default_logo_alt() -> String {
    "Company Logo".to_string()
}

fn default_address() -> Address {
    Address {
        line1: "55 Rue de la Vallée".to_string(),
        line2: String::new(),
        city: "Luxembourg".to_string(),
        postal_code: "2661".to_string(),
        country: "Grand Duchy of Luxembourg".to_string(),
    }
}

fn default_registration() -> String {
    "B264806".to_string()
}

impl Default for LetterHead {
    fn default() -> Self {
        Self {
            logo_path: default_logo_path(),
            logo_alt: default_logo_alt(),
            title: String::new(),
            address: default_address(),
            registration_number: default_registration(),
        }
    }
}

impl LetterHead {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(
            "<header class=\"print-header\" style=\"background: linear-gradient(90deg, \
             #778DA9 0%, #B7BDC8 40%, #E0E1DD 100%); padding: 10px; display: flex; \
             justify-content: space-between; align-items: flex-start;\">",
        );

        let _ = write!(
            out,
            "<div class=\"letterhead-logo\"><img src=\"{}\" alt=\"{}\" \
             style=\"width: 160px; height: 60px;\">",
            escape(&self.logo_path),
            escape(&self.logo_alt),
        );
        if !self.title.is_empty() {
            let _ = write!(
                out,
                "<div style=\"font-weight: bold; margin-top: 5px; text-align: center; \
                 font-size: 12px;\">{}</div>",
                escape(&self.title),
            );
        }
        out.push_str("</div>");

        out.push_str(
            "<div class=\"letterhead-address\" style=\"text-align: right; font-size: 12px; \
             line-height: 1.4;\"><div style=\"font-weight: bold; margin-bottom: 5px;\">\
             Address:</div>",
        );
        for line in [
            &self.address.line1,
            &self.address.line2,
            &format!("{} {}", self.address.postal_code, self.address.city),
            &self.address.country,
        ] {
            let line = line.trim();
            if !line.is_empty() {
                let _ = write!(out, "<div>{}</div>", escape(line));
            }
        }
        if !self.registration_number.is_empty() {
            let _ = write!(
                out,
                "<div style=\"margin-top: 5px; font-weight: bold;\">{}</div>",
                escape(&self.registration_number),
            );
        }
        out.push_str("</div></header>");
        out
    }
}

/// Closing block printed under a document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrintFooter {
    /// Invoice closing: contact message, optional signature block.
    Invoice {
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        signature: bool,
    },
    /// Informational-purposes disclaimer used on calculation overviews.
    Disclaimer,
    /// No footer content.
    Simple,
}

impl Default for PrintFooter {
    fn default() -> Self {
        PrintFooter::Simple
    }
}

const INVOICE_MESSAGE: &str =
    "Contact your sales representative if you have any questions regarding this invoice.";

const DISCLAIMER: &str = "The overview and interest calculation on this document is provided \
     for informational purposes only, and while every effort has been made to ensure accuracy, \
     FinDesk Securities SA is not liable for any potential typographical errors or \
     discrepancies in the document.";

impl PrintFooter {
    pub fn render(&self) -> String {
        match self {
            PrintFooter::Invoice { message, signature } => {
                let mut out = String::from(
                    "<footer class=\"print-footer\" style=\"margin-top: 10px; \
                     font-size: 11px; line-height: 1.6;\">",
                );
                let _ = write!(
                    out,
                    "<div style=\"margin-bottom: 30px;\">{}</div>",
                    escape(message.as_deref().unwrap_or(INVOICE_MESSAGE)),
                );
                if *signature {
                    out.push_str(
                        "<div><div style=\"margin-bottom: 5px;\">Sincerely,</div>\
                         <div style=\"font-weight: bold;\">FinDesk Securities SA</div></div>",
                    );
                }
                out.push_str("</footer>");
                out
            }
            PrintFooter::Disclaimer => format!(
                "<footer class=\"print-footer\" style=\"margin-top: 30px; font-size: 10px; \
                 line-height: 1.4; font-style: italic; text-align: justify; color: #666;\">\
                 {DISCLAIMER}</footer>"
            ),
            PrintFooter::Simple => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letterhead_renders_address_and_registration() {
        let header = LetterHead::default();
        let html = header.render();
        assert!(html.contains("55 Rue de la Vallée"));
        assert!(html.contains("2661 Luxembourg"));
        assert!(html.contains("B264806"));
    }

    #[test]
    fn letterhead_title_is_escaped() {
        let header = LetterHead {
            title: "Notes & Bonds <Series 1>".to_string(),
            ..LetterHead::default()
        };
        assert!(header.render().contains("Notes &amp; Bonds &lt;Series 1&gt;"));
    }

    #[test]
    fn invoice_footer_defaults_message_and_omits_signature() {
        let footer = PrintFooter::Invoice {
            message: None,
            signature: false,
        };
        let html = footer.render();
        assert!(html.contains("Contact your sales representative"));
        assert!(!html.contains("Sincerely"));
    }

    #[test]
    fn simple_footer_is_empty() {
        assert!(PrintFooter::Simple.render().is_empty());
    }
}

use std::fmt::Write as _;
use std::time::Duration;

use thiserror::Error;

use crate::job::PrintSettings;
use crate::layout::{PrintContent, RenderUnit};

/// Fixed delay before the platform print action fires in a fresh context,
/// allowing styles and assets to load.
/// 新列印內容啟動前的固定延遲，讓樣式與資源完成載入。
pub const PRINT_DISPATCH_DELAY: Duration = Duration::from_millis(500);

/// A style source could not be read (cross-origin restriction or similar).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("style source not accessible: {0}")]
pub struct StyleAccessError(pub String);

/// One source of active style rules in the current rendering context.
/// 目前渲染環境中的單一樣式規則來源。
pub trait StyleSource {
    fn rules(&self) -> Result<String, StyleAccessError>;
}

/// Collects all readable style rules into one blob. Unreadable sources are
/// logged and skipped; collection always succeeds with whatever was
/// readable.
pub fn collect_styles(sources: &[&dyn StyleSource]) -> String {
    let mut all = String::new();
    for source in sources {
        match source.rules() {
            Ok(rules) => {
                all.push_str(&rules);
                all.push('\n');
            }
            Err(err) => log::warn!("skipping style source: {err}"),
        }
    }
    all
}

/// A fresh, independent rendering context for printing (a new window/tab in
/// browser terms).
/// 供列印使用的全新獨立渲染環境（瀏覽器中即新視窗或分頁）。
pub trait PrintContext {
    /// Writes the standalone document into the context.
    fn write_document(&mut self, html: &str);
    /// Invokes the platform print action after `delay`, then closes the
    /// context. The deferred invocation is owned by the context; an
    /// already-dispatched context is never recalled.
    fn dispatch_print(self: Box<Self>, delay: Duration);
}

/// Opens print contexts on behalf of the engine.
pub trait PrintHost {
    /// `None` when the host blocks the new context (pop-up blocker or
    /// similar); the print operation then silently no-ops.
    fn open_print_context(&self) -> Option<Box<dyn PrintContext>>;
}

/// Re-renders the original, unpaginated content for the print document.
/// 以原始（未分頁）內容重新產生列印文件主體。
///
/// Multi-page content wraps every unit; all but the last carry an explicit
/// page-break-after marker, and every unit avoids breaking internally.
pub fn serialize_body<U: RenderUnit>(content: &PrintContent<U>) -> String {
    match content {
        PrintContent::Single(unit) => unit.html().into_owned(),
        PrintContent::Sheets(units) => {
            let mut body = String::new();
            let last = units.len().saturating_sub(1);
            for (index, unit) in units.iter().enumerate() {
                let break_after = if index < last { "always" } else { "auto" };
                let _ = write!(
                    body,
                    "<div class=\"print-sheet\" style=\"page-break-after: {break_after}; \
                     page-break-inside: avoid; min-height: 100vh;\">"
                );
                body.push_str(&unit.html());
                body.push_str("</div>\n");
            }
            body
        }
    }
}

/// Assembles the standalone print document: charset, title, the collected
/// style blob, print-media overrides derived from the settings, and the
/// serialized body.
pub fn build_print_document(
    settings: &PrintSettings,
    styles: &str,
    title: &str,
    body: &str,
) -> String {
    let color = settings.color_mode.css_value();
    let font = settings.font_scale.percent();
    let orientation = settings.orientation.css_keyword();
    let margin = settings.margin.css_inches();

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         {styles}\n\
         @media print {{\n\
             body {{\n\
                 margin: 0;\n\
                 -webkit-print-color-adjust: {color};\n\
                 print-color-adjust: {color};\n\
                 font-size: {font}%;\n\
             }}\n\
             @page {{\n\
                 size: A4 {orientation};\n\
                 margin: {margin}in;\n\
             }}\n\
             * {{\n\
                 -webkit-print-color-adjust: {color} !important;\n\
                 print-color-adjust: {color} !important;\n\
             }}\n\
             .print-sheet {{\n\
                 page-break-inside: avoid !important;\n\
                 break-inside: avoid !important;\n\
             }}\n\
         }}\n\
         @media screen {{\n\
             body {{\n\
                 margin: 0;\n\
                 padding: 0;\n\
                 font-size: {font}%;\n\
             }}\n\
         }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_text(title),
    )
}

/// Serializes the content and dispatches it to the platform print facility
/// in a fresh context. A blocked context aborts silently — the surrounding
/// page owns any user messaging.
pub fn dispatch<U: RenderUnit>(
    content: &PrintContent<U>,
    settings: &PrintSettings,
    styles: &str,
    title: &str,
    host: &dyn PrintHost,
) {
    let Some(mut context) = host.open_print_context() else {
        log::warn!("print context blocked by host; print skipped");
        return;
    };
    let body = serialize_body(content);
    let document = build_print_document(settings, styles, title, &body);
    context.write_document(&document);
    context.dispatch_print(PRINT_DISPATCH_DELAY);
}

fn escape_text(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
    output
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use findesk_printing::{
    MarginPreset, MeasureProbe, Measurement, Orientation, PageClip, PreviewSession, PrintContent,
    PrintContext, PrintHost, ScrollSink, StyleAccessError, StyleSource,
};

struct FixedProbe(f32);

impl<U> MeasureProbe<U> for FixedProbe {
    fn measure_height(&self, _: &U, _: u32) -> Measurement {
        Measurement::Px(self.0)
    }
}

#[derive(Default)]
struct RecordingSink {
    requests: Vec<u32>,
}

impl ScrollSink for RecordingSink {
    fn scroll_to_page(&mut self, page: u32) {
        self.requests.push(page);
    }
}

#[derive(Clone)]
struct RecordedDispatch {
    document: String,
    delay: Duration,
}

#[derive(Clone, Default)]
struct RecordingHost {
    dispatches: Arc<Mutex<Vec<RecordedDispatch>>>,
}

struct RecordingContext {
    document: String,
    sink: Arc<Mutex<Vec<RecordedDispatch>>>,
}

impl PrintHost for RecordingHost {
    fn open_print_context(&self) -> Option<Box<dyn PrintContext>> {
        Some(Box::new(RecordingContext {
            document: String::new(),
            sink: self.dispatches.clone(),
        }))
    }
}

impl PrintContext for RecordingContext {
    fn write_document(&mut self, html: &str) {
        self.document.push_str(html);
    }

    fn dispatch_print(self: Box<Self>, delay: Duration) {
        let mut guard = self.sink.lock().expect("lock poisoned");
        guard.push(RecordedDispatch {
            document: self.document,
            delay,
        });
    }
}

struct BlockedHost;

impl PrintHost for BlockedHost {
    fn open_print_context(&self) -> Option<Box<dyn PrintContext>> {
        None
    }
}

struct InlineStyles(&'static str);

impl StyleSource for InlineStyles {
    fn rules(&self) -> Result<String, StyleAccessError> {
        Ok(self.0.to_string())
    }
}

struct CrossOriginSheet;

impl StyleSource for CrossOriginSheet {
    fn rules(&self) -> Result<String, StyleAccessError> {
        Err(StyleAccessError("cdn.example.com stylesheet".into()))
    }
}

#[test]
fn single_document_preview_paginates_navigates_and_prints() {
    let probe = FixedProbe(2500.0);
    let content = PrintContent::Single("<h1>Invoice 2024-017</h1><p>rows</p>".to_string());
    let mut session = PreviewSession::open(content, &probe);

    // 2500 px over a 1075 px content box (A4 minus 0.25 in margins).
    assert_eq!(session.page_count(), 3);
    let frames = session.frames();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].slice.clip, PageClip::Fixed(1075));
    assert_eq!(frames[1].slice.offset_px, 1075);
    assert_eq!(frames[2].slice.clip, PageClip::Auto);
    assert_eq!(frames[2].label, "Page 3 of 3");

    let mut sink = RecordingSink::default();
    assert!(session.next_page(&mut sink));
    assert!(session.next_page(&mut sink));
    assert!(!session.next_page(&mut sink));
    assert_eq!(sink.requests, vec![2, 3]);

    let host = RecordingHost::default();
    let styles = findesk_printing::collect_styles(&[
        &InlineStyles("h1 { font-size: 18px; }"),
        &CrossOriginSheet,
    ]);
    session.print(&host, &styles, "Invoice 2024-017");

    let dispatches = host.dispatches.lock().expect("lock poisoned");
    assert_eq!(dispatches.len(), 1);
    let document = &dispatches[0].document;
    assert!(document.contains("<title>Invoice 2024-017</title>"));
    assert!(document.contains("h1 { font-size: 18px; }"));
    assert!(document.contains("size: A4 portrait;"));
    assert!(document.contains("margin: 0.25in;"));
    // The print body is the original content, not the cropped page windows.
    assert!(document.contains("<h1>Invoice 2024-017</h1><p>rows</p>"));
    assert_eq!(dispatches[0].delay, Duration::from_millis(500));
}

#[test]
fn multi_document_job_prints_one_sheet_per_page() {
    let probe = FixedProbe(0.0);
    let sheets = PrintContent::Sheets(vec![
        "<section>invoice</section>".to_string(),
        "<section>statement</section>".to_string(),
        "<section>overview</section>".to_string(),
    ]);
    let mut session = PreviewSession::open(sheets, &probe);
    assert_eq!(session.page_count(), 3);

    let host = RecordingHost::default();
    session.print(&host, "", "Coupon documents");

    let dispatches = host.dispatches.lock().expect("lock poisoned");
    let document = &dispatches[0].document;
    let body = document.split("<body>").nth(1).expect("body present");
    assert_eq!(body.matches("page-break-after: always").count(), 2);
    assert_eq!(body.matches("page-break-inside: avoid").count(), 3);
    assert!(body.contains("<section>overview</section>"));
}

#[test]
fn margin_change_repaginates_before_print_settings_are_read() {
    let probe = FixedProbe(2000.0);
    let content = PrintContent::Single("<p>long report</p>".to_string());
    let mut session = PreviewSession::open(content, &probe);
    assert_eq!(session.page_count(), 2);

    session.set_margin(MarginPreset::Two, &probe);
    assert_eq!(session.page_count(), 3);
    session.set_orientation(Orientation::Landscape, &probe);

    let host = RecordingHost::default();
    session.print(&host, "", "Report");
    let dispatches = host.dispatches.lock().expect("lock poisoned");
    assert!(dispatches[0].document.contains("margin: 2in;"));
    assert!(dispatches[0].document.contains("size: A4 landscape;"));
}

#[test]
fn blocked_host_aborts_without_side_effects() {
    let probe = FixedProbe(100.0);
    let content = PrintContent::Single("<p>doc</p>".to_string());
    let mut session = PreviewSession::open(content, &probe);
    session.print(&BlockedHost, "", "Doc");
    // No panic, no dispatch; the session remains usable.
    assert_eq!(session.page_count(), 1);
}

use crate::job::{ColorMode, FontScale, MarginPreset, Orientation, PrintJobId, PrintSettings};
use crate::layout::{paginate, PageClip, PageSlice, Pagination, PrintContent, RenderUnit};
use crate::measure::MeasureProbe;
use crate::navigator::{PageNavigator, ScrollSink};
use crate::serializer::{self, PrintHost};

/// Host callback invoked instead of, or in addition to, engine behavior.
pub type Hook = Box<dyn FnMut()>;

/// One visually distinct page frame for the preview renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFrame {
    pub page: u32,
    /// Frame box in pixels for the current orientation.
    pub width_px: u32,
    pub height_px: u32,
    /// Inner padding derived from the margin setting.
    pub padding_px: u32,
    pub font_scale_percent: u32,
    /// Whether this frame is the navigator's current page.
    pub active: bool,
    /// "Page i of n" caption.
    pub label: String,
    pub slice: PageSlice,
}

/// One print-preview session: owns the content (immutable for the session),
/// mutable settings starting from defaults, the computed pagination, and
/// the page navigator. Created when the preview surface is shown and
/// discarded when it is hidden; opening a new session discards any state
/// from the previous one.
pub struct PreviewSession<U> {
    job_id: PrintJobId,
    content: PrintContent<U>,
    settings: PrintSettings,
    pagination: Option<Pagination>,
    navigator: PageNavigator,
    on_print: Option<Hook>,
    on_close: Option<Hook>,
}

impl<U> PreviewSession<U> {
    /// Opens a session over `content` with default settings and computes the
    /// initial pagination. A not-yet-mounted probe leaves pagination pending;
    /// call [`PreviewSession::content_changed`] once it is ready.
    pub fn open<P: MeasureProbe<U>>(content: PrintContent<U>, probe: &P) -> Self {
        let settings = PrintSettings::default();
        let pagination = paginate(&content, &settings, probe);
        let page_count = pagination.as_ref().map_or(1, Pagination::page_count);
        Self {
            job_id: PrintJobId::new(),
            content,
            settings,
            pagination,
            navigator: PageNavigator::new(page_count),
            on_print: None,
            on_close: None,
        }
    }

    /// Registers an override for the print action. When present, printing
    /// invokes only this hook and the built-in serializer does nothing.
    pub fn with_print_hook(mut self, hook: Hook) -> Self {
        self.on_print = Some(hook);
        self
    }

    /// Registers a notification fired when the session closes.
    pub fn with_close_hook(mut self, hook: Hook) -> Self {
        self.on_close = Some(hook);
        self
    }

    pub fn job_id(&self) -> PrintJobId {
        self.job_id
    }

    pub fn settings(&self) -> PrintSettings {
        self.settings
    }

    pub fn content(&self) -> &PrintContent<U> {
        &self.content
    }

    pub fn page_count(&self) -> u32 {
        self.navigator.page_count()
    }

    pub fn current_page(&self) -> u32 {
        self.navigator.current_page()
    }

    /// Re-measures and re-paginates after a content-change notification
    /// (typically: the measurement probe became ready).
    pub fn content_changed<P: MeasureProbe<U>>(&mut self, probe: &P) {
        self.repaginate(probe);
    }

    /// Margin feeds the content box, so the change re-paginates.
    pub fn set_margin<P: MeasureProbe<U>>(&mut self, margin: MarginPreset, probe: &P) {
        self.settings.margin = margin;
        self.repaginate(probe);
    }

    /// Orientation feeds the content box, so the change re-paginates.
    pub fn set_orientation<P: MeasureProbe<U>>(&mut self, orientation: Orientation, probe: &P) {
        self.settings.orientation = orientation;
        self.repaginate(probe);
    }

    /// Presentation only; existing pages re-render with the new scale.
    pub fn set_font_scale(&mut self, font_scale: FontScale) {
        self.settings.font_scale = font_scale;
    }

    /// Presentation only; read fresh by the serializer at print time.
    pub fn set_color_mode(&mut self, color_mode: ColorMode) {
        self.settings.color_mode = color_mode;
    }

    fn repaginate<P: MeasureProbe<U>>(&mut self, probe: &P) {
        // A not-ready probe keeps the previous pagination; the session
        // waits for the next content-change trigger.
        if let Some(pagination) = paginate(&self.content, &self.settings, probe) {
            self.navigator.set_page_count(pagination.page_count());
            self.pagination = Some(pagination);
        }
    }

    /// Page frames for the preview renderer, one per paginated page. Until
    /// pagination is available a single default frame is produced.
    pub fn frames(&self) -> Vec<PageFrame> {
        let (width_px, height_px) = self.settings.page_size_px();
        let padding_px = self.settings.margin.px();
        let font_scale_percent = self.settings.font_scale.percent();

        match &self.pagination {
            Some(pagination) => {
                let total = pagination.page_count();
                pagination
                    .pages
                    .iter()
                    .map(|slice| PageFrame {
                        page: slice.number,
                        width_px,
                        height_px,
                        padding_px,
                        font_scale_percent,
                        active: slice.number == self.navigator.current_page(),
                        label: format!("Page {} of {}", slice.number, total),
                        slice: slice.clone(),
                    })
                    .collect()
            }
            None => vec![PageFrame {
                page: 1,
                width_px,
                height_px,
                padding_px,
                font_scale_percent,
                active: true,
                label: "Page 1".to_string(),
                slice: PageSlice {
                    number: 1,
                    unit: 0,
                    offset_px: 0,
                    clip: PageClip::Auto,
                },
            }],
        }
    }

    pub fn next_page(&mut self, sink: &mut dyn ScrollSink) -> bool {
        self.navigator.next(sink)
    }

    pub fn prev_page(&mut self, sink: &mut dyn ScrollSink) -> bool {
        self.navigator.prev(sink)
    }

    pub fn go_to_page(&mut self, page: u32, sink: &mut dyn ScrollSink) -> bool {
        self.navigator.go_to(page, sink)
    }

    /// Closes the session, discarding pagination state and notifying the
    /// host. An already-dispatched print context is not recalled.
    pub fn close(&mut self) {
        self.pagination = None;
        if let Some(hook) = self.on_close.as_mut() {
            hook();
        }
    }
}

impl<U: RenderUnit> PreviewSession<U> {
    /// Prints the session content. With a print hook registered, only the
    /// hook runs. Otherwise the serializer re-renders the original content
    /// with the settings read fresh now, and dispatches it to the host's
    /// print facility.
    pub fn print(&mut self, host: &dyn PrintHost, styles: &str, title: &str) {
        if let Some(hook) = self.on_print.as_mut() {
            hook();
            return;
        }
        serializer::dispatch(&self.content, &self.settings, styles, title, host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{FixedProbe, UnmountedProbe};
    use crate::navigator::NoScroll;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn sheets(n: usize) -> PrintContent<String> {
        PrintContent::Sheets((0..n).map(|i| format!("<p>sheet {i}</p>")).collect())
    }

    #[test]
    fn session_opens_with_default_settings_and_page_one() {
        let session = PreviewSession::open(sheets(3), &FixedProbe(0.0));
        assert_eq!(session.settings(), PrintSettings::default());
        assert_eq!(session.page_count(), 3);
        assert_eq!(session.current_page(), 1);
    }

    #[test]
    fn three_sheets_navigate_forward_then_saturate() {
        let mut sink = NoScroll;
        let mut session = PreviewSession::open(sheets(3), &FixedProbe(0.0));
        assert!(session.next_page(&mut sink));
        assert!(session.next_page(&mut sink));
        assert_eq!(session.current_page(), 3);
        assert!(!session.next_page(&mut sink));
        assert_eq!(session.current_page(), 3);
    }

    #[test]
    fn margin_change_repaginates_with_new_content_box() {
        let probe = FixedProbe(2000.0);
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut session = PreviewSession::open(content, &probe);
        // 2000 / 1075 rounds up to 2 pages at the default quarter-inch margin.
        assert_eq!(session.page_count(), 2);

        session.set_margin(MarginPreset::Two, &probe);
        // Content box shrinks to 1123 - 384 = 739; 2000 / 739 rounds up to 3.
        assert_eq!(session.page_count(), 3);
        assert_eq!(session.frames()[0].padding_px, 192);
    }

    #[test]
    fn margin_change_below_threshold_keeps_page_count() {
        let probe = FixedProbe(500.0);
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut session = PreviewSession::open(content, &probe);
        assert_eq!(session.page_count(), 1);
        assert_eq!(session.frames()[0].padding_px, 24);

        session.set_margin(MarginPreset::One, &probe);
        assert_eq!(session.page_count(), 1);
        assert_eq!(session.frames()[0].padding_px, 96);
    }

    #[test]
    fn orientation_change_repaginates_and_reclamps_current_page() {
        let probe = FixedProbe(2500.0);
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut sink = NoScroll;
        let mut session = PreviewSession::open(content, &probe);
        assert_eq!(session.page_count(), 3);
        session.go_to_page(3, &mut sink);

        session.set_orientation(Orientation::Landscape, &probe);
        assert_eq!(session.page_count(), 4);
        // Current page survives because it is still in range.
        assert_eq!(session.current_page(), 3);

        session.set_orientation(Orientation::Portrait, &probe);
        session.go_to_page(3, &mut sink);
        session.set_margin(MarginPreset::Quarter, &probe);
        assert_eq!(session.current_page(), 3);
    }

    #[test]
    fn font_and_color_changes_do_not_repaginate() {
        let probe = FixedProbe(2000.0);
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut session = PreviewSession::open(content, &probe);
        let before = session.page_count();

        session.set_font_scale(FontScale::Pct200);
        session.set_color_mode(ColorMode::Economy);
        assert_eq!(session.page_count(), before);
        assert_eq!(session.frames()[0].font_scale_percent, 200);
    }

    #[test]
    fn pending_probe_shows_default_frame_until_ready() {
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut session = PreviewSession::open(content, &UnmountedProbe);
        let frames = session.frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].label, "Page 1");
        assert!(frames[0].active);

        session.content_changed(&FixedProbe(2000.0));
        assert_eq!(session.page_count(), 2);
        assert_eq!(session.frames()[0].label, "Page 1 of 2");
    }

    #[test]
    fn frames_mark_the_active_page() {
        let mut sink = NoScroll;
        let mut session = PreviewSession::open(sheets(3), &FixedProbe(0.0));
        session.next_page(&mut sink);
        let frames = session.frames();
        assert!(!frames[0].active);
        assert!(frames[1].active);
        assert!(!frames[2].active);
        assert_eq!(frames[1].label, "Page 2 of 3");
    }

    #[test]
    fn print_hook_overrides_the_serializer() {
        struct PanicHost;
        impl PrintHost for PanicHost {
            fn open_print_context(&self) -> Option<Box<dyn crate::serializer::PrintContext>> {
                panic!("serializer must not run when a print hook is registered");
            }
        }

        let fired = Rc::new(Cell::new(0u32));
        let counter = fired.clone();
        let mut session = PreviewSession::open(sheets(1), &FixedProbe(0.0))
            .with_print_hook(Box::new(move || counter.set(counter.get() + 1)));

        session.print(&PanicHost, "", "Docs");
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn blocked_print_context_is_a_silent_noop() {
        struct BlockedHost;
        impl PrintHost for BlockedHost {
            fn open_print_context(&self) -> Option<Box<dyn crate::serializer::PrintContext>> {
                None
            }
        }

        let mut session = PreviewSession::open(sheets(1), &FixedProbe(0.0));
        // Nothing to assert beyond "does not panic"; failures are absorbed.
        session.print(&BlockedHost, "", "Docs");
    }

    #[test]
    fn print_reads_settings_fresh_at_invocation() {
        #[derive(Default)]
        struct CapturingContext {
            sink: Arc<Mutex<Vec<String>>>,
        }
        impl crate::serializer::PrintContext for CapturingContext {
            fn write_document(&mut self, html: &str) {
                self.sink.lock().expect("lock poisoned").push(html.to_string());
            }
            fn dispatch_print(self: Box<Self>, _delay: Duration) {}
        }
        struct CapturingHost {
            sink: Arc<Mutex<Vec<String>>>,
        }
        impl PrintHost for CapturingHost {
            fn open_print_context(&self) -> Option<Box<dyn crate::serializer::PrintContext>> {
                Some(Box::new(CapturingContext {
                    sink: self.sink.clone(),
                }))
            }
        }

        let sink = Arc::new(Mutex::new(Vec::new()));
        let host = CapturingHost { sink: sink.clone() };
        let probe = FixedProbe(100.0);
        let content = PrintContent::Single("<p>doc</p>".to_string());
        let mut session = PreviewSession::open(content, &probe);

        session.set_orientation(Orientation::Landscape, &probe);
        session.set_font_scale(FontScale::Pct150);
        session.print(&host, ".case { color: black; }", "Coupon Statement");

        let documents = sink.lock().expect("lock poisoned");
        assert_eq!(documents.len(), 1);
        assert!(documents[0].contains("size: A4 landscape;"));
        assert!(documents[0].contains("font-size: 150%;"));
        assert!(documents[0].contains(".case { color: black; }"));
        assert!(documents[0].contains("<title>Coupon Statement</title>"));
    }

    #[test]
    fn close_fires_the_hook_and_discards_pagination() {
        let closed = Rc::new(Cell::new(false));
        let flag = closed.clone();
        let mut session = PreviewSession::open(sheets(2), &FixedProbe(0.0))
            .with_close_hook(Box::new(move || flag.set(true)));

        session.close();
        assert!(closed.get());
        // Back to the default single frame once pagination is discarded.
        assert_eq!(session.frames().len(), 1);
    }
}

/// Receives best-effort scroll requests when navigation succeeds. A sink
/// that cannot locate the page frame simply does nothing.
pub trait ScrollSink {
    fn scroll_to_page(&mut self, page: u32);
}

/// Sink for hosts without a scrollable viewport.
#[derive(Debug, Default)]
pub struct NoScroll;

impl ScrollSink for NoScroll {
    fn scroll_to_page(&mut self, _page: u32) {}
}

/// Tracks the active preview page, clamped to `[1, page_count]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigator {
    current: u32,
    count: u32,
}

impl PageNavigator {
    pub fn new(page_count: u32) -> Self {
        Self {
            current: 1,
            count: page_count.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current
    }

    pub fn page_count(&self) -> u32 {
        self.count
    }

    /// Re-clamps the current page after a re-pagination.
    pub fn set_page_count(&mut self, page_count: u32) {
        self.count = page_count.max(1);
        self.current = self.current.min(self.count);
    }

    /// Advances one page; no-op at the last page.
    pub fn next(&mut self, sink: &mut dyn ScrollSink) -> bool {
        if self.current >= self.count {
            return false;
        }
        self.current += 1;
        sink.scroll_to_page(self.current);
        true
    }

    /// Goes back one page; no-op at page 1.
    pub fn prev(&mut self, sink: &mut dyn ScrollSink) -> bool {
        if self.current <= 1 {
            return false;
        }
        self.current -= 1;
        sink.scroll_to_page(self.current);
        true
    }

    /// Jumps to a page; no-op when `page` is outside `[1, page_count]`.
    pub fn go_to(&mut self, page: u32, sink: &mut dyn ScrollSink) -> bool {
        if page < 1 || page > self.count {
            return false;
        }
        self.current = page;
        sink.scroll_to_page(page);
        true
    }
}

use std::borrow::Cow;

use crate::job::PrintSettings;
use crate::measure::{Measurement, MeasureProbe};

/// Opaque renderable content unit. The engine never interprets the markup;
/// it only measures, windows, and re-serializes it.
/// 引擎不解析標記內容，只負責量測、切頁與重新序列化。
pub trait RenderUnit {
    fn html(&self) -> Cow<'_, str>;
}

impl RenderUnit for String {
    fn html(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RenderUnit for &str {
    fn html(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// Content supplied to a print preview session.
/// 提供給列印預覽作業的內容。
#[derive(Debug, Clone)]
pub enum PrintContent<U> {
    /// One renderable tree, split by measured height when it overflows.
    Single(U),
    /// Multi-page mode: each unit maps 1:1 to a printed page, in order.
    Sheets(Vec<U>),
}

impl<U> PrintContent<U> {
    pub fn is_multi_page(&self) -> bool {
        matches!(self, PrintContent::Sheets(_))
    }

    pub fn unit_count(&self) -> usize {
        match self {
            PrintContent::Single(_) => 1,
            PrintContent::Sheets(units) => units.len(),
        }
    }

    pub fn unit(&self, index: usize) -> Option<&U> {
        match self {
            PrintContent::Single(unit) => (index == 0).then_some(unit),
            PrintContent::Sheets(units) => units.get(index),
        }
    }
}

/// Vertical clipping applied to a page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageClip {
    /// Overflow-clipped frame of exactly this height.
    Fixed(u32),
    /// Natural height; used for the last page so trailing content is never
    /// truncated, and for whole-unit pages.
    Auto,
}

/// One paginated slice: a vertical window over a content unit.
/// 單一頁面切片：內容單元上的垂直視窗。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice {
    /// 1-based, contiguous page number.
    pub number: u32,
    /// Index of the content unit this page renders.
    pub unit: usize,
    /// Upward shift of the full content inside the clipped frame.
    pub offset_px: u32,
    pub clip: PageClip,
}

/// Result of partitioning content into pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub pages: Vec<PageSlice>,
}

impl Pagination {
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// Partitions content into 1..N logical pages.
/// 將內容分割為 1..N 個邏輯頁面。
///
/// Multi-page content maps one unit to one page with no height-based
/// splitting. Single content is measured by the probe at the printable
/// width; when it overflows, pages are fixed-height windows over the full
/// render (`ceil(height / content_height)` of them) with the last page left
/// at natural height. Content is not reflowed around page boundaries — a
/// table row or paragraph may visually split across two pages; that is the
/// accepted slicing strategy, not a defect.
///
/// Returns `None` when the probe is not ready; the caller keeps its previous
/// pagination and waits for the next content-change trigger.
pub fn paginate<U, P>(
    content: &PrintContent<U>,
    settings: &PrintSettings,
    probe: &P,
) -> Option<Pagination>
where
    P: MeasureProbe<U>,
{
    match content {
        PrintContent::Sheets(units) => {
            if units.is_empty() {
                // At least one page even for empty documents.
                return Some(Pagination {
                    pages: vec![PageSlice {
                        number: 1,
                        unit: 0,
                        offset_px: 0,
                        clip: PageClip::Auto,
                    }],
                });
            }
            let pages = (0..units.len())
                .map(|index| PageSlice {
                    number: index as u32 + 1,
                    unit: index,
                    offset_px: 0,
                    clip: PageClip::Auto,
                })
                .collect();
            Some(Pagination { pages })
        }
        PrintContent::Single(unit) => {
            let height = match probe.measure_height(unit, settings.content_width_px()) {
                Measurement::NotReady => return None,
                Measurement::Px(height) => height.max(0.0),
            };
            let content_height = settings.content_height_px();

            if height <= content_height as f32 {
                return Some(Pagination {
                    pages: vec![PageSlice {
                        number: 1,
                        unit: 0,
                        offset_px: 0,
                        clip: PageClip::Auto,
                    }],
                });
            }

            let page_count = (height / content_height as f32).ceil() as u32;
            let pages = (0..page_count)
                .map(|index| PageSlice {
                    number: index + 1,
                    unit: 0,
                    offset_px: index * content_height,
                    clip: if index + 1 == page_count {
                        PageClip::Auto
                    } else {
                        PageClip::Fixed(content_height)
                    },
                })
                .collect();
            Some(Pagination { pages })
        }
    }
}

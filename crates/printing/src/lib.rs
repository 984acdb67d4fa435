//! Print preview and pagination engine shared by FinDesk surfaces.
//!
//! The engine takes opaque renderable content (one tree, or an explicit
//! sheet list in multi-page mode), measures it through a host-supplied
//! probe, partitions it into A4-sized page windows, tracks preview
//! navigation, and serializes a standalone print document dispatched to the
//! platform print facility behind the [`PrintHost`] trait. All failures
//! named by the error model (unmounted probe, unreadable style source,
//! blocked print context, out-of-range navigation) are absorbed locally and
//! never surface to the host page.

pub mod job;
pub mod layout;
pub mod measure;
pub mod navigator;
pub mod preview;
pub mod serializer;

pub use job::{
    ColorMode, FontScale, MarginPreset, Orientation, PrintJobId, PrintSettings, A4_HEIGHT_PX,
    A4_WIDTH_PX, PX_PER_INCH,
};
pub use layout::{paginate, PageClip, PageSlice, Pagination, PrintContent, RenderUnit};
pub use measure::{MeasureProbe, Measurement, TextMetricsProbe};
pub use navigator::{NoScroll, PageNavigator, ScrollSink};
pub use preview::{PageFrame, PreviewSession};
pub use serializer::{
    build_print_document, collect_styles, dispatch, serialize_body, PrintContext, PrintHost,
    StyleAccessError, StyleSource, PRINT_DISPATCH_DELAY,
};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// A4 page width in CSS pixels at 96 DPI (210 mm).
pub const A4_WIDTH_PX: u32 = 794;
/// A4 page height in CSS pixels at 96 DPI (297 mm).
pub const A4_HEIGHT_PX: u32 = 1123;
/// Pixels per inch for all on-screen page geometry.
pub const PX_PER_INCH: u32 = 96;

/// Opaque identifier for a print preview session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrintJobId(u64);

impl PrintJobId {
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for PrintJobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrintJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "print-job-{}", self.0)
    }
}

/// Orientation of a print page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Keyword used inside the `@page size` rule.
    pub const fn css_keyword(self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Colour reproduction mode for printed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Backgrounds and colours are reproduced exactly as rendered.
    #[default]
    Exact,
    /// The platform may drop backgrounds to save ink.
    Economy,
}

impl ColorMode {
    /// Value for the `print-color-adjust` property.
    pub const fn css_value(self) -> &'static str {
        match self {
            ColorMode::Exact => "exact",
            ColorMode::Economy => "economy",
        }
    }
}

/// Enumerated page margin, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarginPreset {
    #[default]
    Quarter,
    Half,
    ThreeQuarters,
    One,
    OneAndQuarter,
    OneAndHalf,
    Two,
}

impl MarginPreset {
    pub const ALL: [MarginPreset; 7] = [
        MarginPreset::Quarter,
        MarginPreset::Half,
        MarginPreset::ThreeQuarters,
        MarginPreset::One,
        MarginPreset::OneAndQuarter,
        MarginPreset::OneAndHalf,
        MarginPreset::Two,
    ];

    pub const fn inches(self) -> f32 {
        match self {
            MarginPreset::Quarter => 0.25,
            MarginPreset::Half => 0.5,
            MarginPreset::ThreeQuarters => 0.75,
            MarginPreset::One => 1.0,
            MarginPreset::OneAndQuarter => 1.25,
            MarginPreset::OneAndHalf => 1.5,
            MarginPreset::Two => 2.0,
        }
    }

    /// Inches as they appear in CSS (`margin: 0.25in`).
    pub const fn css_inches(self) -> &'static str {
        match self {
            MarginPreset::Quarter => "0.25",
            MarginPreset::Half => "0.5",
            MarginPreset::ThreeQuarters => "0.75",
            MarginPreset::One => "1",
            MarginPreset::OneAndQuarter => "1.25",
            MarginPreset::OneAndHalf => "1.5",
            MarginPreset::Two => "2",
        }
    }

    /// Margin in pixels at 96 DPI.
    pub const fn px(self) -> u32 {
        match self {
            MarginPreset::Quarter => 24,
            MarginPreset::Half => 48,
            MarginPreset::ThreeQuarters => 72,
            MarginPreset::One => 96,
            MarginPreset::OneAndQuarter => 120,
            MarginPreset::OneAndHalf => 144,
            MarginPreset::Two => 192,
        }
    }
}

/// Enumerated font scale, in percent of the document's base size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontScale {
    Pct50,
    Pct60,
    Pct70,
    Pct80,
    Pct90,
    #[default]
    Pct100,
    Pct110,
    Pct120,
    Pct130,
    Pct150,
    Pct175,
    Pct200,
}

impl FontScale {
    pub const ALL: [FontScale; 12] = [
        FontScale::Pct50,
        FontScale::Pct60,
        FontScale::Pct70,
        FontScale::Pct80,
        FontScale::Pct90,
        FontScale::Pct100,
        FontScale::Pct110,
        FontScale::Pct120,
        FontScale::Pct130,
        FontScale::Pct150,
        FontScale::Pct175,
        FontScale::Pct200,
    ];

    pub const fn percent(self) -> u32 {
        match self {
            FontScale::Pct50 => 50,
            FontScale::Pct60 => 60,
            FontScale::Pct70 => 70,
            FontScale::Pct80 => 80,
            FontScale::Pct90 => 90,
            FontScale::Pct100 => 100,
            FontScale::Pct110 => 110,
            FontScale::Pct120 => 120,
            FontScale::Pct130 => 130,
            FontScale::Pct150 => 150,
            FontScale::Pct175 => 175,
            FontScale::Pct200 => 200,
        }
    }
}

/// User-adjustable print settings. `Default` is the reset state every new
/// preview session starts from; settings are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrintSettings {
    pub margin: MarginPreset,
    pub font_scale: FontScale,
    pub orientation: Orientation,
    pub color_mode: ColorMode,
}

impl PrintSettings {
    /// Full page box in pixels for the current orientation.
    pub const fn page_size_px(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Portrait => (A4_WIDTH_PX, A4_HEIGHT_PX),
            Orientation::Landscape => (A4_HEIGHT_PX, A4_WIDTH_PX),
        }
    }

    /// Printable width: page width minus the left/right margin allowance.
    pub fn content_width_px(&self) -> u32 {
        let (width, _) = self.page_size_px();
        width.saturating_sub(2 * self.margin.px()).max(1)
    }

    /// Printable height per page: page height minus the top/bottom margin
    /// allowance. Margin and orientation both feed this value, so changing
    /// either invalidates an existing pagination.
    pub fn content_height_px(&self) -> u32 {
        let (_, height) = self.page_size_px();
        height.saturating_sub(2 * self.margin.px()).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reset_state() {
        let settings = PrintSettings::default();
        assert_eq!(settings.margin, MarginPreset::Quarter);
        assert_eq!(settings.font_scale.percent(), 100);
        assert_eq!(settings.orientation, Orientation::Portrait);
        assert_eq!(settings.color_mode, ColorMode::Exact);
    }

    #[test]
    fn half_inch_margin_gives_a4_content_height_of_1027() {
        let settings = PrintSettings {
            margin: MarginPreset::Half,
            ..PrintSettings::default()
        };
        assert_eq!(settings.content_height_px(), A4_HEIGHT_PX - 96);
        assert_eq!(settings.content_height_px(), 1027);
    }

    #[test]
    fn landscape_swaps_page_axes() {
        let settings = PrintSettings {
            orientation: Orientation::Landscape,
            ..PrintSettings::default()
        };
        assert_eq!(settings.page_size_px(), (A4_HEIGHT_PX, A4_WIDTH_PX));
        assert_eq!(settings.content_height_px(), A4_WIDTH_PX - 48);
    }

    #[test]
    fn margin_pixels_are_96_dpi() {
        assert_eq!(MarginPreset::Quarter.px(), 24);
        assert_eq!(MarginPreset::One.px(), 96);
        assert_eq!(MarginPreset::Two.px(), 192);
    }

    #[test]
    fn job_ids_are_unique() {
        assert_ne!(PrintJobId::new(), PrintJobId::new());
    }
}

use crate::layout::RenderUnit;

/// Outcome of asking the probe for a rendered height.
/// 量測探針回報的渲染高度結果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// The probe element is not mounted yet; pagination waits for the next
    /// content-change trigger.
    NotReady,
    /// Natural rendered height of the content, in pixels.
    Px(f32),
}

/// Off-screen measurement of content at a fixed target width.
/// 以固定寬度在畫面外量測內容的自然高度。
///
/// The probe render must never be visible to the user; hosts typically keep
/// it off-canvas with visibility suppressed. Absent content measures 0 px.
pub trait MeasureProbe<U: ?Sized> {
    fn measure_height(&self, unit: &U, width_px: u32) -> Measurement;
}

/// Rough text-metrics probe for hosts without a layout engine (CLI, tests).
///
/// Estimates the rendered height of an HTML fragment from its visible text
/// length, an average character width of 0.6 × font size, and forced breaks
/// at block-level tags. Hosts with a real layout engine should implement
/// [`MeasureProbe`] against it instead.
#[derive(Debug, Clone, Copy)]
pub struct TextMetricsProbe {
    pub font_size_px: f32,
    pub line_height_px: f32,
}

impl Default for TextMetricsProbe {
    fn default() -> Self {
        Self {
            font_size_px: 12.0,
            line_height_px: 16.0,
        }
    }
}

const BLOCK_TAGS: [&str; 7] = ["<br", "<p", "<div", "<tr", "<li", "<h1", "<h2"];

impl<U: RenderUnit> MeasureProbe<U> for TextMetricsProbe {
    fn measure_height(&self, unit: &U, width_px: u32) -> Measurement {
        let html = unit.html();
        let lower = html.to_ascii_lowercase();
        let forced_breaks: usize = BLOCK_TAGS
            .iter()
            .map(|tag| lower.matches(tag).count())
            .sum();

        let text_chars = visible_text_len(&html);
        let char_width = (self.font_size_px * 0.6).max(1.0);
        let chars_per_line = (width_px as f32 / char_width).floor().max(1.0);
        let wrapped_lines = (text_chars as f32 / chars_per_line).ceil();

        let lines = wrapped_lines + forced_breaks as f32;
        Measurement::Px(lines * self.line_height_px)
    }
}

fn visible_text_len(html: &str) -> usize {
    let mut in_tag = false;
    let mut count = 0usize;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag && !ch.is_whitespace() => count += 1,
            _ => {}
        }
    }
    count
}

#[cfg(test)]
pub(crate) struct FixedProbe(pub f32);

#[cfg(test)]
impl<U> MeasureProbe<U> for FixedProbe {
    fn measure_height(&self, _: &U, _: u32) -> Measurement {
        Measurement::Px(self.0)
    }
}

#[cfg(test)]
pub(crate) struct UnmountedProbe;

#[cfg(test)]
impl<U> MeasureProbe<U> for UnmountedProbe {
    fn measure_height(&self, _: &U, _: u32) -> Measurement {
        Measurement::NotReady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_measures_zero() {
        let probe = TextMetricsProbe::default();
        match probe.measure_height(&String::new(), 700) {
            Measurement::Px(height) => assert_eq!(height, 0.0),
            other => panic!("unexpected measurement: {other:?}"),
        }
    }

    #[test]
    fn taller_content_measures_taller() {
        let probe = TextMetricsProbe::default();
        let short = "<p>one line</p>".to_string();
        let long = "<p>one line</p>".repeat(40);
        let Measurement::Px(a) = probe.measure_height(&short, 700) else {
            panic!("short not measured");
        };
        let Measurement::Px(b) = probe.measure_height(&long, 700) else {
            panic!("long not measured");
        };
        assert!(b > a);
    }

    #[test]
    fn markup_does_not_count_as_text() {
        let probe = TextMetricsProbe::default();
        let Measurement::Px(tagged) =
            probe.measure_height(&"<span class=\"x\">hi</span>".to_string(), 700)
        else {
            panic!("not measured");
        };
        let Measurement::Px(bare) = probe.measure_height(&"hi".to_string(), 700) else {
            panic!("not measured");
        };
        assert_eq!(tagged, bare);
    }
}

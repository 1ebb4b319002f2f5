use serde::{Deserialize, Serialize};

/// Distance from the bottom of the document, in CSS pixels, that still counts
/// as "read to the end".
pub const BOTTOM_THRESHOLD: f64 = 50.0;

/// One reading of the scroll container's geometry.
///
/// Field names follow the JSON the measurement script returns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub document_height: f64,
    pub scroll_offset: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(viewport_height: f64, document_height: f64, scroll_offset: f64) -> Self {
        Self {
            viewport_height,
            document_height,
            scroll_offset,
        }
    }

    /// How far the content can scroll. Zero when it fits in the viewport.
    #[must_use]
    pub fn scrollable_range(&self) -> f64 {
        let range = self.document_height - self.viewport_height;
        if range.is_finite() && range > 0.0 {
            range
        } else {
            0.0
        }
    }

    /// Reading progress through the document.
    ///
    /// Content that fits without scrolling counts as fully read.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let range = self.scrollable_range();
        if range == 0.0 {
            return Progress::COMPLETE;
        }
        Progress::from_percent(self.scroll_offset / range * 100.0)
    }

    /// True once the bottom edge of the viewport is within
    /// [`BOTTOM_THRESHOLD`] of the end of the document.
    #[must_use]
    pub fn reached_bottom(&self) -> bool {
        self.scroll_offset + self.viewport_height >= self.document_height - BOTTOM_THRESHOLD
    }
}

/// A percentage clamped to `0.0..=100.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Progress(f64);

impl Progress {
    pub const ZERO: Self = Self(0.0);
    pub const COMPLETE: Self = Self(100.0);

    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent.is_nan() {
            return Self::ZERO;
        }
        Self(percent.clamp(0.0, 100.0))
    }

    #[must_use]
    pub fn percent(self) -> f64 {
        self.0
    }

    /// CSS width value, e.g. `"42.5%"`.
    #[must_use]
    pub fn css_width(self) -> String {
        format!("{}%", self.0)
    }
}

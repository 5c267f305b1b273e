//! Downsampling of dense series for display.
//!
//! Charts get slow and unreadable past a thousand or so points. Long series
//! are thinned with a fixed stride; the last point always survives so the
//! chart ends on the latest reading. Render hints come from the same density
//! classification so renderers never re-derive it.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::readings::TimedReading;

/// Series longer than this are sampled.
pub const SAMPLE_THRESHOLD: usize = 1000;
/// Series longer than this use a stride of 3.
pub const MEDIUM_DENSITY_THRESHOLD: usize = 2000;
/// Series longer than this use a stride of 5.
pub const HIGH_DENSITY_THRESHOLD: usize = 5000;

/// One chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub timestamp: NaiveDateTime,
    pub celsius: f64,
}

impl From<&TimedReading> for SamplePoint {
    fn from(r: &TimedReading) -> Self {
        Self {
            timestamp: r.recorded_at,
            celsius: r.temperature(),
        }
    }
}

/// How crowded a series is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityTier {
    /// Up to 100 points.
    Sparse,
    /// Up to 1000 points; shown unsampled.
    Normal,
    /// Up to 2000 points.
    Dense,
    /// Up to 5000 points.
    VeryDense,
    /// More than 5000 points.
    Extreme,
}

impl DensityTier {
    pub fn classify(len: usize) -> Self {
        if len > HIGH_DENSITY_THRESHOLD {
            DensityTier::Extreme
        } else if len > MEDIUM_DENSITY_THRESHOLD {
            DensityTier::VeryDense
        } else if len > SAMPLE_THRESHOLD {
            DensityTier::Dense
        } else if len > 100 {
            DensityTier::Normal
        } else {
            DensityTier::Sparse
        }
    }

    /// Whether series in this tier are thinned.
    pub fn should_sample(&self) -> bool {
        *self >= DensityTier::Dense
    }

    /// Stride used for this tier.
    pub fn sample_rate(&self) -> usize {
        match self {
            DensityTier::Sparse | DensityTier::Normal => 1,
            DensityTier::Dense | DensityTier::VeryDense => 3,
            DensityTier::Extreme => 5,
        }
    }

    pub fn render_hints(&self) -> RenderHints {
        let (point_radius, line_width, chart_height, label_interval) = match self {
            DensityTier::Sparse => (4.0, 2.0, 300, 1),
            DensityTier::Normal => (2.0, 2.0, 300, 5),
            DensityTier::Dense => (1.0, 1.5, 350, 10),
            DensityTier::VeryDense => (0.0, 1.0, 400, 20),
            DensityTier::Extreme => (0.0, 1.0, 450, 50),
        };
        RenderHints {
            density: *self,
            point_radius,
            line_width,
            chart_height,
            label_interval,
        }
    }
}

/// Presentation hints for a chart of the sampled series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderHints {
    pub density: DensityTier,
    /// Marker radius in pixels; 0 hides markers.
    pub point_radius: f32,
    pub line_width: f32,
    /// Target chart height in pixels.
    pub chart_height: u32,
    /// Label every n-th x-axis tick.
    pub label_interval: usize,
}

/// A series ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampledSeries<T> {
    pub series: Vec<T>,
    pub hints: RenderHints,
    /// Stride that was applied; 1 when unsampled.
    pub sample_rate: usize,
    /// Length of the input series.
    pub original_len: usize,
}

impl<T> SampledSeries<T> {
    pub fn is_sampled(&self) -> bool {
        self.hints.density.should_sample()
    }
}

/// Whether a series of `len` points gets sampled.
pub fn should_sample(len: usize) -> bool {
    DensityTier::classify(len).should_sample()
}

/// Stride for a series of `len` points.
pub fn sample_rate(len: usize) -> usize {
    DensityTier::classify(len).sample_rate()
}

/// Thin a chronologically ascending series for display.
///
/// Keeps indices `0, rate, 2*rate, ...` plus the final point. Series of up
/// to [`SAMPLE_THRESHOLD`] points come back unchanged.
pub fn sample_for_display<T: Clone>(points: &[T]) -> SampledSeries<T> {
    let tier = DensityTier::classify(points.len());
    let rate = tier.sample_rate();

    let series = if tier.should_sample() {
        let mut out: Vec<T> = points.iter().step_by(rate).cloned().collect();
        let last = points.len() - 1;
        if last % rate != 0 {
            out.push(points[last].clone());
        }
        out
    } else {
        points.to_vec()
    };

    SampledSeries {
        series,
        hints: tier.render_hints(),
        sample_rate: rate,
        original_len: points.len(),
    }
}

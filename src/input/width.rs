//! Velocity-driven pen width.
//!
//! Each sample's travel distance stands in for pen speed: short hops (the
//! writer slowing down or pausing) let the line swell towards `max_width`,
//! long hops thin it towards `min_width`. The coefficients are derived from
//! the width range so a single sample can grow the width by at most 0.1 and
//! shrink it by at most 1.0, whatever the configured bounds.

use crate::error::{PadError, PadResult};

/// Travel per sample below which the pen is treated as slowing down.
pub const DEFAULT_MIN_DISTANCE: f64 = 6.0;
/// Expected worst-case travel per sample.
pub const DEFAULT_MAX_DISTANCE: f64 = 500.0;

/// Width bounds plus the growth/decay coefficients derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthParameters {
    pub min_width: f64,
    pub max_width: f64,
    pub default_width: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    growth_rate: f64,
    decay_rate: f64,
}

impl WidthParameters {
    /// Validates the bounds and derives the per-sample coefficients.
    ///
    /// `default_width` is clamped into `[min_width, max_width]`.
    pub fn new(
        min_width: f64,
        max_width: f64,
        default_width: f64,
        min_distance: f64,
        max_distance: f64,
    ) -> PadResult<Self> {
        let all_finite = [min_width, max_width, default_width, min_distance, max_distance]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(PadError::InvalidConfig(
                "pen widths and distances must be finite".to_string(),
            ));
        }
        if min_width <= 0.0 || min_width >= max_width {
            return Err(PadError::InvalidConfig(format!(
                "min_width ({min_width}) must be positive and below max_width ({max_width})"
            )));
        }
        if min_distance <= 0.0 || max_distance <= 0.0 {
            return Err(PadError::InvalidConfig(format!(
                "sampling distances must be positive (min {min_distance}, max {max_distance})"
            )));
        }

        let span = max_width - min_width;
        Ok(Self {
            min_width,
            max_width,
            default_width: default_width.clamp(min_width, max_width),
            min_distance,
            max_distance,
            growth_rate: 1.0 / (10.0 * span * min_distance),
            decay_rate: 1.0 / (max_distance * span),
        })
    }

    /// Uses the default sampling distances.
    pub fn with_widths(min_width: f64, max_width: f64, default_width: f64) -> PadResult<Self> {
        Self::new(
            min_width,
            max_width,
            default_width,
            DEFAULT_MIN_DISTANCE,
            DEFAULT_MAX_DISTANCE,
        )
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    /// Width following `current` after a sample that travelled `distance`.
    pub fn next_width(&self, current: f64, distance: f64) -> f64 {
        if distance < self.min_distance {
            let grown = current
                + (self.max_width - current) * (self.min_distance - distance) * self.growth_rate;
            grown.min(self.max_width)
        } else if distance > self.min_distance {
            let shrunk = current - (current - self.min_width) * distance * self.decay_rate;
            shrunk.max(self.min_width)
        } else {
            current
        }
    }
}

/// Running pen width for the stroke in progress.
#[derive(Debug, Clone)]
pub struct WidthEstimator {
    params: WidthParameters,
    current: f64,
}

impl WidthEstimator {
    pub fn new(params: WidthParameters) -> Self {
        Self {
            current: params.default_width,
            params,
        }
    }

    pub fn params(&self) -> &WidthParameters {
        &self.params
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Feeds one sample distance and returns the updated width.
    pub fn advance(&mut self, distance: f64) -> f64 {
        self.current = self.params.next_width(self.current, distance);
        self.current
    }

    /// Restores the starting width for the next stroke.
    pub fn reset(&mut self) {
        self.current = self.params.default_width;
    }
}

use crate::error::{PlotError, PlotResult};

/// Linear mapping between a data domain and a pixel span.
///
/// The domain may be descending; projection then runs the axis backwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> PlotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(PlotError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    /// Maps `value` onto `[pixel_start, pixel_end]`, with `domain_start` landing
    /// on `pixel_start`.
    pub fn domain_to_pixel(self, value: f64, pixel_start: f64, pixel_end: f64) -> PlotResult<f64> {
        if !value.is_finite() {
            return Err(PlotError::InvalidData("value must be finite".to_owned()));
        }
        validate_pixel_span(pixel_start, pixel_end)?;

        // Halved operands keep spans near f64::MAX finite.
        let half_span = self.domain_end / 2.0 - self.domain_start / 2.0;
        let normalized = (value / 2.0 - self.domain_start / 2.0) / half_span;
        Ok(pixel_start + normalized * (pixel_end - pixel_start))
    }

    pub fn pixel_to_domain(self, pixel: f64, pixel_start: f64, pixel_end: f64) -> PlotResult<f64> {
        if !pixel.is_finite() {
            return Err(PlotError::InvalidData("pixel must be finite".to_owned()));
        }
        validate_pixel_span(pixel_start, pixel_end)?;

        let normalized = (pixel - pixel_start) / (pixel_end - pixel_start);
        Ok(self.domain_start * (1.0 - normalized) + self.domain_end * normalized)
    }

    /// Returns `true` when `value` lies between the domain bounds, inclusive.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        let (lo, hi) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        value >= lo && value <= hi
    }
}

fn validate_pixel_span(pixel_start: f64, pixel_end: f64) -> PlotResult<()> {
    if !pixel_start.is_finite() || !pixel_end.is_finite() || pixel_start == pixel_end {
        return Err(PlotError::InvalidData(
            "pixel span must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}

/// Widens a degenerate `(v, v)` range so it can back a scale.
///
/// Non-degenerate ranges are returned unchanged.
#[must_use]
pub fn nonsingular(start: f64, end: f64, expander: f64) -> (f64, f64) {
    if start != end {
        return (start, end);
    }
    if start == 0.0 {
        return (-expander, expander);
    }
    let delta = expander * start.abs();
    ((start - delta).max(f64::MIN), (end + delta).min(f64::MAX))
}

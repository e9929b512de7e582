use tracing::warn;

/// Upper bound on ticks generated per axis.
pub const MAX_TICKS: usize = 1000;

const Y_TICK_TARGET_SPACING_PX: f64 = 36.0;

const NICE_MANTISSAS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];
const MAX_Y_BINS: usize = 9;
/// Tick labels at or beyond this magnitude switch to exponent notation.
const SCIENTIFIC_LABEL_ABOVE: f64 = 1e9;

/// `start, start + step, …` strictly below `end`.
///
/// Empty when `step <= 0` or the range is empty or descending.
#[must_use]
pub fn arange_ticks(start: i64, end: i64, step: i64) -> Vec<i64> {
    if step <= 0 || start >= end {
        return Vec::new();
    }

    let span = i128::from(end) - i128::from(start);
    let count = (span - 1) / i128::from(step) + 1;
    let count = usize::try_from(count).unwrap_or(usize::MAX);
    if count > MAX_TICKS {
        warn!(count, limit = MAX_TICKS, "truncating major x ticks");
    }

    (0..count.min(MAX_TICKS))
        .filter_map(|index| {
            i64::try_from(i128::from(start) + i128::from(step) * index as i128).ok()
        })
        .collect()
}

/// Multiples of `step` inside `[lo, hi]` that are not in `majors`.
///
/// `majors` must be sorted ascending.
#[must_use]
pub fn multiple_ticks(view: (f64, f64), step: i64, majors: &[i64]) -> Vec<i64> {
    if step <= 0 || !view.0.is_finite() || !view.1.is_finite() {
        return Vec::new();
    }

    let (lo, hi) = if view.0 <= view.1 {
        (view.0, view.1)
    } else {
        (view.1, view.0)
    };
    let step_f = step as f64;
    let first = (lo / step_f).ceil();
    let last = (hi / step_f).floor();
    if first > last {
        return Vec::new();
    }

    let count = (last - first) as usize + 1;
    if count > MAX_TICKS {
        warn!(count, limit = MAX_TICKS, "truncating minor x ticks");
    }

    (0..count.min(MAX_TICKS))
        .filter_map(|index| (first as i64).checked_add(index as i64)?.checked_mul(step))
        .filter(|value| majors.binary_search(value).is_err())
        .collect()
}

/// Evenly spaced round tick values covering a continuous axis.
#[derive(Debug, Clone, PartialEq)]
pub struct NiceTicks {
    pub values: Vec<f64>,
    pub step: f64,
}

impl NiceTicks {
    fn empty() -> Self {
        Self {
            values: Vec::new(),
            step: 0.0,
        }
    }
}

/// Picks the smallest step from the 1-2-2.5-5-10 ladder that places at most
/// `max_bins + 1` multiples inside `[lo, hi]`, and lists those multiples.
///
/// The result is never empty for a non-degenerate range.
#[must_use]
pub fn nice_ticks(lo: f64, hi: f64, max_bins: usize) -> NiceTicks {
    if !lo.is_finite() || !hi.is_finite() || hi <= lo || max_bins == 0 {
        return NiceTicks::empty();
    }

    let raw_step = (hi / 2.0 - lo / 2.0) / max_bins as f64 * 2.0;
    let mut magnitude = 10.0_f64.powf(raw_step.log10().floor());
    if !magnitude.is_finite() || magnitude <= 0.0 {
        return NiceTicks::empty();
    }

    let tolerance = 1e-9;
    let step = 'search: loop {
        for mantissa in NICE_MANTISSAS {
            let step = mantissa * magnitude;
            let count = (hi / step + tolerance).floor() - (lo / step - tolerance).ceil() + 1.0;
            if count <= (max_bins + 1) as f64 {
                break 'search step;
            }
        }
        magnitude *= 10.0;
        if !magnitude.is_finite() {
            return NiceTicks::empty();
        }
    };

    let first = (lo / step - tolerance).ceil() as i64;
    let last = (hi / step + tolerance).floor() as i64;
    let values = (first..=last)
        .map(|index| {
            let value = index as f64 * step;
            if value == 0.0 { 0.0 } else { value }
        })
        .collect();

    NiceTicks { values, step }
}

/// Number of y intervals that fit an axis of `axis_span_px` pixels.
pub(super) fn y_bins_for_span(axis_span_px: f64) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return 1;
    }
    let raw = (axis_span_px / Y_TICK_TARGET_SPACING_PX).floor() as usize;
    raw.clamp(1, MAX_Y_BINS)
}

/// Formats a continuous-axis tick with the precision implied by `step`.
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    if value != 0.0 && value.abs() >= SCIENTIFIC_LABEL_ABOVE {
        let digits = if step.is_finite() && step > 0.0 {
            (value.abs().log10().floor() - step.log10().floor()).clamp(0.0, 12.0) as usize
        } else {
            2
        };
        return format!("{value:.digits$e}");
    }
    let precision = precision_from_step(step);
    let text = format!("{value:.precision$}");
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return text.trim_start_matches('-').to_owned();
    }
    text
}

fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let text = format!("{:.12}", step.abs());
    let Some((_, fraction)) = text.split_once('.') else {
        return 0;
    };
    fraction.trim_end_matches('0').len().clamp(0, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arange_is_half_open() {
        assert_eq!(arange_ticks(0, 16, 4), vec![0, 4, 8, 12]);
        assert_eq!(arange_ticks(0, 17, 4), vec![0, 4, 8, 12, 16]);
        assert_eq!(arange_ticks(3, 12, 4), vec![3, 7, 11]);
    }

    #[test]
    fn arange_handles_empty_and_descending_ranges() {
        assert!(arange_ticks(5, 5, 4).is_empty());
        assert!(arange_ticks(10, 0, 4).is_empty());
        assert!(arange_ticks(0, 10, 0).is_empty());
    }

    #[test]
    fn arange_caps_tick_count() {
        assert_eq!(arange_ticks(0, 1_000_000, 4).len(), MAX_TICKS);
        assert_eq!(arange_ticks(i64::MIN, i64::MAX, 1).len(), MAX_TICKS);
    }

    #[test]
    fn minor_ticks_skip_majors() {
        let majors = arange_ticks(2, 14, 4);
        assert_eq!(majors, vec![2, 6, 10]);
        assert_eq!(multiple_ticks((2.0, 14.0), 4, &majors), vec![4, 8, 12]);

        let aligned = arange_ticks(0, 12, 4);
        assert_eq!(multiple_ticks((0.0, 12.0), 4, &aligned), vec![12]);
    }

    #[test]
    fn minor_ticks_handle_negative_and_descending_views() {
        assert_eq!(multiple_ticks((-9.0, 1.0), 4, &[]), vec![-8, -4, 0]);
        assert_eq!(multiple_ticks((9.0, -1.0), 4, &[]), vec![0, 4, 8]);
    }

    #[test]
    fn nice_ticks_use_round_steps() {
        let ticks = nice_ticks(0.0, 100.0, 9);
        assert_eq!(ticks.step, 20.0);
        assert_eq!(ticks.values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);

        let ticks = nice_ticks(93.5, 131.2, 9);
        assert_eq!(ticks.step, 5.0);
        assert_eq!(ticks.values.first().copied(), Some(95.0));
        assert_eq!(ticks.values.last().copied(), Some(130.0));
    }

    #[test]
    fn nice_ticks_respect_bin_budget() {
        for (lo, hi) in [(0.0, 1.0), (-3.7, 12.9), (1e6, 1.3e6), (0.001, 0.0042)] {
            for bins in 1..=9 {
                let ticks = nice_ticks(lo, hi, bins);
                assert!(!ticks.values.is_empty());
                assert!(ticks.values.len() <= bins + 1, "{lo}..{hi} bins={bins}");
                assert!(ticks.values.iter().all(|v| *v >= lo - 1e-9 && *v <= hi + 1e-9));
            }
        }
    }

    #[test]
    fn nice_ticks_reject_degenerate_ranges() {
        assert!(nice_ticks(1.0, 1.0, 9).values.is_empty());
        assert!(nice_ticks(f64::NAN, 1.0, 9).values.is_empty());
    }

    #[test]
    fn labels_follow_step_precision() {
        assert_eq!(format_tick_label(40.0, 20.0), "40");
        assert_eq!(format_tick_label(2.5, 2.5), "2.5");
        assert_eq!(format_tick_label(0.25, 0.05), "0.25");
        assert_eq!(format_tick_label(-0.0, 0.5), "0.0");
    }

    #[test]
    fn huge_labels_use_exponent_notation() {
        assert_eq!(format_tick_label(1.5e308, 5e307), "1.5e308");
        assert_eq!(format_tick_label(-5e307, 5e307), "-5e307");
        assert_eq!(format_tick_label(2.5e10, 5e9), "2.5e10");
    }

    #[test]
    fn nice_ticks_cover_ranges_near_f64_max() {
        let ticks = nice_ticks(-1.1e308, 1.1e308, 9);
        assert!(!ticks.values.is_empty());
        assert!(ticks.step.is_finite());
        assert!(ticks.values.iter().all(|value| value.is_finite()));
    }
}

use serde::Serialize;

use crate::core::DataPoint;

/// One benchmark sample: an instruction count and its cycle statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    pub instructions: i64,
    pub min_cycles: f64,
    pub avg_cycles: f64,
    pub max_cycles: f64,
}

impl Measurement {
    #[must_use]
    pub fn new(instructions: i64, min_cycles: f64, avg_cycles: f64, max_cycles: f64) -> Self {
        Self {
            instructions,
            min_cycles,
            avg_cycles,
            max_cycles,
        }
    }

    #[must_use]
    pub fn cycles(self, kind: SeriesKind) -> f64 {
        match kind {
            SeriesKind::Min => self.min_cycles,
            SeriesKind::Avg => self.avg_cycles,
            SeriesKind::Max => self.max_cycles,
        }
    }
}

/// Which cycle statistic a series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SeriesKind {
    Min,
    Avg,
    Max,
}

impl SeriesKind {
    /// Draw order of the chart series.
    pub const ALL: [SeriesKind; 3] = [SeriesKind::Min, SeriesKind::Avg, SeriesKind::Max];
}

/// Measurements stored as parallel sequences in input order.
///
/// All four sequences always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasurementSet {
    nops: Vec<i64>,
    mins: Vec<f64>,
    avgs: Vec<f64>,
    maxs: Vec<f64>,
}

impl MeasurementSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nops: Vec::with_capacity(capacity),
            mins: Vec::with_capacity(capacity),
            avgs: Vec::with_capacity(capacity),
            maxs: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.nops.push(measurement.instructions);
        self.mins.push(measurement.min_cycles);
        self.avgs.push(measurement.avg_cycles);
        self.maxs.push(measurement.max_cycles);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nops.is_empty()
    }

    #[must_use]
    pub fn nops(&self) -> &[i64] {
        &self.nops
    }

    #[must_use]
    pub fn mins(&self) -> &[f64] {
        &self.mins
    }

    #[must_use]
    pub fn avgs(&self) -> &[f64] {
        &self.avgs
    }

    #[must_use]
    pub fn maxs(&self) -> &[f64] {
        &self.maxs
    }

    #[must_use]
    pub fn cycles(&self, kind: SeriesKind) -> &[f64] {
        match kind {
            SeriesKind::Min => &self.mins,
            SeriesKind::Avg => &self.avgs,
            SeriesKind::Max => &self.maxs,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Measurement> {
        Some(Measurement::new(
            *self.nops.get(index)?,
            self.mins[index],
            self.avgs[index],
            self.maxs[index],
        ))
    }

    pub fn iter(&self) -> impl Iterator<Item = Measurement> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }

    /// First and last instruction count in input order.
    #[must_use]
    pub fn x_limits(&self) -> Option<(i64, i64)> {
        Some((*self.nops.first()?, *self.nops.last()?))
    }

    /// Series samples as `(instructions, cycles)` points.
    #[must_use]
    pub fn points(&self, kind: SeriesKind) -> Vec<DataPoint> {
        self.nops
            .iter()
            .zip(self.cycles(kind))
            .map(|(&nops, &cycles)| DataPoint::new(nops as f64, cycles))
            .collect()
    }

    /// Smallest and largest finite cycle value across all three series.
    #[must_use]
    pub fn cycle_range(&self) -> Option<(f64, f64)> {
        self.mins
            .iter()
            .chain(&self.avgs)
            .chain(&self.maxs)
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
            })
    }
}

impl FromIterator<Measurement> for MeasurementSet {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut set = Self::new();
        for measurement in iter {
            set.push(measurement);
        }
        set
    }
}

impl Extend<Measurement> for MeasurementSet {
    fn extend<I: IntoIterator<Item = Measurement>>(&mut self, iter: I) {
        for measurement in iter {
            self.push(measurement);
        }
    }
}

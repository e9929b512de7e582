pub mod line_series;
pub mod measurement;
pub mod parser;
pub mod scale;
pub mod types;

pub use line_series::{PixelPoint, project_line_runs, project_point};
pub use measurement::{Measurement, MeasurementSet, SeriesKind};
pub use parser::{parse_line, parse_measurements, read_measurements};
pub use scale::{LinearScale, nonsingular};
pub use types::{DataPoint, PlotArea, Viewport};

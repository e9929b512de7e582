//! Parser for benchmark result files.
//!
//! Each line reads `<N>: min=<f> avg=<f> max=<f>`. Tokens are split on
//! whitespace; the `key=` prefixes are not checked and trailing tokens are
//! ignored. The first malformed line aborts the whole parse.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::{Measurement, MeasurementSet};
use crate::error::{PlotError, PlotResult};

/// Parses one measurement line. `line_number` is 1-based and only used for errors.
pub fn parse_line(line: &str, line_number: usize) -> PlotResult<Measurement> {
    let mut tokens = line.split_whitespace();
    let parse_error = |message: String| PlotError::Parse {
        line: line_number,
        message,
    };

    let count_token = tokens
        .next()
        .ok_or_else(|| parse_error("expected `<N>: min=<f> avg=<f> max=<f>`".to_owned()))?;
    let count_text = count_token.trim_end_matches(':');
    let instructions = count_text.parse::<i64>().map_err(|err| {
        parse_error(format!("invalid instruction count `{count_token}`: {err}"))
    })?;

    let mut cycles = [0.0_f64; 3];
    for (slot, field) in cycles.iter_mut().zip(["min", "avg", "max"]) {
        let token = tokens
            .next()
            .ok_or_else(|| parse_error(format!("missing `{field}=<f>` field")))?;
        *slot = parse_field_value(token)
            .map_err(|message| parse_error(format!("`{field}` field: {message}")))?;
    }

    Ok(Measurement::new(instructions, cycles[0], cycles[1], cycles[2]))
}

fn parse_field_value(token: &str) -> Result<f64, String> {
    let value = token
        .split('=')
        .nth(1)
        .ok_or_else(|| format!("expected `key=value`, got `{token}`"))?;
    value
        .parse::<f64>()
        .map_err(|err| format!("invalid number `{value}`: {err}"))
}

/// Parses a whole file body into parallel sequences, preserving line order.
pub fn parse_measurements(text: &str) -> PlotResult<MeasurementSet> {
    let mut set = MeasurementSet::with_capacity(text.lines().count());
    for (index, line) in text.lines().enumerate() {
        set.push(parse_line(line, index + 1)?);
    }
    Ok(set)
}

/// Reads and parses a measurement file.
pub fn read_measurements(path: impl AsRef<Path>) -> PlotResult<MeasurementSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PlotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_measurements(&text)?;
    debug!(path = %path.display(), count = set.len(), "parsed measurement file");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_line() {
        let m = parse_line("0: min=1.0 avg=2.0 max=3.0", 1).expect("parse");
        assert_eq!(m, Measurement::new(0, 1.0, 2.0, 3.0));
    }

    #[test]
    fn tolerates_extra_whitespace_and_trailing_tokens() {
        let m = parse_line("  12:\tmin=40 avg=41.5   max=90 extra=1  ", 1).expect("parse");
        assert_eq!(m, Measurement::new(12, 40.0, 41.5, 90.0));
    }

    #[test]
    fn keys_are_not_checked() {
        let m = parse_line("4: a=1 b=2 =3", 1).expect("parse");
        assert_eq!(m, Measurement::new(4, 1.0, 2.0, 3.0));
    }

    #[test]
    fn value_stops_at_second_equals_sign() {
        let m = parse_line("4: min=1=9 avg=2 max=3", 1).expect("parse");
        assert_eq!(m.min_cycles, 1.0);
    }

    #[test]
    fn strips_every_trailing_colon() {
        let m = parse_line("8:: min=1 avg=2 max=3", 1).expect("parse");
        assert_eq!(m.instructions, 8);
    }

    #[test]
    fn rejects_missing_fields() {
        let err = parse_line("8: min=1 avg=2", 3).expect_err("must fail");
        match err {
            PlotError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("max"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_blank_line() {
        assert!(matches!(
            parse_line("   ", 2),
            Err(PlotError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(parse_line("x: min=1 avg=2 max=3", 1).is_err());
        assert!(parse_line("1.5: min=1 avg=2 max=3", 1).is_err());
        assert!(parse_line("1: min=fast avg=2 max=3", 1).is_err());
        assert!(parse_line("1: min avg=2 max=3", 1).is_err());
    }

    #[test]
    fn counts_must_fit_plain_i64() {
        assert!(parse_line("1_000: min=1 avg=2 max=3", 1).is_err());
        assert!(parse_line("9223372036854775808: min=1 avg=2 max=3", 1).is_err());
        let m = parse_line("-9223372036854775808: min=1 avg=2 max=3", 1).expect("parse");
        assert_eq!(m.instructions, i64::MIN);
    }

    #[test]
    fn error_names_first_bad_line() {
        let text = "0: min=1 avg=2 max=3\n4: min=1 avg=2 max=3\nbad\n8: min=1 avg=2 max=3\n";
        let err = parse_measurements(text).expect_err("must fail");
        assert!(matches!(err, PlotError::Parse { line: 3, .. }));
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let set = parse_measurements("0: min=1 avg=2 max=3\r\n4: min=4 avg=5 max=6\r\n")
            .expect("parse");
        assert_eq!(set.nops(), &[0, 4]);
        assert_eq!(set.maxs(), &[3.0, 6.0]);
    }
}

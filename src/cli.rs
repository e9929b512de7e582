//! Argument handling for the `plot` binary.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::Viewport;

pub const USAGE: &str = "usage: plot [options] <file> <graph title>

Options:
  --output <png>     Render to a PNG file instead of opening a window
  --config <json>    Load chart settings from a JSON file
  --size <W>x<H>     Chart size in pixels (default 640x480)
  -h, --help         Show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub input: PathBuf,
    pub title: String,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub size: Option<Viewport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Plot(CliArgs),
    Help,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// Fewer than two positional arguments.
    #[error("{usage}", usage = USAGE)]
    Usage,

    #[error("{0}\n\n{usage}", usage = USAGE)]
    Invalid(String),
}

/// Parses arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut positionals = Vec::new();
    let mut output = None;
    let mut config = None;
    let mut size = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        // Flags only lead; once the input path is seen, everything is positional.
        if !positionals.is_empty() {
            positionals.push(arg);
            continue;
        }
        match arg.as_str() {
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Invalid("missing value for --output".to_owned()))?;
                output = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Invalid("missing value for --config".to_owned()))?;
                config = Some(PathBuf::from(value));
            }
            "--size" => {
                let value = args
                    .next()
                    .ok_or_else(|| CliError::Invalid("missing value for --size".to_owned()))?;
                size = Some(parse_size(&value)?);
            }
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--" => {
                positionals.extend(args.by_ref());
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::Invalid(format!("unknown argument `{flag}`")));
            }
            _ => positionals.push(arg),
        }
    }

    let mut positionals = positionals.into_iter();
    let (Some(input), Some(title)) = (positionals.next(), positionals.next()) else {
        return Err(CliError::Usage);
    };
    if let Some(extra) = positionals.next() {
        return Err(CliError::Invalid(format!("unexpected argument `{extra}`")));
    }

    Ok(CliCommand::Plot(CliArgs {
        input: PathBuf::from(input),
        title,
        output,
        config,
        size,
    }))
}

fn parse_size(value: &str) -> Result<Viewport, CliError> {
    let invalid = || CliError::Invalid(format!("invalid size `{value}`, expected <W>x<H>"));
    let (width, height) = value.split_once(['x', 'X']).ok_or_else(invalid)?;
    let viewport = Viewport::new(
        width.trim().parse().map_err(|_| invalid())?,
        height.trim().parse().map_err(|_| invalid())?,
    );
    if !viewport.is_valid() {
        return Err(invalid());
    }
    Ok(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn fewer_than_two_positionals_is_usage_error() {
        assert_eq!(parse_args(args(&[])), Err(CliError::Usage));
        assert_eq!(parse_args(args(&["data.txt"])), Err(CliError::Usage));
        assert_eq!(
            parse_args(args(&["--output", "x.png", "data.txt"])),
            Err(CliError::Usage)
        );
    }

    #[test]
    fn usage_error_prints_usage_line() {
        assert!(CliError::Usage.to_string().starts_with("usage: plot"));
    }

    #[test]
    fn parses_positionals_and_flags() {
        let command = parse_args(args(&[
            "--size", "800x600", "--output", "rob.png", "rob.txt", "ROB capacity",
        ]))
        .expect("parse");
        assert_eq!(
            command,
            CliCommand::Plot(CliArgs {
                input: PathBuf::from("rob.txt"),
                title: "ROB capacity".to_owned(),
                output: Some(PathBuf::from("rob.png")),
                config: None,
                size: Some(Viewport::new(800, 600)),
            })
        );
    }

    #[test]
    fn invalid_error_shows_reason_then_usage() {
        let text = CliError::Invalid("unknown argument `--x`".to_owned()).to_string();
        assert!(text.starts_with("unknown argument `--x`\n\nusage: plot"), "{text}");
    }

    #[test]
    fn arguments_after_input_path_are_positional() {
        let Ok(CliCommand::Plot(parsed)) = parse_args(args(&["data.txt", "-h"])) else {
            panic!("expected plot command");
        };
        assert_eq!(parsed.title, "-h");

        let Ok(CliCommand::Plot(parsed)) = parse_args(args(&["data.txt", "--x"])) else {
            panic!("expected plot command");
        };
        assert_eq!(parsed.title, "--x");

        assert_eq!(
            parse_args(args(&["data.txt", "t", "--output", "x.png"])),
            Err(CliError::Invalid("unexpected argument `--output`".to_owned()))
        );
    }

    #[test]
    fn double_dash_ends_flag_parsing() {
        let command = parse_args(args(&["--", "--weird-file", "title"])).expect("parse");
        let CliCommand::Plot(parsed) = command else {
            panic!("expected plot command");
        };
        assert_eq!(parsed.input, PathBuf::from("--weird-file"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_args(args(&["a", "b", "c"])),
            Err(CliError::Invalid(_))
        ));
        assert!(matches!(
            parse_args(args(&["--size", "0x10", "a", "b"])),
            Err(CliError::Invalid(_))
        ));
        assert!(matches!(
            parse_args(args(&["--bogus", "a", "b"])),
            Err(CliError::Invalid(_))
        ));
        assert_eq!(parse_args(args(&["-h"])), Ok(CliCommand::Help));
    }
}

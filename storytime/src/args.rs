//! Command line parsing.

use std::path::PathBuf;
use storytime_core::ShuffleAlgorithm;

/// Options for one generator run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    /// Participant birthday (`YYYY-MM-DD`).
    pub birthday: Option<String>,
    /// Seed for a reproducible protocol.
    pub seed: Option<u64>,
    /// Replacement stimulus catalogue.
    pub catalogue: Option<PathBuf>,
    /// Replacement static frame definitions.
    pub static_frames: Option<PathBuf>,
    /// Write the protocol here instead of stdout.
    pub output: Option<PathBuf>,
    /// Overrides the configured shuffle algorithm.
    pub shuffle: Option<ShuffleAlgorithm>,
    /// Print the counterbalancing summary to stderr.
    pub summary: bool,
    pub help: bool,
}

/// Parse options from command line arguments. Unknown flags and flags
/// missing their value are reported as errors.
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    // Skip the program name
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => options.help = true,
            "--summary" => options.summary = true,
            "--legacy-shuffle" => options.shuffle = Some(ShuffleAlgorithm::Legacy),
            "--birthday" => {
                options.birthday = Some(value(args, i, "--birthday")?.to_string());
                i += 1;
            }
            "--seed" => {
                let raw = value(args, i, "--seed")?;
                let seed = raw
                    .parse()
                    .map_err(|_| format!("--seed expects an unsigned integer, got {raw}"))?;
                options.seed = Some(seed);
                i += 1;
            }
            "--catalogue" => {
                options.catalogue = Some(PathBuf::from(value(args, i, "--catalogue")?));
                i += 1;
            }
            "--static-frames" => {
                options.static_frames = Some(PathBuf::from(value(args, i, "--static-frames")?));
                i += 1;
            }
            "--output" | "-o" => {
                options.output = Some(PathBuf::from(value(args, i, "--output")?));
                i += 1;
            }
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(options)
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

pub fn print_help() {
    println!("storytime - generate a counterbalanced art class storytime protocol");
    println!();
    println!("USAGE:");
    println!("  storytime [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help               Show this help message");
    println!("  --birthday <YYYY-MM-DD>  Participant birthday");
    println!("  --seed <N>               Seed the random generator for a reproducible protocol");
    println!("  --catalogue <PATH>       Load the stimulus catalogue from a JSON file");
    println!("  --static-frames <PATH>   Load the static frame definitions from a JSON file");
    println!("  -o, --output <PATH>      Write the protocol to a file instead of stdout");
    println!("  --legacy-shuffle         Use the reduced-range shuffle of earlier sessions");
    println!("  --summary                Print the counterbalancing summary to stderr");
    println!();
    println!("ENVIRONMENT:");
    println!("  STORYTIME_BASE_DIR       Asset base URL written into generated frames");
    println!("  STORYTIME_SHUFFLE        fisher-yates (default) or legacy");
    println!("  RUST_LOG                 Log filter, e.g. storytime_core=debug");
    println!();
    println!("EXAMPLES:");
    println!("  storytime --birthday 2017-04-12 > protocol.json");
    println!("  storytime --seed 42 --summary -o protocol.json");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("storytime")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse_args(&args(&[])).unwrap(), CliOptions::default());
    }

    #[test]
    fn test_all_flags() {
        let options = parse_args(&args(&[
            "--birthday",
            "2017-04-12",
            "--seed",
            "42",
            "--catalogue",
            "cat.json",
            "--static-frames",
            "static.json",
            "-o",
            "out.json",
            "--legacy-shuffle",
            "--summary",
        ]))
        .unwrap();

        assert_eq!(options.birthday.as_deref(), Some("2017-04-12"));
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.catalogue, Some(PathBuf::from("cat.json")));
        assert_eq!(options.static_frames, Some(PathBuf::from("static.json")));
        assert_eq!(options.output, Some(PathBuf::from("out.json")));
        assert_eq!(options.shuffle, Some(ShuffleAlgorithm::Legacy));
        assert!(options.summary);
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "-3"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }
}

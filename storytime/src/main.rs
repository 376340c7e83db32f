//! Art class storytime protocol generator.
//!
//! Generates one randomized, counterbalanced session protocol and prints it
//! as JSON (`{"frames": ..., "sequence": ...}`) for the playback engine.
//!
//! ```bash
//! cargo run -p storytime -- --birthday 2017-04-12 --seed 7 > protocol.json
//! ```

mod args;

use chrono::Local;
use storytime_core::{
    Participant, ProtocolConfig, ProtocolGenerator, ProtocolResult, RngSource, StaticFrames,
    StimulusCatalogue,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{parse_args, print_help, CliOptions};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("storytime=info,storytime_core=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    if options.help {
        print_help();
        return Ok(());
    }

    let protocol = run(&options)?;
    let json = protocol.to_json_pretty()?;

    match &options.output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(path = %path.display(), "protocol written");
        }
        None => println!("{json}"),
    }

    if options.summary {
        eprintln!("{}", serde_json::to_string_pretty(&protocol.summary)?);
    }

    Ok(())
}

fn run(options: &CliOptions) -> Result<ProtocolResult, Box<dyn std::error::Error>> {
    let mut config = ProtocolConfig::from_env();
    if let Some(shuffle) = options.shuffle {
        config = config.with_shuffle(shuffle);
    }

    let catalogue = match &options.catalogue {
        Some(path) => StimulusCatalogue::load(path)?,
        None => StimulusCatalogue::art_class()?,
    };
    catalogue.validate()?;

    let static_frames = match &options.static_frames {
        Some(path) => StaticFrames::load(path)?,
        None => StaticFrames::art_class()?,
    };

    let generator = ProtocolGenerator::new(catalogue, static_frames, config);

    let mut participant = Participant::new();
    if let Some(birthday) = &options.birthday {
        participant = participant.with_birthday(birthday.clone());
    }

    let protocol = match options.seed {
        Some(seed) => {
            let today = Local::now().date_naive();
            generator.generate_with(&participant, &[], &mut RngSource::seeded(seed), today)?
        }
        None => generator.generate(&participant, &[])?,
    };

    protocol.validate()?;
    Ok(protocol)
}

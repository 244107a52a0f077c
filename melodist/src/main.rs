// Melodist CLI entry point.
//
// Loads a seed melody from a MIDI file, generates a new melody plus a triad
// accompaniment, and writes two files: the melody alone and the melody with
// the accompaniment as a second track.
//
// Usage:
//   cargo run -p melodist -- <seed.mid> [--melody-out melody.mid]
//     [--combined-out melody_with_accomp.mid] [--config config.json]
//     [--scale major|minor] [--length N] [--parts N] [--unit TICKS]
//     [--track N] [--seed N] [--model-out model.json] [--verbose]

use log::LevelFilter;
use melodist::config::GenConfig;
use melodist::midi::load_seed;
use melodist::{GenError, Result, compose};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    init_logger(args.iter().any(|a| a == "--verbose"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let Some(seed_path) = args.get(1).filter(|s| !s.starts_with("--")) else {
        eprintln!("usage: melodist <seed.mid> [options]");
        return Err(GenError::InvalidConfig("no seed file given".into()));
    };
    let melody_out: PathBuf =
        parse_flag(args, "--melody-out")?.unwrap_or_else(|| "melody.mid".into());
    let combined_out: PathBuf =
        parse_flag(args, "--combined-out")?.unwrap_or_else(|| "melody_with_accomp.mid".into());
    let model_out: Option<PathBuf> = parse_flag(args, "--model-out")?;
    let seed: Option<u64> = parse_flag(args, "--seed")?;
    let config = build_config(args)?;

    println!("=== Melodist ===");
    println!("Seed file: {seed_path} (track {})", config.seed_track);
    println!("Scale: {}", config.scale);
    println!(
        "Melody: {} notes in ({}, {}), {} ticks apart",
        config.melody_length, config.melody_range.low, config.melody_range.high, config.unit_time
    );
    println!(
        "Accompaniment: {} chords in ({}, {})",
        config.parts, config.accompaniment_range.low, config.accompaniment_range.high
    );
    if let Some(s) = seed {
        println!("Random seed: {s}");
    }
    println!();

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    println!("[1/3] Loading seed melody...");
    let seed_pitches = load_seed(Path::new(seed_path), config.seed_track)?;
    println!("  {} onsets.", seed_pitches.len());

    println!("[2/3] Generating...");
    let piece = compose(&seed_pitches, &config, &mut rng)?;
    println!(
        "  Model: {} pitches, {} transitions.",
        piece.model.keys().len(),
        piece.model.observation_count()
    );
    println!("  Melody: {:?}", piece.melody);
    println!("  Chord roots: {:?}", piece.accompaniment);
    println!(
        "  Duration: {} ticks, {} ticks per chord.",
        piece.melody_duration, piece.chord_duration
    );

    if let Some(model_out) = model_out {
        piece.model.save(&model_out)?;
        println!("  Model written to {}.", model_out.display());
    }

    println!("[3/3] Writing MIDI...");
    piece.write(&config, &melody_out, &combined_out)?;
    println!("  {}", melody_out.display());
    println!("  {}", combined_out.display());
    Ok(())
}

/// Config file (if any) with command-line overrides applied, validated.
fn build_config(args: &[String]) -> Result<GenConfig> {
    let mut config = match parse_flag::<PathBuf>(args, "--config")? {
        Some(path) => GenConfig::load(&path)?,
        None => GenConfig::default(),
    };
    if let Some(scale) = parse_flag(args, "--scale")? {
        config.scale = scale;
    }
    if let Some(length) = parse_flag(args, "--length")? {
        config.melody_length = length;
    }
    if let Some(parts) = parse_flag(args, "--parts")? {
        config.parts = parts;
    }
    if let Some(unit) = parse_flag(args, "--unit")? {
        config.unit_time = unit;
    }
    if let Some(track) = parse_flag(args, "--track")? {
        config.seed_track = track;
    }
    config.validate()?;
    Ok(config)
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// The argument following `flag`. A flag given as the last argument, with
/// no value after it, is an error.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => args
            .get(i + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| GenError::InvalidConfig(format!("missing value for {flag}"))),
    }
}

fn parse_flag<T: FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    flag_value(args, flag)?
        .map(|v| {
            v.parse()
                .map_err(|_| GenError::InvalidConfig(format!("invalid value '{v}' for {flag}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use melodist::chord::Scale;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flags_override_defaults() {
        let argv = args(&[
            "melodist", "seed.mid", "--scale", "MINOR", "--length", "32", "--parts", "8",
            "--unit", "240", "--track", "0",
        ]);
        let config = build_config(&argv).unwrap();
        assert_eq!(config.scale, Scale::Minor);
        assert_eq!(config.melody_length, 32);
        assert_eq!(config.parts, 8);
        assert_eq!(config.unit_time, 240);
        assert_eq!(config.seed_track, 0);
        assert_eq!(parse_flag::<u64>(&argv, "--seed").unwrap(), None);
    }

    #[test]
    fn test_malformed_numbers_are_rejected() {
        for (flag, value) in [
            ("--length", "sixty"),
            ("--parts", "-3"),
            ("--unit", "1e3"),
            ("--track", "one"),
        ] {
            let argv = args(&["melodist", "seed.mid", flag, value]);
            let err = build_config(&argv).unwrap_err();
            assert!(matches!(err, GenError::InvalidConfig(_)), "{flag} {value}");
            assert!(err.to_string().contains(flag));
            assert!(err.to_string().contains(value));
        }
    }

    #[test]
    fn test_malformed_seed_is_rejected() {
        let argv = args(&["melodist", "seed.mid", "--seed", "abc"]);
        assert!(matches!(
            parse_flag::<u64>(&argv, "--seed"),
            Err(GenError::InvalidConfig(_))
        ));
        let argv = args(&["melodist", "seed.mid", "--seed", "42"]);
        assert_eq!(parse_flag::<u64>(&argv, "--seed").unwrap(), Some(42));
    }

    #[test]
    fn test_flag_without_value_is_rejected() {
        let argv = args(&["melodist", "seed.mid", "--length"]);
        assert!(build_config(&argv).is_err());
    }

    #[test]
    fn test_unknown_scale_is_rejected() {
        let argv = args(&["melodist", "seed.mid", "--scale", "dorian"]);
        assert!(build_config(&argv).is_err());
    }
}

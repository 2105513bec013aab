//! pina-sounds: generates `pina_chat` and `pina_notification`.
//!
//! Progress goes to stdout; diagnostics go to stderr through `tracing`
//! (set `RUST_LOG=debug` for details).

use anyhow::Context;

use pina_sounds::audio::{DisabledTranscoder, FfmpegTranscoder, Transcoder};
use pina_sounds::cli::Cli;
use pina_sounds::config::SoundsConfig;
use pina_sounds::generation::{prepare_output_dir, produce_all, RunReport};

fn main() {
    init_logging();

    let cli = Cli::parse_args();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Generates both sounds and returns the process exit code.
fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = cli.apply(SoundsConfig::from_env());
    config.validate().context("invalid configuration")?;
    let output_dir = prepare_output_dir(&config).context("cannot use output directory")?;

    tracing::debug!(config = ?config, "starting");

    let ffmpeg = FfmpegTranscoder::new(&config.transcoder);
    let transcoder: &dyn Transcoder = if config.wav_only {
        &DisabledTranscoder
    } else {
        &ffmpeg
    };

    let verbose = !cli.json;
    if verbose && !config.wav_only {
        check_transcoder(&ffmpeg);
    }

    let report = produce_all(&output_dir, transcoder, |kind| {
        if verbose {
            println!("Generating {} sound...", kind);
        }
    });

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report.to_json()).context("failed to encode report")?
        );
    } else {
        print_report(&report, config.wav_only);
    }

    Ok(report.exit_code())
}

/// Tells the user up front whether MP3 output is possible.
fn check_transcoder(ffmpeg: &FfmpegTranscoder) {
    match ffmpeg.probe() {
        Ok(()) => println!("Found {}; sounds will be converted to MP3.", ffmpeg.name()),
        Err(reason) => println!("{}; sounds will be saved as WAV.", reason),
    }
}

/// Prints one line per sound plus a summary.
fn print_report(report: &RunReport, wav_only: bool) {
    for line in report_lines(report, wav_only) {
        println!("{}", line);
    }
}

fn report_lines(report: &RunReport, wav_only: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if !wav_only {
        lines.push("Converting to MP3...".to_string());
    }
    for sound in &report.sounds {
        lines.push(match &sound.result {
            Ok(outcome) if outcome.fell_back() => format!(
                "✓ {} created (convert to MP3 manually)",
                outcome.artifact.file_name()
            ),
            Ok(outcome) => format!("✓ {} created", outcome.artifact.file_name()),
            Err(e) => format!("✗ {} failed: {}", sound.kind.file_stem(), e),
        });
    }

    lines.push(String::new());
    if report.failed() == 0 {
        lines.push("Sounds generated successfully!".to_string());
    } else {
        lines.push(format!(
            "Finished with errors: {} of {} sounds generated.",
            report.produced(),
            report.sounds.len()
        ));
    }
    lines
}

//! Command-line interface.
//!
//! Every flag is optional; running with none reproduces the classic
//! behavior (files in the working directory, `ffmpeg` from `PATH`).

use std::path::PathBuf;

use clap::Parser;

use crate::config::{SoundsConfig, MAX_TIMEOUT_SEC};

/// pina-sounds: generate the PINA chat and notification sounds
#[derive(Parser, Debug)]
#[command(name = "pina-sounds")]
#[command(about = "Synthesizes the PINA chat and notification sounds as MP3 (or WAV)")]
#[command(version)]
pub struct Cli {
    /// Directory to write the sounds into (default: current directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Transcoder program used for MP3 output
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Seconds to wait for the transcoder before giving up on MP3
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SEC))]
    pub timeout: Option<u64>,

    /// Skip MP3 conversion and keep WAV files
    #[arg(long)]
    pub wav_only: bool,

    /// Print a JSON summary instead of progress lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Overlays the flags that were given onto `config`.
    pub fn apply(&self, mut config: SoundsConfig) -> SoundsConfig {
        if let Some(ref dir) = self.output_dir {
            config.output_dir = Some(dir.clone());
        }
        if let Some(ref program) = self.ffmpeg {
            config.transcoder.program = program.clone();
        }
        if let Some(timeout) = self.timeout {
            config.transcoder.timeout_sec = timeout;
        }
        if self.wav_only {
            config.wav_only = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_keep_config() {
        let cli = Cli::try_parse_from(["pina-sounds"]).unwrap();
        let config = SoundsConfig::from_lookup(|key| {
            (key == "PINA_TRANSCODE_TIMEOUT").then(|| "12".to_string())
        });
        assert_eq!(cli.apply(config.clone()), config);
        assert!(!cli.json);
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "pina-sounds",
            "--output-dir",
            "public/sounds",
            "--ffmpeg",
            "/usr/local/bin/ffmpeg",
            "--timeout",
            "5",
            "--wav-only",
        ])
        .unwrap();

        let config = cli.apply(SoundsConfig::default());
        assert_eq!(config.effective_output_dir(), PathBuf::from("public/sounds"));
        assert_eq!(config.transcoder.program, PathBuf::from("/usr/local/bin/ffmpeg"));
        assert_eq!(config.transcoder.timeout_sec, 5);
        assert!(config.wav_only);
    }

    #[test]
    fn timeout_range_enforced() {
        assert!(Cli::try_parse_from(["pina-sounds", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["pina-sounds", "--timeout", "601"]).is_err());
        assert!(Cli::try_parse_from(["pina-sounds", "-o", "out", "--json"]).is_ok());
    }

    #[test]
    fn command_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
